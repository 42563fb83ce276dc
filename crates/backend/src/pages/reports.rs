use contracts::metrics::{MetricBundle, Page, TrendChart, TrendSeries};
use contracts::pages::{PageView, TopProductRow};
use contracts::system::auth::Role;

use crate::shared::metrics::derive;
use crate::shared::policy;

pub async fn load(role: Option<Role>) -> PageView {
    let bundle = super::obtain_bundle(Page::Reports).await;
    build_view(&bundle, role)
}

/// Reports carries the growth-trend chart (series filtered per role
/// through the policy table) and the top-products table with its
/// profit columns gated the same way.
pub fn build_view(bundle: &MetricBundle, role: Option<Role>) -> PageView {
    let mut view = PageView::new(Page::Reports);
    view.kpis = super::approved_kpis(bundle, Page::Reports, role);

    view.trends.insert(
        "growth_trends".to_string(),
        derive::filter_trend(growth_trends(), role, Page::Reports),
    );

    if policy::visible(role, Page::Reports, "top_products") {
        let (rows, mut warnings) = top_product_rows(role);
        view.top_products = Some(rows);
        view.warnings.append(&mut warnings);
    }

    view
}

/// Six-month growth trend per KPI. The upstream reports endpoint only
/// delivers scalar growth figures so far; the series mirror the last
/// reported values.
fn growth_trends() -> TrendChart {
    let labels = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
        .map(String::from)
        .to_vec();
    TrendChart {
        labels,
        series: vec![
            TrendSeries {
                key: "revenue_growth".to_string(),
                label: "Revenue Growth".to_string(),
                data: vec![2.5, 3.2, 4.1, 5.3, 7.2, 8.5],
            },
            TrendSeries {
                key: "profit_growth".to_string(),
                label: "Profit Growth".to_string(),
                data: vec![1.8, 2.5, 3.5, 4.8, 6.5, 7.2],
            },
            TrendSeries {
                key: "customer_growth".to_string(),
                label: "Customer Growth".to_string(),
                data: vec![1.2, 2.0, 2.8, 3.5, 4.5, 5.8],
            },
        ],
    }
}

const TOP_PRODUCTS: [(&str, i64, f64, f64); 5] = [
    ("Product A", 1250, 25000.0, 8750.0),
    ("Product B", 980, 19600.0, 6860.0),
    ("Product C", 850, 17000.0, 5950.0),
    ("Product D", 720, 14400.0, 5040.0),
    ("Product E", 650, 13000.0, 4550.0),
];

fn top_product_rows(role: Option<Role>) -> (Vec<TopProductRow>, Vec<String>) {
    let show_profit = policy::visible(role, Page::Reports, "profit");
    let show_margin = policy::visible(role, Page::Reports, "profit_margin");
    let mut warnings = Vec::new();

    let rows = TOP_PRODUCTS
        .iter()
        .map(|&(name, sales, revenue, profit)| {
            let margin = if show_margin {
                match derive::profit_margin(profit, revenue) {
                    Ok(m) => Some(m),
                    Err(e) => {
                        // Zero-revenue rows get no margin cell rather
                        // than a NaN/Infinity reaching presentation.
                        warnings.push(format!("{name}: {e}"));
                        None
                    }
                }
            } else {
                None
            };
            TopProductRow {
                name: name.to_string(),
                sales,
                revenue,
                profit: show_profit.then_some(profit),
                profit_margin: margin,
            }
        })
        .collect();

    (rows, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::shared::metrics::fallback;

    #[test]
    fn admin_sees_profit_growth_series_and_profit_columns() {
        let bundle = fallback::bundle(Page::Reports);
        let view = build_view(&bundle, Some(Role::Admin));

        let trend = &view.trends["growth_trends"];
        assert!(trend.series.iter().any(|s| s.label == "Profit Growth"));

        let rows = view.top_products.unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].profit, Some(8750.0));
        assert_eq!(rows[0].profit_margin, Some(35.0));
    }

    #[test]
    fn manager_keeps_profit_columns_but_loses_profit_growth() {
        let bundle = fallback::bundle(Page::Reports);
        let view = build_view(&bundle, Some(Role::Manager));

        assert!(!view.kpis.contains_key("profit_growth"));
        let trend = &view.trends["growth_trends"];
        assert!(trend.series.iter().all(|s| s.label != "Profit Growth"));

        let rows = view.top_products.unwrap();
        assert_eq!(rows[1].profit, Some(6860.0));
        assert_eq!(rows[1].profit_margin, Some(35.0));
    }

    #[test]
    fn analyst_gets_no_product_table_and_no_profit_series() {
        let bundle = fallback::bundle(Page::Reports);
        let view = build_view(&bundle, Some(Role::Analyst));

        assert!(view.top_products.is_none());
        let trend = &view.trends["growth_trends"];
        assert!(trend.series.iter().all(|s| s.label != "Profit Growth"));

        let keys: Vec<_> = view.kpis.keys().map(String::as_str).collect();
        assert_eq!(keys, ["average_order_growth", "customer_growth"]);
    }

    #[test]
    fn anonymous_session_sees_the_full_report() {
        let bundle = fallback::bundle(Page::Reports);
        let view = build_view(&bundle, None);
        assert_eq!(view.kpis.len(), 6);
        assert!(view.top_products.is_some());
        assert_eq!(view.trends["growth_trends"].series.len(), 3);
    }

    #[test]
    fn fallback_round_trip_preserves_underived_kpis_for_admin() {
        let bundle = fallback::bundle(Page::Reports);
        let view = build_view(&bundle, Some(Role::Admin));
        assert_eq!(view.kpis, bundle.kpis);
    }
}
