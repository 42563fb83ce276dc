use contracts::metrics::{ChartSeries, MetricBundle, Page};
use contracts::pages::PageView;
use contracts::system::auth::Role;

use crate::shared::metrics::derive::{self, DeriveError};

pub async fn load(role: Option<Role>) -> PageView {
    let bundle = super::obtain_bundle(Page::Inventory).await;
    build_view(&bundle, role)
}

/// Inventory adds the derived stock-status buckets to the raw charts.
/// Inconsistent counts (sub-counts exceeding the total) are surfaced as
/// a warning; the bucket chart is omitted rather than clamped.
pub fn build_view(bundle: &MetricBundle, role: Option<Role>) -> PageView {
    let mut view = PageView::new(Page::Inventory);
    view.kpis = super::approved_kpis(bundle, Page::Inventory, role);
    view.charts = bundle.charts.clone();

    match stock_status_chart(bundle) {
        Ok(chart) => {
            view.charts.insert("stock_status".to_string(), chart);
        }
        Err(e @ DeriveError::DataIntegrity(_)) => {
            tracing::warn!("inventory: {e}");
            view.warnings.push(e.to_string());
        }
        Err(e) => {
            // Missing KPIs are caught by bundle validation before this
            // point; a non-numeric value still lands here.
            tracing::warn!("inventory: stock status unavailable: {e}");
        }
    }

    view
}

fn stock_status_chart(bundle: &MetricBundle) -> Result<ChartSeries, DeriveError> {
    let status = derive::stock_status(
        derive::require_number(bundle, "total_items")?,
        derive::require_number(bundle, "low_stock_items")?,
        derive::require_number(bundle, "out_of_stock")?,
    )?;
    Ok(ChartSeries::new(
        vec![
            "In Stock".to_string(),
            "Low Stock".to_string(),
            "Out of Stock".to_string(),
        ],
        vec![status.in_stock, status.low_stock, status.out_of_stock],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::metrics::MetricValue;

    use crate::shared::metrics::fallback;

    #[test]
    fn stock_status_chart_sums_to_total() {
        let bundle = fallback::bundle(Page::Inventory);
        let view = build_view(&bundle, Some(Role::Admin));
        let chart = &view.charts["stock_status"];
        assert_eq!(chart.data, vec![3463.0, 25.0, 12.0]);
        assert_eq!(chart.data.iter().sum::<f64>(), 3500.0);
        assert!(view.warnings.is_empty());
    }

    #[test]
    fn inconsistent_counts_surface_a_warning_instead_of_a_chart() {
        let mut bundle = fallback::bundle(Page::Inventory);
        bundle
            .kpis
            .insert("total_items".to_string(), MetricValue::Number(30.0));
        let view = build_view(&bundle, Some(Role::Admin));
        assert!(!view.charts.contains_key("stock_status"));
        assert_eq!(view.warnings.len(), 1);
        assert!(view.warnings[0].contains("inconsistent"));
    }

    #[test]
    fn all_roles_see_all_inventory_kpis() {
        let bundle = fallback::bundle(Page::Inventory);
        for role in [Role::Admin, Role::Manager, Role::Analyst] {
            let view = build_view(&bundle, Some(role));
            assert_eq!(view.kpis.len(), 6, "{role}");
        }
    }
}
