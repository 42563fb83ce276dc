use contracts::metrics::{ChartSeries, MetricBundle, Page};
use contracts::pages::PageView;
use contracts::system::auth::Role;

use crate::shared::metrics::derive;

pub async fn load(role: Option<Role>) -> PageView {
    let bundle = super::obtain_bundle(Page::Sales).await;
    build_view(&bundle, role)
}

/// Sales synthesizes a monthly profit series from the revenue series
/// and the scalar profit-margin KPI.
pub fn build_view(bundle: &MetricBundle, role: Option<Role>) -> PageView {
    let mut view = PageView::new(Page::Sales);
    view.kpis = super::approved_kpis(bundle, Page::Sales, role);
    view.charts = bundle.charts.clone();

    if let (Some(revenue), Some(margin)) = (
        bundle.charts.get("monthly_revenue"),
        bundle.number("profit_margin"),
    ) {
        view.charts.insert(
            "monthly_profit".to_string(),
            ChartSeries::new(
                revenue.labels.clone(),
                derive::profit_series(&revenue.data, margin),
            ),
        );
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::shared::metrics::fallback;

    #[test]
    fn profit_series_tracks_revenue_at_the_margin() {
        let bundle = fallback::bundle(Page::Sales);
        let view = build_view(&bundle, Some(Role::Admin));
        let profit = &view.charts["monthly_profit"];
        let revenue = &view.charts["monthly_revenue"];
        assert_eq!(profit.labels, revenue.labels);
        assert_eq!(profit.data[0], 4500.0); // 15000 * 30%
        assert_eq!(profit.data[1], 5400.0); // 18000 * 30%
        assert_eq!(profit.data.len(), revenue.data.len());
    }

    #[test]
    fn missing_revenue_chart_skips_the_derived_series() {
        let mut bundle = fallback::bundle(Page::Sales);
        bundle.charts.clear();
        let view = build_view(&bundle, Some(Role::Admin));
        assert!(!view.charts.contains_key("monthly_profit"));
    }
}
