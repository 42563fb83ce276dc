use contracts::metrics::{MetricBundle, Page};
use contracts::pages::PageView;
use contracts::system::auth::Role;

pub async fn load(role: Option<Role>) -> PageView {
    let bundle = super::obtain_bundle(Page::Dashboard).await;
    build_view(&bundle, role)
}

/// Dashboard has no derived figures: policy-approved KPIs plus the
/// monthly and daily sales charts as delivered.
pub fn build_view(bundle: &MetricBundle, role: Option<Role>) -> PageView {
    let mut view = PageView::new(Page::Dashboard);
    view.kpis = super::approved_kpis(bundle, Page::Dashboard, role);
    view.charts = bundle.charts.clone();
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metrics::fallback;

    #[test]
    fn admin_view_is_the_full_bundle() {
        let bundle = fallback::bundle(Page::Dashboard);
        let view = build_view(&bundle, Some(Role::Admin));
        assert_eq!(view.kpis, bundle.kpis);
        assert_eq!(view.charts, bundle.charts);
        assert!(view.warnings.is_empty());
    }

    #[test]
    fn manager_view_lacks_conversion_rate() {
        let bundle = fallback::bundle(Page::Dashboard);
        let view = build_view(&bundle, Some(Role::Manager));
        assert!(!view.kpis.contains_key("conversion_rate"));
        assert_eq!(view.kpis.len(), 5);
    }

    #[test]
    fn analyst_view_has_only_the_basic_kpis() {
        let bundle = fallback::bundle(Page::Dashboard);
        let view = build_view(&bundle, Some(Role::Analyst));
        let keys: Vec<_> = view.kpis.keys().map(String::as_str).collect();
        assert_eq!(keys, ["total_customers", "total_orders", "total_sales"]);
    }
}
