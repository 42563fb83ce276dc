use contracts::metrics::{ChartSeries, MetricBundle, Page};
use contracts::pages::PageView;
use contracts::system::auth::Role;

use crate::shared::config;
use crate::shared::metrics::derive::{self, DeriveError};

pub async fn load(role: Option<Role>) -> PageView {
    let bundle = super::obtain_bundle(Page::Purchase).await;
    build_view(&bundle, role)
}

/// Purchase adds the derived order-status buckets. The in-transit and
/// cancelled counts come from config until the upstream tracks them.
pub fn build_view(bundle: &MetricBundle, role: Option<Role>) -> PageView {
    let mut view = PageView::new(Page::Purchase);
    view.kpis = super::approved_kpis(bundle, Page::Purchase, role);
    view.charts = bundle.charts.clone();

    let derivation = &config::get().derivation;
    match order_status_chart(bundle, derivation.in_transit_orders, derivation.cancelled_orders) {
        Ok(chart) => {
            view.charts.insert("order_status".to_string(), chart);
        }
        Err(e @ DeriveError::DataIntegrity(_)) => {
            tracing::warn!("purchase: {e}");
            view.warnings.push(e.to_string());
        }
        Err(e) => {
            tracing::warn!("purchase: order status unavailable: {e}");
        }
    }

    view
}

fn order_status_chart(
    bundle: &MetricBundle,
    in_transit: f64,
    cancelled: f64,
) -> Result<ChartSeries, DeriveError> {
    let status = derive::order_status(
        derive::require_number(bundle, "total_orders")?,
        derive::require_number(bundle, "pending_orders")?,
        in_transit,
        cancelled,
    )?;
    Ok(ChartSeries::new(
        vec![
            "Delivered".to_string(),
            "Pending".to_string(),
            "In Transit".to_string(),
            "Cancelled".to_string(),
        ],
        vec![
            status.delivered,
            status.pending,
            status.in_transit,
            status.cancelled,
        ],
    ))
}
