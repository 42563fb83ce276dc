use contracts::metrics::{MetricBundle, Page, TrendChart};
use contracts::system::auth::Role;
use thiserror::Error;

use crate::shared::policy;

/// Errors produced by the derivation engine. None of these are fatal:
/// `MissingMetric` sends the caller to the fallback bundle,
/// `DivisionByZero` omits the derived value, and `DataIntegrity` is
/// surfaced as a visible warning on the page view.
#[derive(Debug, Error, PartialEq)]
pub enum DeriveError {
    #[error("required metric `{0}` is missing or not numeric")]
    MissingMetric(String),
    #[error("profit margin undefined: revenue is zero")]
    DivisionByZero,
    #[error("inconsistent source data: {0}")]
    DataIntegrity(String),
}

/// Numeric KPI lookup that upgrades an absent key into the typed error.
pub fn require_number(bundle: &MetricBundle, key: &str) -> Result<f64, DeriveError> {
    bundle
        .number(key)
        .ok_or_else(|| DeriveError::MissingMetric(key.to_string()))
}

// ---------------------------------------------------------------------------
// Stock-status bucketing (inventory)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockStatus {
    pub in_stock: f64,
    pub low_stock: f64,
    pub out_of_stock: f64,
}

/// Split `total_items` into in-stock / low-stock / out-of-stock buckets.
///
/// Invariant: the three buckets sum to `total_items`. A negative
/// in-stock count means the sub-counts exceed the total, an upstream
/// data defect that is reported, never clamped to zero.
pub fn stock_status(
    total_items: f64,
    low_stock_items: f64,
    out_of_stock: f64,
) -> Result<StockStatus, DeriveError> {
    let in_stock = total_items - low_stock_items - out_of_stock;
    if in_stock < 0.0 {
        return Err(DeriveError::DataIntegrity(format!(
            "low_stock_items ({low_stock_items}) + out_of_stock ({out_of_stock}) \
             exceed total_items ({total_items})"
        )));
    }
    Ok(StockStatus {
        in_stock,
        low_stock: low_stock_items,
        out_of_stock,
    })
}

// ---------------------------------------------------------------------------
// Order-status bucketing (purchase)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStatus {
    pub delivered: f64,
    pub pending: f64,
    pub in_transit: f64,
    pub cancelled: f64,
}

/// Split `total_orders` into delivered / pending / in-transit /
/// cancelled buckets. `in_transit` and `cancelled` come from config
/// (the upstream does not track them yet); the remainder is delivered.
pub fn order_status(
    total_orders: f64,
    pending_orders: f64,
    in_transit: f64,
    cancelled: f64,
) -> Result<OrderStatus, DeriveError> {
    let delivered = total_orders - pending_orders - in_transit - cancelled;
    if delivered < 0.0 {
        return Err(DeriveError::DataIntegrity(format!(
            "pending ({pending_orders}) + in_transit ({in_transit}) + \
             cancelled ({cancelled}) exceed total_orders ({total_orders})"
        )));
    }
    Ok(OrderStatus {
        delivered,
        pending: pending_orders,
        in_transit,
        cancelled,
    })
}

// ---------------------------------------------------------------------------
// Profit arithmetic
// ---------------------------------------------------------------------------

/// Profit margin in percent, rounded to one decimal.
pub fn profit_margin(profit: f64, revenue: f64) -> Result<f64, DeriveError> {
    if revenue == 0.0 {
        return Err(DeriveError::DivisionByZero);
    }
    Ok(((profit / revenue) * 1000.0).round() / 10.0)
}

/// Derive a profit time series from a revenue series and a scalar
/// margin percentage. Output length equals input length; an empty
/// input yields an empty output.
pub fn profit_series(revenue: &[f64], margin_pct: f64) -> Vec<f64> {
    revenue.iter().map(|v| v * (margin_pct / 100.0)).collect()
}

// ---------------------------------------------------------------------------
// Role-aware trend filtering
// ---------------------------------------------------------------------------

/// Drop every series of a trend chart the role may not see, deciding
/// through the central policy table (the series `key` is the policy
/// field identifier). Never encodes its own role logic.
pub fn filter_trend(chart: TrendChart, role: Option<Role>, page: Page) -> TrendChart {
    TrendChart {
        labels: chart.labels,
        series: chart
            .series
            .into_iter()
            .filter(|s| policy::visible(role, page, &s.key))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::metrics::TrendSeries;

    #[test]
    fn stock_buckets_sum_to_total() {
        let status = stock_status(3500.0, 25.0, 12.0).unwrap();
        assert_eq!(status.in_stock, 3463.0);
        assert_eq!(
            status.in_stock + status.low_stock + status.out_of_stock,
            3500.0
        );
    }

    #[test]
    fn negative_in_stock_is_a_data_integrity_error() {
        let err = stock_status(30.0, 25.0, 12.0).unwrap_err();
        assert!(matches!(err, DeriveError::DataIntegrity(_)));
    }

    #[test]
    fn order_buckets_sum_to_total() {
        let status = order_status(250.0, 15.0, 10.0, 5.0).unwrap();
        assert_eq!(status.delivered, 220.0);
        assert_eq!(
            status.delivered + status.pending + status.in_transit + status.cancelled,
            250.0
        );
    }

    #[test]
    fn oversubscribed_orders_are_a_data_integrity_error() {
        let err = order_status(20.0, 15.0, 10.0, 5.0).unwrap_err();
        assert!(matches!(err, DeriveError::DataIntegrity(_)));
    }

    #[test]
    fn margin_rounds_to_one_decimal() {
        assert_eq!(profit_margin(8750.0, 25000.0).unwrap(), 35.0);
        assert_eq!(profit_margin(6860.0, 19600.0).unwrap(), 35.0);
        assert_eq!(profit_margin(1.0, 3.0).unwrap(), 33.3);
    }

    #[test]
    fn margin_with_zero_revenue_fails() {
        assert_eq!(profit_margin(1.0, 0.0), Err(DeriveError::DivisionByZero));
    }

    #[test]
    fn profit_series_scales_revenue() {
        assert_eq!(
            profit_series(&[15000.0, 18000.0], 30.0),
            vec![4500.0, 5400.0]
        );
    }

    #[test]
    fn profit_series_of_empty_input_is_empty() {
        assert!(profit_series(&[], 30.0).is_empty());
    }

    #[test]
    fn missing_metric_error_carries_the_key() {
        let bundle: MetricBundle = serde_json::from_str(r#"{"kpis": {}}"#).unwrap();
        assert_eq!(
            require_number(&bundle, "total_sales"),
            Err(DeriveError::MissingMetric("total_sales".into()))
        );
    }

    fn growth_chart() -> TrendChart {
        TrendChart {
            labels: vec!["Jan".into(), "Feb".into()],
            series: vec![
                TrendSeries {
                    key: "revenue_growth".into(),
                    label: "Revenue Growth".into(),
                    data: vec![2.5, 3.2],
                },
                TrendSeries {
                    key: "profit_growth".into(),
                    label: "Profit Growth".into(),
                    data: vec![1.8, 2.5],
                },
                TrendSeries {
                    key: "customer_growth".into(),
                    label: "Customer Growth".into(),
                    data: vec![1.2, 2.0],
                },
            ],
        }
    }

    #[test]
    fn analyst_trend_filter_drops_profit_growth() {
        let filtered = filter_trend(growth_chart(), Some(Role::Analyst), Page::Reports);
        assert!(filtered.series.iter().all(|s| s.label != "Profit Growth"));
        assert!(filtered
            .series
            .iter()
            .any(|s| s.label == "Customer Growth"));
    }

    #[test]
    fn admin_trend_filter_keeps_profit_growth() {
        let filtered = filter_trend(growth_chart(), Some(Role::Admin), Page::Reports);
        assert!(filtered.series.iter().any(|s| s.label == "Profit Growth"));
        assert_eq!(filtered.series.len(), 3);
    }

    #[test]
    fn anonymous_trend_filter_keeps_everything() {
        let filtered = filter_trend(growth_chart(), None, Page::Reports);
        assert_eq!(filtered.series.len(), 3);
    }
}
