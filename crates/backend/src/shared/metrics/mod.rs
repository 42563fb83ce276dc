pub mod cache;
pub mod derive;
pub mod fallback;
pub mod source;

use contracts::metrics::{MetricBundle, Page};

use self::derive::DeriveError;

/// KPI keys a bundle must carry for its page. Derived figures and the
/// policy layer rely on these; anything beyond them passes through
/// untouched.
pub fn required_keys(page: Page) -> &'static [&'static str] {
    match page {
        Page::Dashboard => &[
            "total_sales",
            "total_orders",
            "total_customers",
            "average_order_value",
            "conversion_rate",
            "revenue_growth",
        ],
        Page::Inventory => &[
            "total_items",
            "low_stock_items",
            "out_of_stock",
            "inventory_value",
            "inventory_turnover",
            "average_days_in_inventory",
        ],
        Page::Sales => &[
            "total_revenue",
            "total_profit",
            "profit_margin",
            "average_order_value",
            "return_rate",
            "customer_lifetime_value",
        ],
        Page::Purchase => &[
            "total_purchase_value",
            "total_orders",
            "average_order_value",
            "pending_orders",
            "supplier_count",
            "on_time_delivery_rate",
        ],
        Page::Reports => &[
            "revenue_growth",
            "profit_growth",
            "customer_growth",
            "average_order_growth",
            "inventory_turnover_change",
            "return_rate_change",
        ],
    }
}

/// Reject a malformed bundle before it reaches derivation. The caller
/// recovers with the fallback bundle; a missing key is never fatal.
pub fn validate(page: Page, bundle: &MetricBundle) -> Result<(), DeriveError> {
    for key in required_keys(page) {
        if !bundle.kpis.contains_key(*key) {
            return Err(DeriveError::MissingMetric((*key).to_string()));
        }
    }
    Ok(())
}
