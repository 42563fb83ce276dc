use contracts::metrics::{ChartSeries, MetricBundle, MetricValue, Page};
use std::collections::BTreeMap;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn kpis(entries: &[(&str, f64)]) -> BTreeMap<String, MetricValue> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), MetricValue::Number(*v)))
        .collect()
}

fn series(labels: &[&str], data: &[f64]) -> ChartSeries {
    ChartSeries::new(labels.iter().map(|l| l.to_string()).collect(), data.to_vec())
}

/// Static substitute payload for one page, used whenever the live
/// source is unavailable and no last-known-good bundle exists. The page
/// never surfaces a fetch failure as an error state; it renders these
/// figures instead.
pub fn bundle(page: Page) -> MetricBundle {
    match page {
        Page::Dashboard => MetricBundle {
            kpis: kpis(&[
                ("total_sales", 75000.0),
                ("total_orders", 750.0),
                ("total_customers", 350.0),
                ("average_order_value", 200.0),
                ("conversion_rate", 3.5),
                ("revenue_growth", 5.2),
            ]),
            charts: BTreeMap::from([
                (
                    "monthly_sales".to_string(),
                    series(
                        &MONTHS,
                        &[
                            12000.0, 15000.0, 10000.0, 18000.0, 14000.0, 16000.0, 17000.0,
                            19000.0, 16000.0, 20000.0, 22000.0, 18000.0,
                        ],
                    ),
                ),
                (
                    "daily_sales".to_string(),
                    series(&WEEKDAYS, &[250.0, 300.0, 280.0, 320.0, 350.0, 400.0, 380.0]),
                ),
            ]),
        },
        Page::Inventory => MetricBundle {
            kpis: kpis(&[
                ("total_items", 3500.0),
                ("low_stock_items", 25.0),
                ("out_of_stock", 12.0),
                ("inventory_value", 125000.0),
                ("inventory_turnover", 5.2),
                ("average_days_in_inventory", 35.0),
            ]),
            charts: BTreeMap::from([(
                "inventory_by_category".to_string(),
                series(
                    &["Electronics", "Clothing", "Food", "Furniture", "Books"],
                    &[350.0, 420.0, 180.0, 250.0, 300.0],
                ),
            )]),
        },
        Page::Sales => MetricBundle {
            kpis: kpis(&[
                ("total_revenue", 250000.0),
                ("total_profit", 75000.0),
                ("profit_margin", 30.0),
                ("average_order_value", 200.0),
                ("return_rate", 2.5),
                ("customer_lifetime_value", 1200.0),
            ]),
            charts: BTreeMap::from([(
                "monthly_revenue".to_string(),
                series(
                    &MONTHS,
                    &[
                        15000.0, 18000.0, 16000.0, 19000.0, 22000.0, 25000.0, 28000.0, 30000.0,
                        27000.0, 32000.0, 35000.0, 33000.0,
                    ],
                ),
            )]),
        },
        Page::Purchase => MetricBundle {
            kpis: kpis(&[
                ("total_purchase_value", 120000.0),
                ("total_orders", 250.0),
                ("average_order_value", 1200.0),
                ("pending_orders", 15.0),
                ("supplier_count", 25.0),
                ("on_time_delivery_rate", 92.5),
            ]),
            charts: BTreeMap::from([(
                "purchase_by_supplier".to_string(),
                series(
                    &["Supplier A", "Supplier B", "Supplier C", "Supplier D"],
                    &[5000.0, 8000.0, 4000.0, 6000.0],
                ),
            )]),
        },
        Page::Reports => MetricBundle {
            kpis: kpis(&[
                ("revenue_growth", 8.5),
                ("profit_growth", 7.2),
                ("customer_growth", 5.8),
                ("average_order_growth", 3.2),
                ("inventory_turnover_change", 1.5),
                ("return_rate_change", -0.8),
            ]),
            charts: BTreeMap::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metrics::validate;

    #[test]
    fn every_fallback_bundle_is_well_formed() {
        for page in Page::ALL {
            let bundle = bundle(page);
            assert!(
                validate(page, &bundle).is_ok(),
                "fallback bundle for {page} failed validation"
            );
        }
    }

    #[test]
    fn fallback_chart_axes_are_consistent() {
        for page in Page::ALL {
            for (name, chart) in bundle(page).charts {
                assert_eq!(
                    chart.labels.len(),
                    chart.data.len(),
                    "{page}/{name} labels and data lengths differ"
                );
            }
        }
    }
}
