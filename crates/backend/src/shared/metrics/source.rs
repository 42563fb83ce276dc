use async_trait::async_trait;
use chrono::{Duration, Utc};
use contracts::metrics::{ChartSeries, MetricBundle, MetricValue, Page};
use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::shared::config::{self, UpstreamConfig};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where raw metric bundles come from. The page controllers only ever
/// see this trait; whether the numbers arrive over HTTP or from the
/// built-in generator is a config concern.
#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn fetch(&self, page: Page) -> Result<MetricBundle, FetchError>;
}

static SOURCE: Lazy<Box<dyn MetricSource>> = Lazy::new(|| match &config::get().upstream {
    Some(upstream) => {
        tracing::info!("metric source: upstream API at {}", upstream.base_url);
        Box::new(UpstreamSource::new(upstream))
    }
    None => {
        tracing::info!("metric source: built-in demo generator");
        Box::new(DemoSource)
    }
});

/// The configured metric source (upstream API when `[upstream]` is
/// present in config, demo generator otherwise).
pub fn source() -> &'static dyn MetricSource {
    SOURCE.as_ref()
}

// ---------------------------------------------------------------------------
// Upstream HTTP source
// ---------------------------------------------------------------------------

pub struct UpstreamSource {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamSource {
    pub fn new(cfg: &UpstreamConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MetricSource for UpstreamSource {
    async fn fetch(&self, page: Page) -> Result<MetricBundle, FetchError> {
        let url = format!("{}/api/{}", self.base_url, page);
        let bundle = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<MetricBundle>()
            .await?;
        Ok(bundle)
    }
}

// ---------------------------------------------------------------------------
// Built-in demo generator
// ---------------------------------------------------------------------------

/// Randomized per-page bundles with realistic ranges, for running the
/// service without an upstream. Never fails.
pub struct DemoSource;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Food", "Furniture", "Books"];

const SUPPLIERS: [&str; 4] = ["Supplier A", "Supplier B", "Supplier C", "Supplier D"];

fn int(rng: &mut impl Rng, lo: i64, hi: i64) -> f64 {
    rng.gen_range(lo..=hi) as f64
}

fn float2(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    (rng.gen_range(lo..hi) * 100.0).round() / 100.0
}

fn int_series(rng: &mut impl Rng, labels: &[&str], lo: i64, hi: i64) -> ChartSeries {
    ChartSeries::new(
        labels.iter().map(|l| l.to_string()).collect(),
        labels.iter().map(|_| int(rng, lo, hi)).collect(),
    )
}

/// Weekday labels for the trailing seven days, oldest first.
fn daily_labels() -> Vec<String> {
    let today = Utc::now().date_naive();
    (0..7)
        .rev()
        .map(|i| (today - Duration::days(i)).format("%a").to_string())
        .collect()
}

fn kpis(entries: Vec<(&str, f64)>) -> BTreeMap<String, MetricValue> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), MetricValue::Number(v)))
        .collect()
}

#[async_trait]
impl MetricSource for DemoSource {
    async fn fetch(&self, page: Page) -> Result<MetricBundle, FetchError> {
        let mut rng = rand::thread_rng();
        let rng = &mut rng;

        let bundle = match page {
            Page::Dashboard => MetricBundle {
                kpis: kpis(vec![
                    ("total_sales", int(rng, 50000, 100000)),
                    ("total_orders", int(rng, 500, 1000)),
                    ("total_customers", int(rng, 200, 500)),
                    ("average_order_value", int(rng, 100, 300)),
                    ("conversion_rate", float2(rng, 2.0, 5.0)),
                    ("revenue_growth", float2(rng, -2.0, 8.0)),
                ]),
                charts: BTreeMap::from([
                    (
                        "monthly_sales".to_string(),
                        int_series(rng, &MONTHS, 5000, 20000),
                    ),
                    (
                        "daily_sales".to_string(),
                        ChartSeries::new(
                            daily_labels(),
                            (0..7).map(|_| int(rng, 100, 500)).collect(),
                        ),
                    ),
                ]),
            },
            Page::Inventory => MetricBundle {
                kpis: kpis(vec![
                    ("total_items", int(rng, 1000, 5000)),
                    ("low_stock_items", int(rng, 10, 50)),
                    ("out_of_stock", int(rng, 5, 20)),
                    ("inventory_value", int(rng, 50000, 200000)),
                    ("inventory_turnover", float2(rng, 2.0, 8.0)),
                    ("average_days_in_inventory", int(rng, 15, 60)),
                ]),
                charts: BTreeMap::from([(
                    "inventory_by_category".to_string(),
                    int_series(rng, &CATEGORIES, 100, 500),
                )]),
            },
            Page::Sales => MetricBundle {
                kpis: kpis(vec![
                    ("total_revenue", int(rng, 100000, 500000)),
                    ("total_profit", int(rng, 30000, 150000)),
                    ("profit_margin", float2(rng, 15.0, 35.0)),
                    ("average_order_value", int(rng, 100, 300)),
                    ("return_rate", float2(rng, 1.0, 5.0)),
                    ("customer_lifetime_value", int(rng, 500, 2000)),
                ]),
                charts: BTreeMap::from([(
                    "monthly_revenue".to_string(),
                    int_series(rng, &MONTHS, 5000, 20000),
                )]),
            },
            Page::Purchase => MetricBundle {
                kpis: kpis(vec![
                    ("total_purchase_value", int(rng, 50000, 200000)),
                    ("total_orders", int(rng, 100, 500)),
                    ("average_order_value", int(rng, 500, 2000)),
                    ("pending_orders", int(rng, 5, 30)),
                    ("supplier_count", int(rng, 10, 50)),
                    ("on_time_delivery_rate", float2(rng, 80.0, 98.0)),
                ]),
                charts: BTreeMap::from([(
                    "purchase_by_supplier".to_string(),
                    int_series(rng, &SUPPLIERS, 2000, 10000),
                )]),
            },
            Page::Reports => MetricBundle {
                kpis: kpis(vec![
                    ("revenue_growth", float2(rng, 5.0, 15.0)),
                    ("profit_growth", float2(rng, 3.0, 12.0)),
                    ("customer_growth", float2(rng, 2.0, 10.0)),
                    ("average_order_growth", float2(rng, -1.0, 8.0)),
                    ("inventory_turnover_change", float2(rng, -2.0, 5.0)),
                    ("return_rate_change", float2(rng, -3.0, 1.0)),
                ]),
                charts: BTreeMap::new(),
            },
        };

        Ok(bundle)
    }
}
