use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Page identity
// ---------------------------------------------------------------------------

/// One dashboard page / metric domain. Each page has its own metric
/// bundle endpoint and its own column in the visibility policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Dashboard,
    Inventory,
    Sales,
    Purchase,
    Reports,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Inventory,
        Page::Sales,
        Page::Purchase,
        Page::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Inventory => "inventory",
            Page::Sales => "sales",
            Page::Purchase => "purchase",
            Page::Reports => "reports",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Raw metric bundle (wire shape of the upstream API)
// ---------------------------------------------------------------------------

/// A single KPI value. The upstream API mixes numbers and strings in
/// one `kpis` object, hence the untagged representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

/// An ordered (label, value) series driving one category or time-series
/// chart. Kept as parallel vectors to match the upstream JSON
/// (`{"labels": [...], "data": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, data: Vec<f64>) -> Self {
        Self { labels, data }
    }
}

/// Raw metric payload for one page, as fetched from the upstream API or
/// produced by the fallback generator. Read-only once produced: the
/// derivation engine never mutates a bundle in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    pub kpis: BTreeMap<String, MetricValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub charts: BTreeMap<String, ChartSeries>,
}

impl MetricBundle {
    /// Numeric KPI lookup. `None` when the key is absent or the value
    /// is not a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.kpis.get(key).and_then(MetricValue::as_number)
    }
}

// ---------------------------------------------------------------------------
// Multi-series trend charts
// ---------------------------------------------------------------------------

/// One named series in a trend chart. `key` is the metric identifier
/// the visibility policy is consulted with when the chart is filtered
/// per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub key: String,
    pub label: String,
    pub data: Vec<f64>,
}

/// A chart with several named series over a shared label axis
/// (e.g. the reports growth-trend chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub labels: Vec<String>,
    pub series: Vec<TrendSeries>,
}
