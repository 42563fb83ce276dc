use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::{ChartSeries, MetricValue, Page, TrendChart};

/// One row of the reports "Top Performing Products" table. The profit
/// columns are omitted from the payload entirely (not nulled) when the
/// requesting role may not see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProductRow {
    pub name: String,
    pub sales: i64,
    pub revenue: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
}

/// The shaped view-model for one page, ready for presentation.
///
/// Confidentiality contract: every KPI, chart series and table column in
/// this structure has already passed the visibility policy for the
/// requesting role. Excluded fields are never serialized, so a client
/// cannot recover them by inspecting the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub page: Page,
    pub kpis: BTreeMap<String, MetricValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub charts: BTreeMap<String, ChartSeries>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub trends: BTreeMap<String, TrendChart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_products: Option<Vec<TopProductRow>>,
    /// Non-fatal data problems surfaced to the user (e.g. inconsistent
    /// stock counts). The page still renders with best-available data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PageView {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            kpis: BTreeMap::new(),
            charts: BTreeMap::new(),
            trends: BTreeMap::new(),
            top_products: None,
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_profit_columns_are_not_serialized() {
        let row = TopProductRow {
            name: "Product A".into(),
            sales: 1250,
            revenue: 25000.0,
            profit: None,
            profit_margin: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("profit"));
    }

    #[test]
    fn empty_sections_are_not_serialized() {
        let view = PageView::new(Page::Reports);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("charts"));
        assert!(!json.contains("top_products"));
        assert!(!json.contains("warnings"));
    }
}
