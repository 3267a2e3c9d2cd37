//! SWOT Report
//!
//! Rows of the `swot` sheet grouped by category. Rows in the
//! `Key Insight` category are pulled out into a separate list.

use serde::Serialize;

use super::{push_grouped, Group};
use crate::sheets::{fetch_or_empty, Sheet, SheetSource};

pub const SHEET: &str = "swot";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwotPoint {
    pub id: String,
    pub title: String,
    pub details_2025: String,
    pub details_2026: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyInsight {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwotReport {
    pub title: String,
    pub sections: Vec<Group<SwotPoint>>,
    pub key_insights: Vec<KeyInsight>,
}

impl Default for SwotReport {
    fn default() -> Self {
        Self {
            title: "SWOT Analysis".to_string(),
            sections: Vec::new(),
            key_insights: Vec::new(),
        }
    }
}

pub fn from_sheet(mut sheet: Sheet) -> SwotReport {
    let mut report = SwotReport::default();
    sheet.trim_headers();

    for record in sheet.records() {
        let category = record.value("Category").trim();
        if category.is_empty() {
            continue;
        }

        let point_id = record.value("Point_ID");
        let key_item = record.first_of(&["Key_Item", "Key Item"]);
        let insight_2025 = record.first_of(&["2025", "2025 Insight"]);
        let strategy_2026 = record.first_of(&["2026", "2026 Strategy"]);

        if category.eq_ignore_ascii_case("key insight") {
            let content = [insight_2025, strategy_2026, point_id]
                .into_iter()
                .find(|v| !v.is_empty())
                .unwrap_or("");
            report.key_insights.push(KeyInsight {
                title: key_item.to_string(),
                content: content.to_string(),
            });
            continue;
        }

        push_grouped(
            &mut report.sections,
            category,
            SwotPoint {
                id: point_id.to_string(),
                title: key_item.to_string(),
                details_2025: insight_2025.to_string(),
                details_2026: strategy_2026.to_string(),
            },
        );
    }

    report
}

pub async fn build(source: &dyn SheetSource) -> SwotReport {
    from_sheet(fetch_or_empty(source, SHEET).await)
}
