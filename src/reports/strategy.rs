//! Strategy Plan Report
//!
//! Actions of the `2026 Strategy plan` sheet grouped by strategy pillar.
//! The Goal column is only filled on the first row of each goal block, so
//! the current goal carries forward to the rows below it.

use serde::Serialize;

use super::{push_grouped, Group};
use crate::format::{display_cell, is_blank};
use crate::sheets::{fetch_or_empty, Sheet, SheetSource};

pub const SHEET: &str = "2026 Strategy plan";

const DEFAULT_GOAL: &str = "2026 Strategy Plan";
const DEFAULT_PILLAR: &str = "General";
const PHOTO_COLUMNS: [&str; 3] = ["Photo_URL 1", "Photo_URL 2", "Photo_URL 3"];
const REQUIRED_COLUMNS: [&str; 8] = [
    "Goal",
    "Strategy Pillar",
    "Phase",
    "Quarter",
    "Action",
    "Photo_URL 1",
    "Photo_URL 2",
    "Photo_URL 3",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyEntry {
    pub goal: String,
    pub phase: String,
    pub quarter: String,
    pub action: String,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub title: String,
    pub goal_text: String,
    pub pillars: Vec<Group<StrategyEntry>>,
}

impl Default for StrategyReport {
    fn default() -> Self {
        Self {
            title: DEFAULT_GOAL.to_string(),
            goal_text: DEFAULT_GOAL.to_string(),
            pillars: Vec::new(),
        }
    }
}

pub fn from_sheet(mut sheet: Sheet) -> StrategyReport {
    let mut report = StrategyReport::default();
    if sheet.is_empty() {
        return report;
    }

    sheet.trim_headers();
    for column in REQUIRED_COLUMNS {
        sheet.ensure_column(column);
    }

    let mut current_goal = String::new();
    for record in sheet.records() {
        let goal = record.value("Goal").trim();
        if !is_blank(goal) {
            current_goal = goal.to_string();
        }

        let pillar = match record.value("Strategy Pillar").trim() {
            p if is_blank(p) => DEFAULT_PILLAR,
            p => p,
        };

        let entry = StrategyEntry {
            goal: current_goal.clone(),
            phase: display_cell(record.value("Phase")),
            quarter: display_cell(record.value("Quarter")),
            action: display_cell(record.value("Action")),
            photos: PHOTO_COLUMNS
                .iter()
                .map(|c| record.value(c).trim())
                .filter(|url| !is_blank(url))
                .map(String::from)
                .collect(),
        };
        push_grouped(&mut report.pillars, pillar, entry);
    }

    if !current_goal.is_empty() {
        report.goal_text = current_goal;
    }
    report
}

pub async fn build(source: &dyn SheetSource) -> StrategyReport {
    from_sheet(fetch_or_empty(source, SHEET).await)
}
