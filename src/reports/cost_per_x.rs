//! Cost per X Report
//!
//! Unit-cost analysis table. Headers in the `Cost per X` sheet are free
//! text, so probable headers are mapped to the four canonical columns.

use serde::Serialize;

use crate::format::{display_cell, normalize_newlines};
use crate::sheets::{fetch_or_empty, Sheet, SheetSource};

pub const SHEET: &str = "Cost per X";

const COST: &str = "Cost per X";
const FACTS: &str = "Facts";
const WHY: &str = "Why?";
const IMPROVE: &str = "What to Improve More?";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRow {
    pub cost_per_x: String,
    pub facts: String,
    pub why: String,
    pub improve: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostPerXReport {
    pub title: String,
    pub rows: Vec<CostRow>,
}

/// Canonical name for a probable header
fn canonical_header(header: &str) -> Option<String> {
    let lower = header.to_lowercase();
    let name = if lower.contains("cost per x") {
        COST
    } else if lower.starts_with("facts") {
        FACTS
    } else if lower.starts_with("why") {
        WHY
    } else if lower.contains("improve") {
        IMPROVE
    } else {
        return None;
    };
    Some(name.to_string())
}

pub fn from_sheet(mut sheet: Sheet) -> CostPerXReport {
    let mut report = CostPerXReport {
        title: "Cost per X".to_string(),
        rows: Vec::new(),
    };
    if sheet.is_empty() {
        return report;
    }

    sheet.normalize_headers();
    sheet.rename_columns(canonical_header);
    for column in [COST, FACTS, WHY, IMPROVE] {
        sheet.ensure_column(column);
    }

    report.rows = sheet
        .records()
        .iter()
        .map(|record| CostRow {
            cost_per_x: display_cell(record.value(COST)),
            facts: normalize_newlines(&display_cell(record.value(FACTS))),
            why: normalize_newlines(&display_cell(record.value(WHY))),
            improve: normalize_newlines(&display_cell(record.value(IMPROVE))),
        })
        .collect();

    report
}

pub async fn build(source: &dyn SheetSource) -> CostPerXReport {
    from_sheet(fetch_or_empty(source, SHEET).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_mapped_to_canonical_columns() {
        let sheet = Sheet::from_rows(
            SHEET,
            &["Cost per X\u{a0}(THB)", "Facts & figures", "Why it matters", "Improve next"],
            &[&["Cost per order", "42 THB\r\nup 5%", "Courier fees", "Batch pickups\rZone rates"]],
        );

        let report = from_sheet(sheet);
        assert_eq!(
            report.rows,
            vec![CostRow {
                cost_per_x: "Cost per order".into(),
                facts: "42 THB\nup 5%".into(),
                why: "Courier fees".into(),
                improve: "Batch pickups\nZone rates".into(),
            }]
        );
    }

    #[test]
    fn test_missing_columns_are_blank() {
        let sheet = Sheet::from_rows(SHEET, &["Cost per X"], &[&["Cost per click"]]);
        let report = from_sheet(sheet);
        assert_eq!(report.rows[0].why, "");
        assert_eq!(report.rows[0].improve, "");
    }
}
