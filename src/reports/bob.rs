//! BOB Performance Report
//!
//! Monthly split between BOB (orders placed by the customer-service team
//! on behalf of buyers) and self-serve orders, plus the qualitative review
//! from the `BOB_review` sheet.

use serde::Serialize;

use super::{ChartData, ChartSeries};
use crate::format::{format_number, format_percent, parse_number, parse_review_text};
use crate::sheets::{fetch_or_empty, Sheet, SheetSource};

pub const SHEET: &str = "BOB";
pub const REVIEW_SHEET: &str = "BOB_review";

/// Review sections as `(key, question)` in display order
pub const REVIEW_SECTIONS: [(&str, &str); 5] = [
    ("worked", "What Worked?"),
    ("scale", "What needs to scale?"),
    ("not_work", "What did not work?"),
    ("lesson", "What is the lesson learned?"),
    ("next_goal", "What is the next goal for BOB?"),
];

/// Canonical BOB column for a lowercase, trimmed header alias
fn bob_column(alias: &str) -> Option<&'static str> {
    match alias {
        "months" | "month" => Some("Months"),
        "bob order" | "bob" | "boborder" => Some("BOB Order"),
        "self order" | "self" => Some("Self Order"),
        "grand total" | "total" => Some("Grand Total"),
        "cs%" | "cs %" | "cs percentage" => Some("CS%"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BobRow {
    pub month: String,
    pub bob_order: String,
    pub self_order: String,
    pub grand_total: String,
    pub cs_percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BobSummary {
    pub total_bob: String,
    pub total_self: String,
    pub total_grand: String,
    pub avg_cs: String,
    pub best_month: String,
    pub best_month_value: String,
}

/// Answers of one review row, one list per section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewEntry {
    pub worked: Vec<String>,
    pub scale: Vec<String>,
    pub not_work: Vec<String>,
    pub lesson: Vec<String>,
    pub next_goal: Vec<String>,
}

impl ReviewEntry {
    /// Lines for a section key
    pub fn section(&self, key: &str) -> &[String] {
        match key {
            "worked" => &self.worked,
            "scale" => &self.scale,
            "not_work" => &self.not_work,
            "lesson" => &self.lesson,
            "next_goal" => &self.next_goal,
            _ => &[],
        }
    }

    fn section_mut(&mut self, key: &str) -> Option<&mut Vec<String>> {
        match key {
            "worked" => Some(&mut self.worked),
            "scale" => Some(&mut self.scale),
            "not_work" => Some(&mut self.not_work),
            "lesson" => Some(&mut self.lesson),
            "next_goal" => Some(&mut self.next_goal),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        REVIEW_SECTIONS.iter().all(|(key, _)| self.section(key).is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BobReport {
    pub title: String,
    pub description: String,
    pub rows: Vec<BobRow>,
    pub reviews: Vec<ReviewEntry>,
    pub summary: BobSummary,
    pub chart: ChartData,
}

/// CS share as a ratio, whichever way it was typed
fn cs_ratio(value: f64) -> f64 {
    if value.abs() <= 1.0 {
        value
    } else {
        value / 100.0
    }
}

/// Parse the review sheet; rows without any answer are skipped
pub fn reviews_from_sheet(mut sheet: Sheet) -> Vec<ReviewEntry> {
    sheet.trim_headers();

    let section_for_column: Vec<Option<&'static str>> = sheet
        .headers
        .iter()
        .map(|h| {
            let normalized = h.trim().to_lowercase();
            REVIEW_SECTIONS
                .iter()
                .find(|(_, question)| question.to_lowercase() == normalized)
                .map(|(key, _)| *key)
        })
        .collect();

    sheet
        .rows
        .iter()
        .filter_map(|row| {
            let mut entry = ReviewEntry::default();
            for (idx, section) in section_for_column.iter().enumerate() {
                let (Some(key), Some(cell)) = (section, row.get(idx)) else {
                    continue;
                };
                if let Some(lines) = entry.section_mut(key) {
                    *lines = parse_review_text(cell);
                }
            }
            (!entry.is_empty()).then_some(entry)
        })
        .collect()
}

pub fn from_sheets(mut bob: Sheet, review: Sheet) -> BobReport {
    bob.trim_headers();
    bob.rename_columns(|h| bob_column(&h.trim().to_lowercase()).map(String::from));

    let mut rows = Vec::with_capacity(bob.len());
    let mut chart_months = Vec::new();
    let mut chart_bob = Vec::new();
    let mut chart_self = Vec::new();
    let mut chart_cs = Vec::new();

    let mut total_bob = 0.0;
    let mut total_self = 0.0;
    let mut total_grand = 0.0;
    let mut cs_ratios = Vec::new();
    let mut best_month = ("-".to_string(), 0.0);

    for i in 0..bob.len() {
        let month = bob.cell(i, "Months").trim().to_string();
        let bob_val = parse_number(bob.cell(i, "BOB Order")).unwrap_or(0.0);
        let self_val = parse_number(bob.cell(i, "Self Order")).unwrap_or(0.0);
        let grand_val = parse_number(bob.cell(i, "Grand Total")).unwrap_or(0.0);
        let cs_val = parse_number(bob.cell(i, "CS%"));

        rows.push(BobRow {
            month: month.clone(),
            bob_order: format_number(bob_val),
            self_order: format_number(self_val),
            grand_total: format_number(grand_val),
            cs_percent: format_percent(cs_val),
        });

        chart_cs.push(match cs_val {
            Some(v) if v.abs() <= 1.0 => v * 100.0,
            Some(v) => v,
            None => 0.0,
        });
        chart_months.push(month.clone());
        chart_bob.push(bob_val);
        chart_self.push(self_val);

        total_bob += bob_val;
        total_self += self_val;
        total_grand += grand_val;
        if let Some(v) = cs_val {
            cs_ratios.push(cs_ratio(v));
        }

        if grand_val > best_month.1 {
            best_month = (month, grand_val);
        }
    }

    let avg_cs = (!cs_ratios.is_empty())
        .then(|| cs_ratios.iter().sum::<f64>() / cs_ratios.len() as f64);

    let summary = BobSummary {
        total_bob: format_number(total_bob),
        total_self: format_number(total_self),
        total_grand: format_number(total_grand),
        avg_cs: format_percent(avg_cs),
        best_month: best_month.0,
        best_month_value: format_number(best_month.1),
    };

    let chart = ChartData {
        title: "BOB vs self orders".to_string(),
        labels: chart_months,
        series: vec![
            ChartSeries::bar("BOB Order", chart_bob),
            ChartSeries::bar("Self Order", chart_self),
            ChartSeries::line("CS%", chart_cs).on_secondary_axis(),
        ],
        stacked: true,
    };

    BobReport {
        title: "BOB Performance".to_string(),
        description: "Monthly BOB volume split with qualitative learnings".to_string(),
        rows,
        reviews: reviews_from_sheet(review),
        summary,
        chart,
    }
}

pub async fn build(source: &dyn SheetSource) -> BobReport {
    let bob = fetch_or_empty(source, SHEET).await;
    let review = fetch_or_empty(source, REVIEW_SHEET).await;
    from_sheets(bob, review)
}
