//! E-commerce Reports
//!
//! - `2026 Ecom Target`: the target plan table plus a free-text insight
//! - `ecom 2024 vs 2025`: monthly year-over-year comparison

use serde::Serialize;

use super::{ChartData, ChartSeries};
use crate::format::{display_cell, fmt_grouped, has_digit_run, is_blank, parse_number, DASH};
use crate::sheets::{fetch_or_empty, Record, Sheet, SheetSource};

pub const TARGET_SHEET: &str = "2026 Ecom Target";
pub const COMPARISON_SHEET: &str = "ecom 2024 vs 2025";

/// Columns whose names contain one of these hold money amounts
const MONEY_KEYWORDS: [&str; 5] = ["amount", "target", "sales", "moonshot", "fulfillment"];

/// Minimum length of a trailing free-text row taken as the insight
const INSIGHT_MIN_CHARS: usize = 40;

/// 2026 target plan
#[derive(Debug, Clone, Serialize)]
pub struct EcomTargetReport {
    pub title: String,
    pub description: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub insight: String,
}

impl Default for EcomTargetReport {
    fn default() -> Self {
        Self {
            title: "E-commerce Performance".to_string(),
            description: "2026 target plan across the funnel.".to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            insight: String::new(),
        }
    }
}

fn is_money_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    MONEY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Find the insight text of the target sheet.
///
/// A row labelled "insight" in the first column wins; otherwise the last
/// row reading like prose (long, no 3+ digit numbers) is used.
fn extract_insight(sheet: &Sheet) -> String {
    let Some(first_col) = sheet.headers.first() else {
        return String::new();
    };

    let labelled = (0..sheet.len()).find(|&i| {
        sheet
            .cell(i, first_col)
            .trim()
            .to_lowercase()
            .contains("insight")
    });

    if let Some(row) = labelled {
        let parts: Vec<&str> = sheet.headers[1..]
            .iter()
            .map(|c| sheet.cell(row, c).trim())
            .filter(|v| !is_blank(v))
            .collect();
        return parts.join(" ").trim().to_string();
    }

    for row in sheet.rows.iter().rev() {
        let values: Vec<&str> = row
            .iter()
            .map(|v| v.trim())
            .filter(|v| !is_blank(v))
            .collect();
        let joined = values.join(" ");
        if joined.chars().count() > INSIGHT_MIN_CHARS && !has_digit_run(&joined, 3) {
            return joined.trim().to_string();
        }
    }

    String::new()
}

/// Build the target report from an already loaded sheet
pub fn target_from_sheet(mut sheet: Sheet) -> EcomTargetReport {
    let mut report = EcomTargetReport::default();
    if sheet.is_empty() {
        return report;
    }

    sheet.normalize_headers();
    report.insight = extract_insight(&sheet);

    report.rows = sheet
        .records()
        .into_iter()
        .map(|record| {
            Record::from_pairs(record.iter().map(|(column, value)| {
                let shown = if is_money_column(column) {
                    parse_number(value)
                        .map(|n| fmt_grouped(n, 2))
                        .unwrap_or_default()
                } else {
                    display_cell(value)
                };
                (column.to_string(), shown)
            }))
        })
        .collect();
    report.columns = sheet.headers;

    report
}

/// Load and build the 2026 target report
pub async fn build_target(source: &dyn SheetSource) -> EcomTargetReport {
    target_from_sheet(fetch_or_empty(source, TARGET_SHEET).await)
}

/// One month of the year-over-year comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub month: String,
    pub value_2024: f64,
    pub value_2025: f64,
    pub fmt_2024: String,
    pub fmt_2025: String,
    pub delta: f64,
    pub delta_fmt: String,
    /// `None` when 2024 is zero
    pub delta_pct: Option<f64>,
    pub delta_pct_fmt: String,
}

/// Totals and extremes of the comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub total_2024: String,
    pub total_2025: String,
    pub avg_2024: String,
    pub avg_2025: String,
    pub max_month: String,
    pub max_value: String,
    pub min_month: String,
    pub min_value: String,
}

/// 2024 vs 2025 comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub title: String,
    pub description: String,
    pub rows: Vec<ComparisonRow>,
    pub summary: ComparisonSummary,
    pub chart: ChartData,
}

/// Month excluded when picking the weakest month (seasonal close-out)
fn is_december(month: &str) -> bool {
    matches!(month.to_lowercase().as_str(), "dec" | "december")
}

/// Build the comparison report from an already loaded sheet
pub fn comparison_from_sheet(mut sheet: Sheet) -> ComparisonReport {
    sheet.trim_headers();
    let sheet = sheet.select(&["Months", "2024", "2025"]);

    let mut rows = Vec::with_capacity(sheet.len());
    let mut total_2024 = 0.0;
    let mut total_2025 = 0.0;

    for i in 0..sheet.len() {
        let month = sheet.cell(i, "Months").trim().to_string();
        let value_2024 = parse_number(sheet.cell(i, "2024")).unwrap_or(0.0);
        let value_2025 = parse_number(sheet.cell(i, "2025")).unwrap_or(0.0);
        let delta = value_2025 - value_2024;
        let delta_pct = (value_2024 != 0.0).then(|| delta / value_2024 * 100.0);

        rows.push(ComparisonRow {
            month,
            value_2024,
            value_2025,
            fmt_2024: fmt_grouped(value_2024, 0),
            fmt_2025: fmt_grouped(value_2025, 0),
            delta,
            delta_fmt: fmt_grouped(delta, 0),
            delta_pct,
            delta_pct_fmt: delta_pct
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| DASH.to_string()),
        });
        total_2024 += value_2024;
        total_2025 += value_2025;
    }

    let max_row = rows.iter().fold(None::<&ComparisonRow>, |best, row| match best {
        Some(b) if b.value_2025 >= row.value_2025 => Some(b),
        _ => Some(row),
    });

    let eligible: Vec<&ComparisonRow> = rows.iter().filter(|r| !is_december(&r.month)).collect();
    let min_pool: Vec<&ComparisonRow> = if eligible.is_empty() {
        rows.iter().collect()
    } else {
        eligible
    };
    let min_row = min_pool.into_iter().fold(None::<&ComparisonRow>, |best, row| match best {
        Some(b) if b.value_2025 <= row.value_2025 => Some(b),
        _ => Some(row),
    });

    let count = rows.len().max(1) as f64;
    let summary = ComparisonSummary {
        total_2024: fmt_grouped(total_2024, 0),
        total_2025: fmt_grouped(total_2025, 0),
        avg_2024: fmt_grouped(total_2024 / count, 0),
        avg_2025: fmt_grouped(total_2025 / count, 0),
        max_month: max_row.map(|r| r.month.clone()).unwrap_or_else(|| "-".to_string()),
        max_value: max_row
            .map(|r| fmt_grouped(r.value_2025, 0))
            .unwrap_or_else(|| "0".to_string()),
        min_month: min_row.map(|r| r.month.clone()).unwrap_or_else(|| "-".to_string()),
        min_value: min_row
            .map(|r| fmt_grouped(r.value_2025, 0))
            .unwrap_or_else(|| "0".to_string()),
    };

    let chart = ChartData {
        title: "Monthly sales, 2024 vs 2025".to_string(),
        labels: rows.iter().map(|r| r.month.clone()).collect(),
        series: vec![
            ChartSeries::bar("2024", rows.iter().map(|r| r.value_2024).collect()),
            ChartSeries::bar("2025", rows.iter().map(|r| r.value_2025).collect()),
        ],
        stacked: false,
    };

    ComparisonReport {
        title: "E-commerce Performance".to_string(),
        description: "2024 vs 2025 performance snapshot.".to_string(),
        rows,
        summary,
        chart,
    }
}

/// Load and build the 2024 vs 2025 comparison
pub async fn build_comparison(source: &dyn SheetSource) -> ComparisonReport {
    comparison_from_sheet(fetch_or_empty(source, COMPARISON_SHEET).await)
}
