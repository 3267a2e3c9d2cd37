//! FNA Performance Report
//!
//! KPI table from the `fna_performance` sheet. Cells are typed with LaTeX
//! math markup, which is stripped for display. Each KPI category gets a
//! colour from a fixed palette, assigned in first-seen order.

use serde::Serialize;

use super::{tally, Tally};
use crate::format::clean_latex_math;
use crate::sheets::{fetch_or_empty, Record, Sheet, SheetSource};

pub const SHEET: &str = "fna_performance";

const CATEGORY_COLUMN: &str = "KPI Category";
const DEFAULT_CATEGORY: &str = "General";

pub const PALETTE: [&str; 6] = ["#1976d2", "#ef6c00", "#2e7d32", "#6a1b9a", "#00838f", "#c62828"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMeta {
    pub category: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FnaReport {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub categories: Vec<CategoryMeta>,
}

impl FnaReport {
    /// Colour assigned to a category
    pub fn color_for(&self, category: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.color.as_str())
            .unwrap_or(PALETTE[0])
    }
}

/// Category of a row, defaulting to "General"
pub fn category_of(record: &Record) -> &str {
    match record.value(CATEGORY_COLUMN).trim() {
        "" => DEFAULT_CATEGORY,
        c => c,
    }
}

pub fn from_sheet(mut sheet: Sheet) -> FnaReport {
    for header in &mut sheet.headers {
        *header = header.replace('\u{a0}', " ").trim().to_string();
    }
    sheet.map_cells(clean_latex_math);

    let rows = sheet.records();
    let mut counts: Vec<Tally> = Vec::new();
    for row in &rows {
        tally(&mut counts, category_of(row));
    }

    let categories = counts
        .into_iter()
        .enumerate()
        .map(|(idx, t)| CategoryMeta {
            category: t.label,
            color: PALETTE[idx % PALETTE.len()].to_string(),
            count: t.count,
        })
        .collect();

    FnaReport {
        title: "FNA Performance".to_string(),
        columns: sheet.headers,
        rows,
        categories,
    }
}

pub async fn build(source: &dyn SheetSource) -> FnaReport {
    from_sheet(fetch_or_empty(source, SHEET).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_cleaned_and_categories_coloured() {
        let sheet = Sheet::from_rows(
            SHEET,
            &["KPI\u{a0}Category ", "KPI", "Result"],
            &[
                &["Finance", "Gross margin", "$\\mathbf{32\\%}$"],
                &["Ops", "Fill rate", "90 \\rightarrow 95"],
                &["Finance", "Opex", "12"],
                &["", "Misc", ""],
            ],
        );

        let report = from_sheet(sheet);
        assert_eq!(report.columns[0], "KPI Category");
        assert_eq!(report.rows[0].value("Result"), "32\\%");
        assert_eq!(report.rows[1].value("Result"), "90 → 95");

        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories[0].count, 2);
        assert_eq!(report.categories[1].color, "#ef6c00");
        assert_eq!(report.categories[2].category, "General");
        assert_eq!(report.color_for("Ops"), "#ef6c00");
    }
}
