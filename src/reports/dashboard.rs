//! Dashboard Report
//!
//! The home page: summary cards for the two e-commerce reports plus the
//! strategy plan and roadmap.

use serde::Serialize;

use super::ecom::{ComparisonReport, EcomTargetReport};
use super::roadmap::RoadmapReport;
use super::strategy::StrategyReport;
use super::{ecom, roadmap, strategy, ReportKind};
use crate::format::{fmt_money, is_blank, parse_number};
use crate::sheets::SheetSource;

/// Rows shown per card
const CARD_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCard {
    pub title: String,
    pub rows: Vec<SummaryRow>,
    pub link: String,
    pub download: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub title: String,
    pub cards: Vec<DashboardCard>,
    pub strategy: StrategyReport,
    pub roadmap: RoadmapReport,
}

/// First rows of the target plan: label from the first column, value from
/// the first non-blank of the remaining columns.
fn target_rows(target: &EcomTargetReport) -> Vec<SummaryRow> {
    let Some((first_col, value_cols)) = target.columns.split_first() else {
        return Vec::new();
    };

    target
        .rows
        .iter()
        .take(CARD_ROWS)
        .map(|row| {
            let value = value_cols
                .iter()
                .map(|c| row.value(c))
                .find(|v| !is_blank(v))
                .map(|v| match parse_number(v) {
                    Some(_) => fmt_money(v, 2),
                    None => v.to_string(),
                })
                .unwrap_or_default();
            SummaryRow {
                label: row.value(first_col).to_string(),
                value,
            }
        })
        .collect()
}

fn comparison_rows(comparison: &ComparisonReport) -> Vec<SummaryRow> {
    comparison
        .rows
        .iter()
        .take(CARD_ROWS)
        .map(|r| SummaryRow {
            label: r.month.clone(),
            value: format!("{} → {}", r.fmt_2024, r.fmt_2025),
        })
        .collect()
}

pub fn assemble(
    target: &EcomTargetReport,
    comparison: &ComparisonReport,
    strategy: StrategyReport,
    roadmap: RoadmapReport,
) -> DashboardReport {
    let cards = vec![
        DashboardCard {
            title: "2026 Target Plan".to_string(),
            rows: target_rows(target),
            link: ReportKind::EcomTarget.path(),
            download: ReportKind::EcomTarget.download_path(),
        },
        DashboardCard {
            title: "2024 vs 2025 Performance".to_string(),
            rows: comparison_rows(comparison),
            link: ReportKind::EcomComparison.path(),
            download: ReportKind::EcomComparison.download_path(),
        },
    ];

    DashboardReport {
        title: "Strategy Dashboard".to_string(),
        cards,
        strategy,
        roadmap,
    }
}

pub async fn build(source: &dyn SheetSource) -> DashboardReport {
    let (target, comparison, strategy, roadmap) = tokio::join!(
        ecom::build_target(source),
        ecom::build_comparison(source),
        strategy::build(source),
        roadmap::build(source),
    );
    assemble(&target, &comparison, strategy, roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::Sheet;

    #[test]
    fn test_cards() {
        let target = ecom::target_from_sheet(Sheet::from_rows(
            ecom::TARGET_SHEET,
            &["Stage", "Moonshot", "Sales Target"],
            &[
                &["Traffic", "", "2500000"],
                &["Channel", "Marketplace", ""],
                &["Orders", "", ""],
            ],
        ));
        let comparison = ecom::comparison_from_sheet(Sheet::from_rows(
            ecom::COMPARISON_SHEET,
            &["Months", "2024", "2025"],
            &[&["Jan", "1000", "1500"]],
        ));

        let report = assemble(
            &target,
            &comparison,
            StrategyReport::default(),
            RoadmapReport::default(),
        );

        let target_card = &report.cards[0];
        assert_eq!(target_card.link, "/ecom");
        assert_eq!(target_card.download.as_deref(), Some("/ecom/download"));
        assert_eq!(target_card.rows[0].value, "2,500,000.00");
        // "Moonshot" is a money column, so free text in it reads as blank
        assert_eq!(target_card.rows[1].value, "");
        assert_eq!(target_card.rows[2].label, "Orders");

        assert_eq!(report.cards[1].rows[0].value, "1,000 → 1,500");
    }
}
