//! OKR Report
//!
//! Compares 2025 and 2026 OKRs per functional team. Rows are split by the
//! `Years` column, grouped by `Functional POVs`, then by objective.

use serde::Serialize;
use std::collections::BTreeSet;

use super::{ChartData, ChartSeries};
use crate::format::is_blank;
use crate::sheets::{fetch_or_empty, Record, Sheet, SheetSource};

pub const SHEET: &str = "okr";

const TEAM_COLUMN: &str = "Functional POVs";
const OBJECTIVE_COLUMN: &str = "Objective";
const AVERAGE_COLUMN: &str = "Average";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OkrObjective {
    pub objective: String,
    pub items_2025: Vec<Record>,
    pub items_2026: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OkrTeam {
    pub team: String,
    pub objectives: Vec<OkrObjective>,
    /// Mean achievement in percent, one decimal
    pub avg_2025: Option<f64>,
    pub avg_2026: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OkrReport {
    pub title: String,
    /// Columns shown for each key result
    pub columns: Vec<String>,
    pub teams: Vec<OkrTeam>,
    pub chart: ChartData,
}

/// Mean of the `Average` column in percent.
///
/// Plain numbers are ratios (`0.7` → 70); values typed with a `%` sign
/// are already percentages.
pub fn average_percent(rows: &[Record]) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.get(AVERAGE_COLUMN))
        .filter(|v| !is_blank(v))
        .filter_map(|v| {
            let is_percent = v.contains('%');
            let n: f64 = v.replace('%', "").trim().parse().ok()?;
            Some(if is_percent { n } else { n * 100.0 })
        })
        .collect();

    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

fn label_or(record: &Record, column: &str, default: &str) -> String {
    match record.value(column).trim() {
        v if is_blank(v) => default.to_string(),
        v => v.to_string(),
    }
}

fn rows_for_team<'a>(rows: &'a [Record], team: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
    rows.iter()
        .filter(move |r| label_or(r, TEAM_COLUMN, "Other") == team)
}

pub fn from_sheet(mut sheet: Sheet) -> OkrReport {
    sheet.trim_headers();

    let mut rows_2025 = Vec::new();
    let mut rows_2026 = Vec::new();
    for record in sheet.records() {
        let year = record.value("Years").trim().to_string();
        if year.contains("2025") {
            rows_2025.push(record);
        } else if year.contains("2026") {
            rows_2026.push(record);
        }
    }

    let teams: BTreeSet<String> = rows_2025
        .iter()
        .chain(rows_2026.iter())
        .map(|r| label_or(r, TEAM_COLUMN, "Other"))
        .collect();

    let mut comparison = Vec::with_capacity(teams.len());
    for team in &teams {
        let items_2025: Vec<Record> = rows_for_team(&rows_2025, team).cloned().collect();
        let items_2026: Vec<Record> = rows_for_team(&rows_2026, team).cloned().collect();

        let mut objectives: Vec<OkrObjective> = Vec::new();
        for (item, is_2025) in items_2025
            .iter()
            .map(|i| (i, true))
            .chain(items_2026.iter().map(|i| (i, false)))
        {
            let name = label_or(item, OBJECTIVE_COLUMN, "No Objective");
            let idx = match objectives.iter().position(|o| o.objective == name) {
                Some(idx) => idx,
                None => {
                    objectives.push(OkrObjective {
                        objective: name,
                        items_2025: Vec::new(),
                        items_2026: Vec::new(),
                    });
                    objectives.len() - 1
                }
            };
            if is_2025 {
                objectives[idx].items_2025.push(item.clone());
            } else {
                objectives[idx].items_2026.push(item.clone());
            }
        }

        comparison.push(OkrTeam {
            team: team.clone(),
            objectives,
            avg_2025: average_percent(&items_2025),
            avg_2026: average_percent(&items_2026),
        });
    }

    let chart = ChartData {
        title: "Average achievement by team (%)".to_string(),
        labels: comparison.iter().map(|t| t.team.clone()).collect(),
        series: vec![
            ChartSeries::bar("2025", comparison.iter().map(|t| t.avg_2025.unwrap_or(0.0)).collect()),
            ChartSeries::bar("2026", comparison.iter().map(|t| t.avg_2026.unwrap_or(0.0)).collect()),
        ],
        stacked: false,
    };

    let columns = sheet
        .headers
        .iter()
        .filter(|h| !matches!(h.as_str(), "Years" | TEAM_COLUMN | OBJECTIVE_COLUMN))
        .cloned()
        .collect();

    OkrReport {
        title: "OKR Dashboard: 2025 vs 2026".to_string(),
        columns,
        teams: comparison,
        chart,
    }
}

pub async fn build(source: &dyn SheetSource) -> OkrReport {
    from_sheet(fetch_or_empty(source, SHEET).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn okr_sheet() -> Sheet {
        Sheet::from_rows(
            SHEET,
            &["Years", "Functional POVs", "Objective", "Key Result", "Average"],
            &[
                &["2025", "Marketing ", "Grow traffic", "Sessions +20%", "0.7"],
                &["2025", "Marketing", "Grow traffic", "CTR 3%", "0.9"],
                &["FY2026", "Marketing", "Own the category", "SOV 30%", "50%"],
                &["2026", "Ops", "Faster dispatch", "Next-day 80%", ""],
                &["2024", "Ops", "Old", "ignored", "1"],
                &["2025", "", "", "Unowned", "bad"],
            ],
        )
    }

    #[test]
    fn test_teams_sorted_union() {
        let report = from_sheet(okr_sheet());
        let teams: Vec<&str> = report.teams.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(teams, vec!["Marketing", "Ops", "Other"]);
    }

    #[test]
    fn test_objectives_grouped_per_year() {
        let report = from_sheet(okr_sheet());
        let marketing = &report.teams[0];

        assert_eq!(marketing.objectives.len(), 2);
        assert_eq!(marketing.objectives[0].objective, "Grow traffic");
        assert_eq!(marketing.objectives[0].items_2025.len(), 2);
        assert!(marketing.objectives[0].items_2026.is_empty());
        assert_eq!(marketing.objectives[1].items_2026.len(), 1);

        let other = &report.teams[2];
        assert_eq!(other.objectives[0].objective, "No Objective");
    }

    #[test]
    fn test_team_averages() {
        let report = from_sheet(okr_sheet());
        let marketing = &report.teams[0];

        assert_eq!(marketing.avg_2025, Some(80.0));
        assert_eq!(marketing.avg_2026, Some(50.0));
        assert_eq!(report.teams[1].avg_2026, None);
        assert_eq!(report.teams[2].avg_2025, None);
        assert_eq!(report.chart.series[0].values, vec![80.0, 0.0, 0.0]);
    }

    #[test]
    fn test_columns_exclude_grouping_keys() {
        let report = from_sheet(okr_sheet());
        assert_eq!(report.columns, vec!["Key Result", "Average"]);
    }
}
