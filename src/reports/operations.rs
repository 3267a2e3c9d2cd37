//! Operation Health Report
//!
//! Funnel checkpoints from the `operation_health` sheet grouped by funnel
//! stage, plus a status breakdown. Rows whose stage is `insight` are
//! commentary and listed separately.

use serde::Serialize;

use super::{push_grouped, tally, ChartData, ChartSeries, Group, Tally};
use crate::sheets::{Record, Sheet, SheetSource};

#[derive(Debug, Clone, Serialize)]
pub struct OperationHealthReport {
    pub title: String,
    pub columns: Vec<String>,
    pub insights: Vec<Record>,
    pub stages: Vec<Group<Record>>,
    pub status_counts: Vec<Tally>,
    pub chart: ChartData,
}

impl Default for OperationHealthReport {
    fn default() -> Self {
        Self {
            title: "Operations Health".to_string(),
            columns: Vec::new(),
            insights: Vec::new(),
            stages: Vec::new(),
            status_counts: Vec::new(),
            chart: ChartData::default(),
        }
    }
}

/// Split rows into insights, stage groups and status counts
pub fn split_operations(rows: Vec<Record>) -> (Vec<Record>, Vec<Group<Record>>, Vec<Tally>) {
    let mut insights = Vec::new();
    let mut stages = Vec::new();
    let mut statuses = Vec::new();

    for row in rows {
        let stage = row.value("Funnel Stage").trim().to_string();
        let status = row.value("Status").trim().to_string();

        if stage.eq_ignore_ascii_case("insight") {
            insights.push(row);
            continue;
        }

        let stage = if stage.is_empty() { "Unassigned" } else { stage.as_str() };
        push_grouped(&mut stages, stage, row);
        if !status.is_empty() {
            tally(&mut statuses, &status);
        }
    }

    (insights, stages, statuses)
}

pub fn from_sheet(mut sheet: Sheet) -> OperationHealthReport {
    let mut report = OperationHealthReport::default();
    if sheet.is_empty() {
        return report;
    }

    sheet.trim_headers();
    let (insights, stages, status_counts) = split_operations(sheet.records());

    report.chart = ChartData {
        title: "Checkpoint status".to_string(),
        labels: status_counts.iter().map(|t| t.label.clone()).collect(),
        series: vec![ChartSeries::pie(
            "Status",
            status_counts.iter().map(|t| t.count as f64).collect(),
        )],
        stacked: false,
    };
    report.columns = sheet.headers;
    report.insights = insights;
    report.stages = stages;
    report.status_counts = status_counts;
    report
}

pub async fn build(source: &dyn SheetSource) -> OperationHealthReport {
    match source.operation_health().await {
        Ok(sheet) => from_sheet(sheet),
        Err(e) => {
            tracing::warn!(error = %e, "Error loading operation health");
            OperationHealthReport::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_operations() {
        let sheet = Sheet::from_rows(
            "operation_health",
            &["Funnel Stage ", "Checkpoint", "Status"],
            &[
                &["Fulfilment", "Pick accuracy", "On Track"],
                &["Insight", "Returns spike after promos", ""],
                &["Delivery", "Next-day rate", "At Risk"],
                &["", "Stock sync", "On Track"],
                &["Fulfilment", "Packing time", ""],
            ],
        );

        let report = from_sheet(sheet);
        assert_eq!(report.insights.len(), 1);

        let stages: Vec<&str> = report.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(stages, vec!["Fulfilment", "Delivery", "Unassigned"]);
        assert_eq!(report.stages[0].items.len(), 2);

        assert_eq!(report.status_counts[0], Tally { label: "On Track".into(), count: 2 });
        assert_eq!(report.status_counts[1], Tally { label: "At Risk".into(), count: 1 });
        assert_eq!(report.chart.series[0].values, vec![2.0, 1.0]);
    }

    #[test]
    fn test_empty_sheet() {
        let report = from_sheet(Sheet::empty("operation_health"));
        assert!(report.stages.is_empty());
        assert!(report.chart.is_empty());
    }
}
