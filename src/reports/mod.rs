//! Report Builders
//!
//! Each report reads one or two sheets and produces a serializable
//! context. The same context feeds the HTML page, the download and the
//! JSON endpoint.
//!
//! Builders never fail: a sheet that cannot be loaded is logged and
//! treated as empty, and the report renders its "no data" state.

pub mod bob;
pub mod cost_per_x;
pub mod dashboard;
pub mod ecom;
pub mod fna;
pub mod okr;
pub mod operations;
pub mod roadmap;
pub mod strategy;
pub mod swot;

pub use bob::{BobReport, BobRow, BobSummary, ReviewEntry, REVIEW_SECTIONS};
pub use cost_per_x::{CostPerXReport, CostRow};
pub use dashboard::{DashboardCard, DashboardReport, SummaryRow};
pub use ecom::{ComparisonReport, ComparisonRow, ComparisonSummary, EcomTargetReport};
pub use fna::{CategoryMeta, FnaReport};
pub use okr::{OkrObjective, OkrReport, OkrTeam};
pub use operations::OperationHealthReport;
pub use roadmap::{RoadmapEntry, RoadmapReport};
pub use strategy::{StrategyEntry, StrategyReport};
pub use swot::{KeyInsight, SwotPoint, SwotReport};

use crate::sheets::{SheetSource, OPERATION_HEALTH_SHEET, ROADMAP_SHEET};
use serde::Serialize;

/// Every sheet a report reads
pub const SHEETS: [&str; 11] = [
    ecom::TARGET_SHEET,
    ecom::COMPARISON_SHEET,
    strategy::SHEET,
    ROADMAP_SHEET,
    swot::SHEET,
    cost_per_x::SHEET,
    okr::SHEET,
    fna::SHEET,
    OPERATION_HEALTH_SHEET,
    bob::SHEET,
    bob::REVIEW_SHEET,
];

/// The known sheet matching `name`, ignoring case
pub fn known_sheet(name: &str) -> Option<&'static str> {
    SHEETS.into_iter().find(|s| s.eq_ignore_ascii_case(name))
}

/// Items sharing a label, kept in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<T> {
    pub name: String,
    pub items: Vec<T>,
}

/// Append an item to its group, creating the group on first sight
pub fn push_grouped<T>(groups: &mut Vec<Group<T>>, name: &str, item: T) {
    match groups.iter_mut().find(|g| g.name == name) {
        Some(group) => group.items.push(item),
        None => groups.push(Group {
            name: name.to_string(),
            items: vec![item],
        }),
    }
}

/// Occurrence count for a label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub label: String,
    pub count: usize,
}

/// Count a label, keeping first-seen order
pub fn tally(counts: &mut Vec<Tally>, label: &str) {
    match counts.iter_mut().find(|t| t.label == label) {
        Some(entry) => entry.count += 1,
        None => counts.push(Tally {
            label: label.to_string(),
            count: 1,
        }),
    }
}

/// How a chart series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
    Pie,
}

/// One trace of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub kind: SeriesKind,
    pub values: Vec<f64>,
    /// Plot against the right-hand axis
    pub secondary_axis: bool,
}

impl ChartSeries {
    pub fn bar(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Bar,
            values,
            secondary_axis: false,
        }
    }

    pub fn line(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Line,
            values,
            secondary_axis: false,
        }
    }

    pub fn pie(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Pie,
            values,
            secondary_axis: false,
        }
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.secondary_axis = true;
        self
    }
}

/// Chart description rendered client-side by Plotly
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Stack bar series instead of grouping them
    pub stacked: bool,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.series.iter().all(|s| s.values.is_empty())
    }
}

/// Every report the console serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Dashboard,
    EcomTarget,
    EcomComparison,
    StrategyPlan,
    Roadmap,
    Swot,
    CostPerX,
    Okr,
    FnaPerformance,
    OperationHealth,
    Bob,
}

impl ReportKind {
    pub const ALL: [ReportKind; 11] = [
        ReportKind::Dashboard,
        ReportKind::EcomTarget,
        ReportKind::EcomComparison,
        ReportKind::StrategyPlan,
        ReportKind::Roadmap,
        ReportKind::Swot,
        ReportKind::CostPerX,
        ReportKind::Okr,
        ReportKind::FnaPerformance,
        ReportKind::OperationHealth,
        ReportKind::Bob,
    ];

    /// URL segment and download file prefix
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Dashboard => "dashboard",
            ReportKind::EcomTarget => "ecom",
            ReportKind::EcomComparison => "ecom_comp",
            ReportKind::StrategyPlan => "strategy_plan",
            ReportKind::Roadmap => "roadmap",
            ReportKind::Swot => "swot",
            ReportKind::CostPerX => "cost_per_x",
            ReportKind::Okr => "okr",
            ReportKind::FnaPerformance => "fna_performance",
            ReportKind::OperationHealth => "operation_health",
            ReportKind::Bob => "bob",
        }
    }

    /// Navigation label
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Dashboard => "Dashboard",
            ReportKind::EcomTarget => "2026 Ecom Target",
            ReportKind::EcomComparison => "2024 vs 2025",
            ReportKind::StrategyPlan => "Strategy Plan",
            ReportKind::Roadmap => "Roadmap",
            ReportKind::Swot => "SWOT",
            ReportKind::CostPerX => "Cost per X",
            ReportKind::Okr => "OKR",
            ReportKind::FnaPerformance => "FNA Performance",
            ReportKind::OperationHealth => "Operations Health",
            ReportKind::Bob => "BOB",
        }
    }

    /// Page path
    pub fn path(self) -> String {
        match self {
            ReportKind::Dashboard => "/".to_string(),
            other => format!("/{}", other.slug()),
        }
    }

    /// Download path, for reports that offer one
    pub fn download_path(self) -> Option<String> {
        match self {
            ReportKind::EcomTarget
            | ReportKind::EcomComparison
            | ReportKind::StrategyPlan
            | ReportKind::Roadmap => Some(format!("/{}/download", self.slug())),
            _ => None,
        }
    }

    /// Download file prefix
    pub fn download_name(self) -> &'static str {
        match self {
            ReportKind::EcomTarget => "ecom_target",
            ReportKind::EcomComparison => "ecom_comparison",
            other => other.slug(),
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

/// Build any report and serialize it to JSON
pub async fn build_json(
    kind: ReportKind,
    source: &dyn SheetSource,
) -> Result<serde_json::Value, serde_json::Error> {
    match kind {
        ReportKind::Dashboard => serde_json::to_value(dashboard::build(source).await),
        ReportKind::EcomTarget => serde_json::to_value(ecom::build_target(source).await),
        ReportKind::EcomComparison => serde_json::to_value(ecom::build_comparison(source).await),
        ReportKind::StrategyPlan => serde_json::to_value(strategy::build(source).await),
        ReportKind::Roadmap => serde_json::to_value(roadmap::build(source).await),
        ReportKind::Swot => serde_json::to_value(swot::build(source).await),
        ReportKind::CostPerX => serde_json::to_value(cost_per_x::build(source).await),
        ReportKind::Okr => serde_json::to_value(okr::build(source).await),
        ReportKind::FnaPerformance => serde_json::to_value(fna::build(source).await),
        ReportKind::OperationHealth => serde_json::to_value(operations::build(source).await),
        ReportKind::Bob => serde_json::to_value(bob::build(source).await),
    }
}
