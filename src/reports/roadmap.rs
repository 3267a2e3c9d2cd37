//! Roadmap Report
//!
//! Activities of the `roadmap` sheet grouped by quarter. Column names are
//! matched case-insensitively because the sheet has been typed several
//! ways (`Activity_ID` / `Activity ID`, `Key Topic` / `Key_Topic`).

use serde::Serialize;
use std::collections::BTreeMap;

use super::Group;
use crate::format::is_blank;
use crate::sheets::{Sheet, SheetSource};

const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapEntry {
    pub activity_id: String,
    pub topic: String,
    pub owner: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoadmapReport {
    /// Quarters in sorted order
    pub quarters: Vec<Group<RoadmapEntry>>,
    pub quarter_order: Vec<String>,
}

pub fn from_sheet(mut sheet: Sheet) -> RoadmapReport {
    if sheet.is_empty() {
        return RoadmapReport::default();
    }
    sheet.trim_headers();

    let mut by_quarter: BTreeMap<String, Vec<RoadmapEntry>> = BTreeMap::new();
    for record in sheet.records() {
        let quarter = match record.first_of_ci(&["Quarter"]).trim() {
            q if is_blank(q) => UNASSIGNED.to_string(),
            q => q.to_string(),
        };

        by_quarter.entry(quarter).or_default().push(RoadmapEntry {
            activity_id: record.first_of_ci(&["Activity_ID", "Activity ID"]).to_string(),
            topic: record
                .first_of_ci(&["Key Topic", "Key_Topic", "Key Activity"])
                .to_string(),
            owner: record.first_of_ci(&["Owner"]).to_string(),
        });
    }

    let quarters: Vec<Group<RoadmapEntry>> = by_quarter
        .into_iter()
        .map(|(name, items)| Group { name, items })
        .collect();

    RoadmapReport {
        quarter_order: quarters.iter().map(|q| q.name.clone()).collect(),
        quarters,
    }
}

pub async fn build(source: &dyn SheetSource) -> RoadmapReport {
    match source.roadmap().await {
        Ok(sheet) => from_sheet(sheet),
        Err(e) => {
            tracing::warn!(error = %e, "Error loading roadmap");
            RoadmapReport::default()
        }
    }
}
