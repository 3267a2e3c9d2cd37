//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use serde::Serialize;

use crate::reports::ReportKind;
use crate::sheets::Record;

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Name of the configured sheet source
    pub source: String,
    /// Source status: ok or error
    pub source_status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

/// One entry of the report listing
#[derive(Debug, Serialize)]
pub struct ReportInfo {
    pub name: String,
    pub label: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_path: Option<String>,
}

impl From<ReportKind> for ReportInfo {
    fn from(kind: ReportKind) -> Self {
        Self {
            name: kind.slug().to_string(),
            label: kind.label().to_string(),
            path: kind.path(),
            download_path: kind.download_path(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportInfo>,
}

/// Raw rows of one sheet
#[derive(Debug, Serialize)]
pub struct SheetResponse {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct CacheInvalidateResponse {
    pub status: String,
    pub source: String,
}
