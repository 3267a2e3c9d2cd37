//! Sheet Sources
//!
//! Every report reads named sheets from a [`SheetSource`]. Two sources
//! ship with the console:
//!
//! - [`WorkbookSource`]: a local directory of CSV exports, one file per sheet
//! - [`GoogleSheetsSource`]: the Google Sheets v4 `values` API
//!
//! [`CachedSource`] wraps either one with a short-lived in-memory cache.

mod cache;
mod error;
mod google;
mod types;
mod workbook;

pub use cache::CachedSource;
pub use error::{SheetError, SheetResult};
pub use google::{GoogleCredentials, GoogleSheetsSource, DEFAULT_SHEETS_BASE_URL};
pub use types::{normalize_header, Record, Sheet};
pub use workbook::{validate_sheet_name, WorkbookSource};

use async_trait::async_trait;

/// Sheet holding the quarterly roadmap
pub const ROADMAP_SHEET: &str = "roadmap";

/// Sheet holding the operation health funnel
pub const OPERATION_HEALTH_SHEET: &str = "operation_health";

/// Common trait for all sheet sources
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Short name for logs and health output
    fn name(&self) -> &str;

    /// Load a sheet by name. A sheet the workbook does not contain comes
    /// back empty rather than as an error.
    async fn fetch(&self, sheet: &str) -> SheetResult<Sheet>;

    /// Check that the backing workbook is reachable
    async fn ping(&self) -> SheetResult<()>;

    /// Drop any cached sheets
    async fn invalidate(&self) {}

    /// The quarterly roadmap sheet
    async fn roadmap(&self) -> SheetResult<Sheet> {
        self.fetch(ROADMAP_SHEET).await
    }

    /// The operation health sheet
    async fn operation_health(&self) -> SheetResult<Sheet> {
        self.fetch(OPERATION_HEALTH_SHEET).await
    }
}

/// Fetch a sheet, logging and swallowing failures as an empty sheet
pub async fn fetch_or_empty(source: &dyn SheetSource, sheet: &str) -> Sheet {
    match source.fetch(sheet).await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(sheet = %sheet, source = %source.name(), error = %e, "Failed to load sheet");
            Sheet::empty(sheet)
        }
    }
}
