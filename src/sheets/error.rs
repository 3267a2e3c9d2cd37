//! Sheet source error types
//!
//! Defines all errors that can occur while loading workbook sheets.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in a sheet source
#[derive(Error, Debug)]
pub enum SheetError {
    /// The local workbook directory does not exist
    #[error("Workbook not found: {0:?}")]
    WorkbookNotFound(PathBuf),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet file could not be opened or decoded
    #[error("Spreadsheet error: {0}")]
    Xlsx(String),

    /// Sheet name would leave the workbook (path separators, `..`)
    #[error("Invalid sheet name: {0:?}")]
    InvalidSheetName(String),

    /// Remote request failed or returned an unexpected status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Remote service rejected the credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Credentials file missing or malformed
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SheetError {
    fn from(err: reqwest::Error) -> Self {
        SheetError::Http(err.to_string())
    }
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        SheetError::Xlsx(err.to_string())
    }
}

impl From<serde_json::Error> for SheetError {
    fn from(err: serde_json::Error) -> Self {
        SheetError::Parse(err.to_string())
    }
}

/// Result type alias for sheet operations
pub type SheetResult<T> = Result<T, SheetError>;
