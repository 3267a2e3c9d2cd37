//! # Strategic Console
//!
//! A web dashboard over a business-planning workbook: e-commerce targets,
//! year-over-year sales, the strategy plan and roadmap, SWOT, cost
//! analysis, OKRs, FNA KPIs, operation health and the BOB order split.
//!
//! ## Modules
//!
//! - [`sheets`]: Sheet model and sources (CSV workbook, Google Sheets, cache)
//! - [`format`]: Number and text helpers shared by the reports
//! - [`reports`]: One context builder per report
//! - [`render`]: HTML pages, downloads and the standalone snapshot
//! - [`api`]: HTTP service with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strategic_console::reports::ecom;
//! use strategic_console::sheets::WorkbookSource;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = WorkbookSource::new("./strategic_insight");
//!     let comparison = ecom::build_comparison(&source).await;
//!
//!     println!("2025 total: {}", comparison.summary.total_2025);
//! }
//! ```

pub mod api;
pub mod config;
pub mod format;
pub mod render;
pub mod reports;
pub mod sheets;

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, SourceConfig, SourceKind};

pub use reports::ReportKind;

pub use sheets::{
    CachedSource, GoogleSheetsSource, Record, Sheet, SheetError, SheetResult, SheetSource,
    WorkbookSource,
};
