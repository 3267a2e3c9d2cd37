//! Report Data Routes
//!
//! - GET /api/v1/reports - List reports
//! - GET /api/v1/reports/:name - Report context as JSON
//! - GET /api/v1/sheets/:name - Raw sheet rows
//! - POST /api/v1/cache/invalidate - Drop cached sheets

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CacheInvalidateResponse, ReportInfo, ReportListResponse, SheetResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::reports::{build_json, known_sheet, ReportKind};

/// GET /api/v1/reports
pub async fn list_reports() -> Json<ReportListResponse> {
    Json(ReportListResponse {
        reports: ReportKind::ALL.into_iter().map(ReportInfo::from).collect(),
    })
}

/// GET /api/v1/reports/:name
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let kind = ReportKind::from_slug(&name)
        .ok_or_else(|| ApiError::NotFound(format!("report '{}'", name)))?;

    let context = build_json(kind, state.source.as_ref()).await?;
    Ok(Json(context))
}

/// GET /api/v1/sheets/:name
///
/// Only sheets read by a report are served. Unlike the report builders,
/// source failures surface as errors here.
pub async fn get_sheet(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<SheetResponse>> {
    let sheet_name =
        known_sheet(&name).ok_or_else(|| ApiError::NotFound(format!("sheet '{}'", name)))?;
    let sheet = state.source.fetch(sheet_name).await?;

    Ok(Json(SheetResponse {
        name: sheet.name.clone(),
        rows: sheet.records(),
        columns: sheet.headers,
    }))
}

/// POST /api/v1/cache/invalidate
pub async fn invalidate_cache(State(state): State<Arc<AppState>>) -> Json<CacheInvalidateResponse> {
    state.source.invalidate().await;

    Json(CacheInvalidateResponse {
        status: "ok".to_string(),
        source: state.source.name().to_string(),
    })
}
