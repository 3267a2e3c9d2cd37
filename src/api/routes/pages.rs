//! Page Routes
//!
//! HTML report pages and their downloadable copies.
//!
//! - GET / , /home , /dashboard - Dashboard
//! - GET /<report> - Report page
//! - GET /<report>/download - Report as an HTML attachment

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, MethodRouter},
};
use chrono::Local;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::render::{download_filename, pages::render_report, RenderMode};
use crate::reports::ReportKind;

/// Route serving the page of `kind`
pub fn page(kind: ReportKind) -> MethodRouter<Arc<AppState>> {
    get(move |State(state): State<Arc<AppState>>| async move {
        Html(render_report(kind, state.source.as_ref(), RenderMode::Page).await)
    })
}

/// Route serving `kind` as a file download
pub fn download(kind: ReportKind) -> MethodRouter<Arc<AppState>> {
    get(move |State(state): State<Arc<AppState>>| async move {
        download_response(kind, &state).await
    })
}

async fn download_response(kind: ReportKind, state: &AppState) -> Response {
    let html = render_report(kind, state.source.as_ref(), RenderMode::Download).await;
    let filename = download_filename(kind, Local::now());

    tracing::info!(report = kind.slug(), filename = %filename, "Serving report download");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        html,
    )
        .into_response()
}
