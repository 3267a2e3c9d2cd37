//! Strategic Console HTTP service
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /`, `/home`, `/dashboard` - Dashboard
//! - `GET /ecom`, `/ecom_comp`, `/strategy_plan`, `/roadmap`, `/swot`,
//!   `/cost_per_x`, `/okr`, `/fna_performance`, `/operation_health`, `/bob`
//! - `GET /ecom/download`, `/ecom_comp/download`, `/strategy_plan/download`,
//!   `/roadmap/download` - Report as an HTML attachment
//!
//! ## Data
//! - `GET /api/v1/reports` - List reports
//! - `GET /api/v1/reports/:name` - Report context
//! - `GET /api/v1/sheets/:name` - Raw sheet rows
//! - `POST /api/v1/cache/invalidate` - Drop cached sheets
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use strategic_console::api::{serve, ApiConfig, AppState};
//! use strategic_console::sheets::WorkbookSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(WorkbookSource::new("./strategic_insight"));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(source, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::reports::ReportKind;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let mut pages = Router::new()
        .route("/home", routes::pages::page(ReportKind::Dashboard))
        .route("/dashboard", routes::pages::page(ReportKind::Dashboard));
    for kind in ReportKind::ALL {
        pages = pages.route(&kind.path(), routes::pages::page(kind));
        if let Some(path) = kind.download_path() {
            pages = pages.route(&path, routes::pages::download(kind));
        }
    }

    let api_routes = Router::new()
        .route("/reports", get(routes::reports::list_reports))
        .route("/reports/:name", get(routes::reports::get_report))
        .route("/sheets/:name", get(routes::reports::get_sheet))
        .route("/cache/invalidate", post(routes::reports::invalidate_cache));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    pages
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server and run until a shutdown signal arrives
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let source = state.source.name().to_string();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(source = %source, "Strategic Console listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Strategic Console shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::WorkbookSource;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("ecom 2024 vs 2025.csv"),
            "Months,2024,2025\nJan,\"1,000\",\"1,500\"\nFeb,800,600\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("roadmap.csv"),
            "Quarter,Activity_ID,Key Topic,Owner\nQ2,R-7,Marketplace expansion,Linh\n",
        )
        .unwrap();

        let source = Arc::new(WorkbookSource::new(dir.path()));
        let router = build_router(AppState::new(source, ApiConfig::default()));
        (router, dir)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_workbook() {
        let source = Arc::new(WorkbookSource::new("/nonexistent/strategic_insight"));
        let app = build_router(AppState::new(source, ApiConfig::default()));

        let response = get(app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["source"], "workbook");
    }

    #[tokio::test]
    async fn test_every_page_renders() {
        let (app, _dir) = create_test_app();
        for uri in ["/", "/home", "/dashboard", "/swot", "/okr", "/bob", "/operation_health"] {
            let response = get(app.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_roadmap_page() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/roadmap").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Marketplace expansion"));
        assert!(html.contains(r#"href="/roadmap/download""#));
    }

    #[tokio::test]
    async fn test_download_is_attachment() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/ecom_comp/download").await;
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"ecom_comparison_"));
        assert!(disposition.ends_with(".html\""));

        let html = body_text(response).await;
        assert!(html.contains("Downloaded on"));
        assert!(!html.contains(r#"<nav class="console-nav">"#));
    }

    #[tokio::test]
    async fn test_no_download_for_swot() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/swot/download").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_report_json() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/api/v1/reports/ecom_comp").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["rows"][0]["month"], "Jan");
        assert_eq!(json["summary"]["total_2025"], "2,100");
    }

    #[tokio::test]
    async fn test_unknown_report_is_404() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/api/v1/reports/budget").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_sheet_names_cannot_leave_workbook() {
        let root = tempdir().unwrap();
        let workbook = root.path().join("wb");
        std::fs::create_dir(&workbook).unwrap();
        std::fs::write(root.path().join("secret.csv"), "token\nTOP-SECRET-123\n").unwrap();

        let source = Arc::new(WorkbookSource::new(&workbook));
        let app = build_router(AppState::new(source, ApiConfig::default()));

        let absolute = root.path().join("secret").to_string_lossy().replace('/', "%2F");
        for uri in [
            "/api/v1/sheets/..%2Fsecret".to_string(),
            format!("/api/v1/sheets/{}", absolute),
            "/api/v1/sheets/budget".to_string(),
        ] {
            let response = get(app.clone(), &uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert!(!body_text(response).await.contains("TOP-SECRET"), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_known_sheet_ignores_case() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/api/v1/sheets/ROADMAP").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["name"], "roadmap");
        assert_eq!(json["rows"][0]["Key Topic"], "Marketplace expansion");
    }

    #[tokio::test]
    async fn test_list_reports() {
        let (app, _dir) = create_test_app();
        let response = get(app, "/api/v1/reports").await;

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["reports"].as_array().unwrap().len(), ReportKind::ALL.len());
    }

    #[tokio::test]
    async fn test_invalidate_cache() {
        let (app, _dir) = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/cache/invalidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
