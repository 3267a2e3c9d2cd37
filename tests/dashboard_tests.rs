//! End-to-end tests: a CSV workbook served through the router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

use strategic_console::{build_router, ApiConfig, AppState, CachedSource, WorkbookSource};

fn write_sheet(dir: &Path, name: &str, csv: &str) {
    std::fs::write(dir.join(format!("{}.csv", name)), csv).unwrap();
}

fn workbook() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();

    write_sheet(
        path,
        "2026 Ecom Target",
        "Stage,Target Amount,Owner\n\
         Traffic,1500000,Growth\n\
         Conversion,250000.5,CRM\n\
         Insight,Focus the spring campaign on returning customers and bundles,\n",
    );
    write_sheet(
        path,
        "ecom 2024 vs 2025",
        "Months,2024,2025,Notes\n\
         Jan,\"1,000\",\"1,500\",kickoff\n\
         Feb,800,600,\n\
         Dec,200,100,holiday\n",
    );
    write_sheet(
        path,
        "2026 Strategy plan",
        "Goal,Strategy Pillar,Phase,Quarter,Action,Photo_URL 1\n\
         Double online revenue,Brand,Build,Q1,Refresh storefront,https://img.example/store.png\n\
         ,Brand,Scale,Q2,Creator program,\n\
         ,Retention,Build,Q1,Loyalty tiers,\n",
    );
    write_sheet(
        path,
        "roadmap",
        "quarter,activity id,key activity,owner\n\
         Q2,R-2,Marketplace expansion,Linh\n\
         Q1,R-1,Checkout revamp,Bao\n\
         ,R-3,Warehouse audit,An\n",
    );
    write_sheet(
        path,
        "okr",
        "Years,Functional POVs,Objective,Key Result,Average\n\
         2025,Marketing,Grow traffic,Sessions,0.8\n\
         2026,Marketing,Grow traffic,Sessions,90%\n\
         2025,,Lead time,Ship in 2 days,0.5\n",
    );
    write_sheet(
        path,
        "BOB",
        "Month,BOB,Self,Total,CS%\n\
         Jan,\"1,200\",800,\"2,000\",0.6\n\
         Feb,900,\"1,100\",\"2,000\",45%\n\
         Mar,1500,1000,2500,0.6\n",
    );
    write_sheet(
        path,
        "BOB_review",
        "What Worked?,What did not work?\n\
         \"- Faster replies\n- Bundles\",\"1. Late shipping\"\n\
         ,\n",
    );
    write_sheet(
        path,
        "operation_health",
        "Funnel Stage,Metric,Status\n\
         Acquisition,CPC,On track\n\
         Acquisition,CTR,At risk\n\
         Fulfillment,Lead time,On track\n\
         insight,Fulfillment is the bottleneck,\n",
    );

    dir
}

fn app(dir: &TempDir) -> Router {
    let source = CachedSource::new(WorkbookSource::new(dir.path()), Duration::from_secs(30));
    build_router(AppState::new(Arc::new(source), ApiConfig::default()))
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> serde_json::Value {
    let (status, body) = get_text(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{}: {}", uri, body);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_dashboard_cards() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/dashboard").await;

    let cards = json["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["rows"][0]["label"], "Traffic");
    assert_eq!(cards[0]["rows"][0]["value"], "1,500,000.00");
    assert_eq!(cards[1]["rows"][0]["value"], "1,000 → 1,500");
    assert_eq!(cards[1]["download"], "/ecom_comp/download");
    assert_eq!(json["roadmap"]["quarter_order"][0], "Q1");
}

#[tokio::test]
async fn test_ecom_target() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/ecom").await;

    assert_eq!(json["rows"][1]["Target Amount"], "250,000.50");
    assert_eq!(json["rows"][1]["Owner"], "CRM");
    assert_eq!(
        json["insight"],
        "Focus the spring campaign on returning customers and bundles"
    );
}

#[tokio::test]
async fn test_ecom_comparison_excludes_december_from_minimum() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/ecom_comp").await;

    assert_eq!(json["summary"]["max_month"], "Jan");
    assert_eq!(json["summary"]["min_month"], "Feb");
    assert_eq!(json["rows"][1]["delta_pct_fmt"], "-25.0%");
    assert_eq!(json["rows"][0].get("Notes"), None);
}

#[tokio::test]
async fn test_strategy_goal_carries_forward() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/strategy_plan").await;

    assert_eq!(json["goal_text"], "Double online revenue");
    let pillars = json["pillars"].as_array().unwrap();
    assert_eq!(pillars[0]["name"], "Brand");
    assert_eq!(pillars[0]["items"][1]["goal"], "Double online revenue");
    assert_eq!(pillars[1]["name"], "Retention");
    assert_eq!(pillars[0]["items"][0]["photos"][0], "https://img.example/store.png");
}

#[tokio::test]
async fn test_roadmap_quarters() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/roadmap").await;

    let order: Vec<&str> = json["quarter_order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q.as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["Q1", "Q2", "Unassigned"]);
    assert_eq!(json["quarters"][0]["items"][0]["topic"], "Checkout revamp");
}

#[tokio::test]
async fn test_okr_team_averages() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/okr").await;

    assert_eq!(json["teams"][0]["team"], "Marketing");
    assert_eq!(json["teams"][0]["avg_2025"], 80.0);
    assert_eq!(json["teams"][0]["avg_2026"], 90.0);
    assert_eq!(json["teams"][1]["team"], "Other");
    assert!(json["teams"][1]["avg_2026"].is_null());
}

#[tokio::test]
async fn test_bob_summary_and_reviews() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/bob").await;

    assert_eq!(json["summary"]["total_bob"], "3,600");
    assert_eq!(json["summary"]["best_month"], "Mar");
    assert_eq!(json["summary"]["avg_cs"], "55.0%");
    assert_eq!(json["rows"][1]["cs_percent"], "45.0%");

    let reviews = json["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["worked"][1], "Bundles");
    assert_eq!(reviews[0]["not_work"][0], "Late shipping");
}

#[tokio::test]
async fn test_operation_health() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/reports/operation_health").await;

    assert_eq!(json["insights"].as_array().unwrap().len(), 1);
    assert_eq!(json["stages"][0]["name"], "Acquisition");
    assert_eq!(json["status_counts"][0]["label"], "On track");
    assert_eq!(json["status_counts"][0]["count"], 2);
}

#[tokio::test]
async fn test_missing_sheets_render_empty_pages() {
    let dir = workbook();
    for uri in ["/swot", "/cost_per_x", "/fna_performance"] {
        let (status, html) = get_text(app(&dir), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(html.contains("bi-inbox"), "{}", uri);
    }
}

#[tokio::test]
async fn test_bob_page_has_chart_and_review() {
    let dir = workbook();
    let (status, html) = get_text(app(&dir), "/bob").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"id="bob-chart""#));
    assert!(html.contains("What Worked?"));
    assert!(html.contains("Faster replies"));
}

#[tokio::test]
async fn test_strategy_download() {
    let dir = workbook();
    let response = app(&dir)
        .oneshot(
            Request::builder()
                .uri("/strategy_plan/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"strategy_plan_"));
    // strategy_plan_YYYYmmdd_HHMMSS.html
    let filename = disposition
        .trim_start_matches("attachment; filename=\"")
        .trim_end_matches('"');
    assert_eq!(filename.len(), "strategy_plan_".len() + 15 + ".html".len());
}

#[tokio::test]
async fn test_cache_invalidation_picks_up_edits() {
    let dir = workbook();
    let app = app(&dir);

    let before = get_json(app.clone(), "/api/v1/reports/roadmap").await;
    assert_eq!(before["quarter_order"].as_array().unwrap().len(), 3);

    write_sheet(dir.path(), "roadmap", "Quarter,Activity_ID,Key Topic,Owner\nQ4,R-9,Year review,Mai\n");

    let cached = get_json(app.clone(), "/api/v1/reports/roadmap").await;
    assert_eq!(cached["quarter_order"].as_array().unwrap().len(), 3);

    let response = app
        .clone()
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

    let after = get_json(app, "/api/v1/reports/roadmap").await;
    assert_eq!(after["quarter_order"][0], "Q4");
}

#[tokio::test]
async fn test_raw_sheet_endpoint() {
    let dir = workbook();
    let json = get_json(app(&dir), "/api/v1/sheets/BOB").await;

    assert_eq!(json["columns"][0], "Month");
    assert_eq!(json["rows"][0]["Total"], "2,000");
}

#[tokio::test]
async fn test_missing_workbook_fails_raw_sheet_but_not_pages() {
    let source = WorkbookSource::new("/nonexistent/strategic_insight");
    let app = build_router(AppState::new(Arc::new(source), ApiConfig::default()));

    let (status, _) = get_text(app.clone(), "/api/v1/sheets/BOB").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, html) = get_text(app, "/ecom").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No target plan data available."));
}
