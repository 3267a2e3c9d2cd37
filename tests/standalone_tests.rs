//! Standalone snapshot generated from a CSV workbook.

use chrono::{Local, TimeZone};

use strategic_console::render::standalone::{generate, Snapshot};
use strategic_console::WorkbookSource;

#[tokio::test]
async fn test_snapshot_tabs_and_sections() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("ecom 2024 vs 2025.csv"),
        "Months,2024,2025\nJan,100,<b>150</b>\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("2026 Strategy plan.csv"),
        "Goal,Strategy Pillar,Action\nWin the region,Brand,Pop-up stores\n",
    )
    .unwrap();

    let source = WorkbookSource::new(dir.path());
    let at = Local.with_ymd_and_hms(2026, 3, 2, 18, 5, 0).unwrap();
    let html = generate(&source, at).await;

    for tab in [r#"id="ecom""#, r#"id="strategy""#, r#"id="roadmap""#, r#"id="comparison""#] {
        assert!(html.contains(tab), "{}", tab);
    }
    assert!(html.contains("Win the region"));
    assert!(html.contains("Pop-up stores"));
    assert!(html.contains("Generated on 2026-03-02 18:05"));
    assert!(!html.contains("<b>150</b>"));
}

#[tokio::test]
async fn test_snapshot_collects_each_report() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("roadmap.csv"),
        "Quarter,Activity_ID,Key Topic,Owner\nQ3,R-4,New warehouse,Phuong\n",
    )
    .unwrap();

    let snapshot = Snapshot::collect(&WorkbookSource::new(dir.path())).await;

    assert!(snapshot.target.rows.is_empty());
    assert!(snapshot.comparison.rows.is_empty());
    assert_eq!(snapshot.roadmap.quarter_order, vec!["Q3".to_string()]);
    assert_eq!(snapshot.strategy.goal_text, "2026 Strategy Plan");
}
