//! Standalone snapshot
//!
//! A single self-contained HTML file with the e-commerce, strategy and
//! roadmap reports behind Bootstrap tabs.

use chrono::{DateTime, Local};
use std::fmt::Write;

use super::pages::{comparison_section, roadmap_section, strategy_section, target_section};
use super::{esc, fill_template, BASE_TEMPLATE};
use crate::reports::{self, ComparisonReport, EcomTargetReport, RoadmapReport, StrategyReport};
use crate::sheets::SheetSource;

pub const DOCUMENT_TITLE: &str = "Strategic Insights Dashboard";
pub const DEFAULT_OUTPUT: &str = "strategic_insight_dashboard.html";

/// Everything the snapshot shows
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub target: EcomTargetReport,
    pub comparison: ComparisonReport,
    pub strategy: StrategyReport,
    pub roadmap: RoadmapReport,
}

impl Snapshot {
    pub async fn collect(source: &dyn SheetSource) -> Self {
        let (target, comparison, strategy, roadmap) = tokio::join!(
            reports::ecom::build_target(source),
            reports::ecom::build_comparison(source),
            reports::strategy::build(source),
            reports::roadmap::build(source),
        );
        Self {
            target,
            comparison,
            strategy,
            roadmap,
        }
    }

    pub fn render(&self, generated_at: DateTime<Local>) -> String {
        let stamp = generated_at.format("%Y-%m-%d %H:%M").to_string();

        let mut content = String::new();
        let _ = write!(
            content,
            r#"<div class="d-flex justify-content-between align-items-center mb-4"><h1 class="h3 mb-0">{}</h1><div class="text-muted">Last updated: {}</div></div>"#,
            esc(DOCUMENT_TITLE),
            esc(&stamp)
        );

        content.push_str(r#"<ul class="nav nav-tabs" id="dashboardTabs" role="tablist">"#);
        for (i, (id, icon, label)) in [
            ("ecom", "bi-cart", "E-commerce"),
            ("strategy", "bi-bullseye", "Strategy Plan"),
            ("roadmap", "bi-signpost-split", "Roadmap"),
        ]
        .into_iter()
        .enumerate()
        {
            let active = if i == 0 { " active" } else { "" };
            let _ = write!(
                content,
                r##"<li class="nav-item" role="presentation"><button class="nav-link{0}" id="{1}-tab" data-bs-toggle="tab" data-bs-target="#{1}" type="button" role="tab"><i class="bi {2}"></i> {3}</button></li>"##,
                active, id, icon, label
            );
        }
        content.push_str("</ul>");

        content.push_str(r#"<div class="tab-content mt-4" id="dashboardTabsContent">"#);

        content.push_str(r##"<div class="tab-pane fade show active" id="ecom" role="tabpanel"><h2 class="section-title">E-commerce Performance</h2><ul class="nav nav-tabs" id="ecomTabs" role="tablist"><li class="nav-item"><a class="nav-link active" data-bs-toggle="tab" href="#target" role="tab">2026 Target Plan</a></li><li class="nav-item"><a class="nav-link" data-bs-toggle="tab" href="#comparison" role="tab">2024 vs 2025 Comparison</a></li></ul><div class="tab-content mt-4">"##);
        let _ = write!(
            content,
            r#"<div class="tab-pane fade show active" id="target" role="tabpanel">{}</div><div class="tab-pane fade" id="comparison" role="tabpanel">{}</div>"#,
            target_section(&self.target),
            comparison_section(&self.comparison)
        );
        content.push_str("</div></div>");

        let _ = write!(
            content,
            r#"<div class="tab-pane fade" id="strategy" role="tabpanel">{}</div><div class="tab-pane fade" id="roadmap" role="tabpanel">{}</div>"#,
            strategy_section(&self.strategy),
            roadmap_section(&self.roadmap)
        );
        content.push_str("</div>");

        let footer = format!("Generated on {} | {}", stamp, DOCUMENT_TITLE);

        fill_template(
            BASE_TEMPLATE,
            &[
                ("TITLE", esc(DOCUMENT_TITLE).as_ref()),
                ("NAV", ""),
                ("FOOTER", esc(&footer).as_ref()),
                ("SCRIPTS", ""),
                ("CONTENT", content.as_str()),
            ],
        )
    }
}

/// Collect the reports and render the snapshot stamped with `generated_at`
pub async fn generate(source: &dyn SheetSource, generated_at: DateTime<Local>) -> String {
    Snapshot::collect(source).await.render(generated_at)
}
