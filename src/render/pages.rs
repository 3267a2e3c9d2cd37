//! Report pages
//!
//! One function per report turning its context into a [`Page`]. The
//! section builders for the e-commerce, strategy and roadmap reports are
//! shared with the standalone snapshot.

use std::fmt::Write;

use super::{attr, empty_state, esc, safe_url, table, Page, RenderMode};
use crate::format::DASH;
use crate::reports::{
    self, BobReport, ComparisonReport, CostPerXReport, DashboardReport, EcomTargetReport, FnaReport,
    OkrReport, OkrTeam, OperationHealthReport, ReportKind, RoadmapReport, StrategyReport,
    SwotReport, REVIEW_SECTIONS,
};
use crate::sheets::SheetSource;

/// Build a report from the source and render it as a full document
pub async fn render_report(kind: ReportKind, source: &dyn SheetSource, mode: RenderMode) -> String {
    let page = match kind {
        ReportKind::Dashboard => dashboard(&reports::dashboard::build(source).await),
        ReportKind::EcomTarget => ecom_target(&reports::ecom::build_target(source).await),
        ReportKind::EcomComparison => ecom_comparison(&reports::ecom::build_comparison(source).await),
        ReportKind::StrategyPlan => strategy(&reports::strategy::build(source).await),
        ReportKind::Roadmap => roadmap(&reports::roadmap::build(source).await),
        ReportKind::Swot => swot(&reports::swot::build(source).await),
        ReportKind::CostPerX => cost_per_x(&reports::cost_per_x::build(source).await),
        ReportKind::Okr => okr(&reports::okr::build(source).await),
        ReportKind::FnaPerformance => fna(&reports::fna::build(source).await),
        ReportKind::OperationHealth => operations(&reports::operations::build(source).await),
        ReportKind::Bob => bob(&reports::bob::build(source).await),
    };
    page.render(mode)
}

fn stat_card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="col"><div class="card h-100"><div class="card-body"><div class="text-muted small">{}</div><div class="stat">{}</div></div></div></div>"#,
        esc(label),
        esc(value)
    )
}

/// Tabs switching between the two e-commerce reports
fn ecom_tabs(active: ReportKind) -> String {
    let mut html = String::from(r#"<ul class="nav nav-tabs mb-4">"#);
    for kind in [ReportKind::EcomTarget, ReportKind::EcomComparison] {
        let class = if kind == active { "nav-link active" } else { "nav-link" };
        let _ = write!(
            html,
            r#"<li class="nav-item"><a class="{}" href="{}">{}</a></li>"#,
            class,
            attr(&kind.path()),
            esc(kind.label())
        );
    }
    html.push_str("</ul>");
    html
}

/// Target plan table and insight
pub fn target_section(report: &EcomTargetReport) -> String {
    let mut html = String::from(r#"<section class="dashboard-section">"#);
    let _ = write!(html, r#"<h2 class="section-title">2026 Target Plan</h2><p class="text-muted">{}</p>"#, esc(&report.description));

    if report.rows.is_empty() {
        html.push_str(&empty_state("No target plan data available."));
    } else {
        let rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| report.columns.iter().map(|c| r.value(c).to_string()).collect())
            .collect();
        html.push_str(&table(&report.columns, &rows));
    }

    if !report.insight.is_empty() {
        let _ = write!(
            html,
            r#"<div class="insight mt-3"><i class="bi bi-lightbulb"></i> {}</div>"#,
            esc(&report.insight)
        );
    }
    html.push_str("</section>");
    html
}

/// Comparison summary cards and monthly table
pub fn comparison_section(report: &ComparisonReport) -> String {
    let mut html = String::from(r#"<section class="dashboard-section"><h2 class="section-title">2024 vs 2025 Comparison</h2>"#);

    let s = &report.summary;
    html.push_str(r#"<div class="row row-cols-2 row-cols-md-4 g-3 mb-4">"#);
    html.push_str(&stat_card("Total 2024", &s.total_2024));
    html.push_str(&stat_card("Total 2025", &s.total_2025));
    html.push_str(&stat_card("Monthly avg 2025", &s.avg_2025));
    html.push_str(&stat_card(&format!("Best month ({})", s.max_month), &s.max_value));
    html.push_str(&stat_card(&format!("Weakest month ({})", s.min_month), &s.min_value));
    html.push_str(&stat_card("Monthly avg 2024", &s.avg_2024));
    html.push_str("</div>");

    if report.rows.is_empty() {
        html.push_str(&empty_state("No comparison data available."));
    } else {
        html.push_str(r#"<div class="table-responsive"><table class="table table-hover"><thead><tr><th>Months</th><th class="text-end">2024</th><th class="text-end">2025</th><th class="text-end">Δ</th><th class="text-end">Δ % (2025 vs 2024)</th></tr></thead><tbody>"#);
        for row in &report.rows {
            let badge = match row.delta_pct {
                Some(p) if p >= 0.0 => "success",
                Some(_) => "danger",
                None => "secondary",
            };
            let _ = write!(
                html,
                r#"<tr><td>{}</td><td class="text-end">{}</td><td class="text-end">{}</td><td class="text-end">{}</td><td class="text-end"><span class="badge bg-{}">{}</span></td></tr>"#,
                esc(&row.month),
                esc(&row.fmt_2024),
                esc(&row.fmt_2025),
                esc(&row.delta_fmt),
                badge,
                esc(&row.delta_pct_fmt)
            );
        }
        html.push_str("</tbody></table></div>");
    }
    html.push_str("</section>");
    html
}

/// Strategy pillars with their actions
pub fn strategy_section(report: &StrategyReport) -> String {
    let mut html = String::from(r#"<section class="dashboard-section">"#);
    let _ = write!(html, r#"<h2 class="section-title"><i class="bi bi-bullseye"></i> {}</h2>"#, esc(&report.goal_text));

    if report.pillars.is_empty() {
        html.push_str(&empty_state("No strategy plan data available."));
    }

    html.push_str(r#"<div class="row row-cols-1 row-cols-lg-2 g-3">"#);
    for pillar in &report.pillars {
        let _ = write!(
            html,
            r#"<div class="col"><div class="card h-100"><div class="card-header">{} <span class="badge bg-primary ms-1">{}</span></div><ul class="list-group list-group-flush">"#,
            esc(&pillar.name),
            pillar.items.len()
        );
        for entry in &pillar.items {
            let _ = write!(
                html,
                r#"<li class="list-group-item bg-transparent text-light"><div class="fw-semibold">{}</div><div class="small text-muted">{} · {}</div>"#,
                esc(&entry.action),
                esc(&entry.phase),
                esc(&entry.quarter)
            );
            let photos: Vec<_> = entry.photos.iter().filter_map(|p| safe_url(p)).collect();
            if !photos.is_empty() {
                html.push_str(r#"<div class="mt-2">"#);
                for url in photos {
                    let _ = write!(
                        html,
                        r#"<img class="photo-thumb" src="{0}" alt="" loading="lazy" data-url="{0}" onclick="openFullScreen(this.dataset.url)">"#,
                        url
                    );
                }
                html.push_str("</div>");
            }
            html.push_str("</li>");
        }
        html.push_str("</ul></div></div>");
    }
    html.push_str("</div></section>");
    html
}

/// Roadmap board, one column per quarter
pub fn roadmap_section(report: &RoadmapReport) -> String {
    let mut html = String::from(r#"<section class="dashboard-section"><h2 class="section-title"><i class="bi bi-signpost-split"></i> Roadmap</h2>"#);

    if report.quarters.is_empty() {
        html.push_str(&empty_state("No roadmap data available."));
    }

    html.push_str(r#"<div class="row row-cols-1 row-cols-md-2 row-cols-xl-4 g-3">"#);
    for quarter in &report.quarters {
        let _ = write!(
            html,
            r#"<div class="col"><div class="card h-100"><div class="card-header">{}</div><div class="card-body">"#,
            esc(&quarter.name)
        );
        for entry in &quarter.items {
            let _ = write!(
                html,
                r#"<div class="mb-3"><span class="badge bg-secondary me-1">{}</span>{}<div class="small text-muted"><i class="bi bi-person"></i> {}</div></div>"#,
                esc(&entry.activity_id),
                esc(&entry.topic),
                esc(&entry.owner)
            );
        }
        html.push_str("</div></div></div>");
    }
    html.push_str("</div></section>");
    html
}

pub fn dashboard(report: &DashboardReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::Dashboard));

    let mut cards = String::from(r#"<div class="row row-cols-1 row-cols-lg-2 g-3 mb-4">"#);
    for card in &report.cards {
        let _ = write!(
            cards,
            r#"<div class="col"><div class="card h-100"><div class="card-header d-flex justify-content-between"><a href="{}">{}</a>"#,
            attr(&card.link),
            esc(&card.title)
        );
        if let Some(download) = &card.download {
            let _ = write!(cards, r#"<a href="{}" title="Download"><i class="bi bi-download"></i></a>"#, attr(download));
        }
        cards.push_str(r#"</div><ul class="list-group list-group-flush">"#);
        if card.rows.is_empty() {
            cards.push_str(&empty_state("No data"));
        }
        for row in &card.rows {
            let _ = write!(
                cards,
                r#"<li class="list-group-item bg-transparent text-light d-flex justify-content-between"><span>{}</span><span class="fw-semibold">{}</span></li>"#,
                esc(&row.label),
                esc(&row.value)
            );
        }
        cards.push_str("</ul></div></div>");
    }
    cards.push_str("</div>");

    page.push_html(&cards);
    page.push_html(&strategy_section(&report.strategy));
    page.push_html(&roadmap_section(&report.roadmap));
    page
}

pub fn ecom_target(report: &EcomTargetReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::EcomTarget));
    page.push_html(&ecom_tabs(ReportKind::EcomTarget));
    page.push_html(&target_section(report));
    page
}

pub fn ecom_comparison(report: &ComparisonReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::EcomComparison));
    page.push_html(&ecom_tabs(ReportKind::EcomComparison));
    page.push_chart("comparison-chart", &report.chart);
    page.push_html(&comparison_section(report));
    page
}

pub fn strategy(report: &StrategyReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::StrategyPlan));
    page.push_html(&strategy_section(report));
    page
}

pub fn roadmap(report: &RoadmapReport) -> Page {
    let mut page = Page::new("Roadmap", Some(ReportKind::Roadmap));
    page.push_html(&roadmap_section(report));
    page
}

pub fn swot(report: &SwotReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::Swot));
    let mut html = String::new();

    if !report.key_insights.is_empty() {
        html.push_str(r#"<section class="dashboard-section"><h2 class="section-title">Key Insights</h2>"#);
        for insight in &report.key_insights {
            let _ = write!(
                html,
                r#"<div class="insight mb-2"><div class="fw-semibold">{}</div>{}</div>"#,
                esc(&insight.title),
                esc(&insight.content)
            );
        }
        html.push_str("</section>");
    }

    if report.sections.is_empty() {
        html.push_str(&empty_state("No SWOT data available."));
    }

    html.push_str(r#"<div class="row row-cols-1 row-cols-lg-2 g-3">"#);
    for section in &report.sections {
        let _ = write!(
            html,
            r#"<div class="col"><div class="card h-100"><div class="card-header">{}</div><div class="card-body">"#,
            esc(&section.name)
        );
        for point in &section.items {
            let _ = write!(
                html,
                r#"<div class="mb-3"><div class="fw-semibold"><span class="badge bg-secondary me-1">{}</span>{}</div><div class="small"><span class="text-muted">2025:</span> {}</div><div class="small"><span class="text-muted">2026:</span> {}</div></div>"#,
                esc(&point.id),
                esc(&point.title),
                esc(&point.details_2025),
                esc(&point.details_2026)
            );
        }
        html.push_str("</div></div></div>");
    }
    html.push_str("</div>");

    page.push_html(&html);
    page
}

pub fn cost_per_x(report: &CostPerXReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::CostPerX));
    let mut html = String::from(r#"<section class="dashboard-section">"#);

    if report.rows.is_empty() {
        html.push_str(&empty_state("No cost data available."));
    } else {
        let rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| vec![r.cost_per_x.clone(), r.facts.clone(), r.why.clone(), r.improve.clone()])
            .collect();
        html.push_str(&table(&["Cost per X", "Facts", "Why?", "What to Improve More?"], &rows));
    }
    html.push_str("</section>");

    page.push_html(&html);
    page
}

fn format_avg(avg: Option<f64>) -> String {
    avg.map(|a| format!("{:.1}%", a)).unwrap_or_else(|| DASH.to_string())
}

fn okr_team_card(team: &OkrTeam, columns: &[String]) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="card"><div class="card-header d-flex justify-content-between"><span>{}</span><span class="small">2025: {} · 2026: {}</span></div><div class="card-body">"#,
        esc(&team.team),
        esc(&format_avg(team.avg_2025)),
        esc(&format_avg(team.avg_2026))
    );

    for objective in &team.objectives {
        let _ = write!(html, r#"<h3 class="h6 mt-2">{}</h3><div class="row g-3">"#, esc(&objective.objective));
        for (year, items) in [("2025", &objective.items_2025), ("2026", &objective.items_2026)] {
            let _ = write!(html, r#"<div class="col-md-6"><div class="text-muted small mb-1">{}</div>"#, year);
            if items.is_empty() {
                html.push_str(r#"<div class="text-muted small">—</div>"#);
            } else {
                let rows: Vec<Vec<String>> = items
                    .iter()
                    .map(|r| columns.iter().map(|c| r.value(c).to_string()).collect())
                    .collect();
                html.push_str(&table(columns, &rows));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div></div>");
    html
}

pub fn okr(report: &OkrReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::Okr));
    page.push_chart("okr-chart", &report.chart);

    if report.teams.is_empty() {
        page.push_html(&empty_state("No OKR data available."));
    }
    for team in &report.teams {
        page.push_html(&okr_team_card(team, &report.columns));
    }
    page
}

pub fn fna(report: &FnaReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::FnaPerformance));
    let mut html = String::from(r#"<section class="dashboard-section"><div class="mb-3">"#);

    for meta in &report.categories {
        let _ = write!(
            html,
            r#"<span class="me-3"><span class="badge-dot" style="background: {}"></span>{} ({})</span>"#,
            attr(&meta.color),
            esc(&meta.category),
            meta.count
        );
    }
    html.push_str("</div>");

    if report.rows.is_empty() {
        html.push_str(&empty_state("No FNA performance data available."));
    } else {
        html.push_str(r#"<div class="table-responsive"><table class="table table-hover"><thead><tr>"#);
        for column in &report.columns {
            let _ = write!(html, "<th>{}</th>", esc(column));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &report.rows {
            let color = report.color_for(crate::reports::fna::category_of(row));
            let _ = write!(html, r#"<tr style="border-left: 4px solid {}">"#, attr(color));
            for column in &report.columns {
                let _ = write!(html, "<td>{}</td>", esc(row.value(column)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></div>");
    }
    html.push_str("</section>");

    page.push_html(&html);
    page
}

pub fn operations(report: &OperationHealthReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::OperationHealth));

    let mut summary = String::from(r#"<div class="row row-cols-2 row-cols-md-4 g-3 mb-4">"#);
    for status in &report.status_counts {
        summary.push_str(&stat_card(&status.label, &status.count.to_string()));
    }
    summary.push_str("</div>");
    page.push_html(&summary);
    page.push_chart("status-chart", &report.chart);

    let mut html = String::new();
    for insight in &report.insights {
        let text: Vec<&str> = insight
            .iter()
            .filter(|(k, v)| *k != "Funnel Stage" && !v.trim().is_empty())
            .map(|(_, v)| v)
            .collect();
        let _ = write!(html, r#"<div class="insight mb-2">{}</div>"#, esc(&text.join(" · ")));
    }

    if report.stages.is_empty() {
        html.push_str(&empty_state("No operation health data available."));
    }
    let columns: Vec<&String> = report
        .columns
        .iter()
        .filter(|c| c.as_str() != "Funnel Stage")
        .collect();
    for stage in &report.stages {
        let _ = write!(html, r#"<section class="dashboard-section"><h2 class="section-title">{}</h2>"#, esc(&stage.name));
        let rows: Vec<Vec<String>> = stage
            .items
            .iter()
            .map(|r| columns.iter().map(|c| r.value(c).to_string()).collect())
            .collect();
        html.push_str(&table(&columns, &rows));
        html.push_str("</section>");
    }

    page.push_html(&html);
    page
}

pub fn bob(report: &BobReport) -> Page {
    let mut page = Page::new(&report.title, Some(ReportKind::Bob));
    let s = &report.summary;

    let mut summary = String::new();
    let _ = write!(summary, r#"<p class="text-muted">{}</p><div class="row row-cols-2 row-cols-md-5 g-3 mb-4">"#, esc(&report.description));
    summary.push_str(&stat_card("BOB orders", &s.total_bob));
    summary.push_str(&stat_card("Self orders", &s.total_self));
    summary.push_str(&stat_card("Grand total", &s.total_grand));
    summary.push_str(&stat_card("Avg CS%", &s.avg_cs));
    summary.push_str(&stat_card(&format!("Best month ({})", s.best_month), &s.best_month_value));
    summary.push_str("</div>");
    page.push_html(&summary);
    page.push_chart("bob-chart", &report.chart);

    let mut html = String::from(r#"<section class="dashboard-section">"#);
    if report.rows.is_empty() {
        html.push_str(&empty_state("No BOB data available."));
    } else {
        let rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.month.clone(),
                    r.bob_order.clone(),
                    r.self_order.clone(),
                    r.grand_total.clone(),
                    r.cs_percent.clone(),
                ]
            })
            .collect();
        html.push_str(&table(&["Months", "BOB Order", "Self Order", "Grand Total", "CS%"], &rows));
    }
    html.push_str("</section>");

    if !report.reviews.is_empty() {
        html.push_str(r#"<section class="dashboard-section"><h2 class="section-title">Review</h2><div class="row row-cols-1 row-cols-lg-3 g-3">"#);
        for (key, question) in REVIEW_SECTIONS {
            let _ = write!(html, r#"<div class="col"><div class="card h-100"><div class="card-header">{}</div><ul class="list-group list-group-flush">"#, esc(question));
            for line in report.reviews.iter().flat_map(|r| r.section(key)) {
                let _ = write!(html, r#"<li class="list-group-item bg-transparent text-light">{}</li>"#, esc(line));
            }
            html.push_str("</ul></div></div>");
        }
        html.push_str("</div></section>");
    }

    page.push_html(&html);
    page
}
