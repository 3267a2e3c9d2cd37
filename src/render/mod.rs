//! HTML Rendering
//!
//! Pages are assembled from the shared layout in `templates/base.html`.
//! Every piece of sheet text goes through [`esc`] or [`attr`]; chart data
//! is embedded as JSON and drawn by Plotly in the browser.

pub mod charts;
pub mod pages;
pub mod standalone;

use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fmt::Write;

use crate::reports::{ChartData, ReportKind};

const BASE_TEMPLATE: &str = include_str!("templates/base.html");

/// Whether the page is served live or saved as a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Page,
    /// Standalone file: no navigation, no download buttons
    Download,
}

/// Escape text content
pub fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Escape a double-quoted attribute value
pub fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Only http(s) and root-relative links are emitted as `href`/`src`
pub fn safe_url(url: &str) -> Option<Cow<'_, str>> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") || trimmed.starts_with('/') {
        Some(attr(trimmed))
    } else {
        None
    }
}

/// File name for a downloaded report, e.g. `roadmap_20260114_093000.html`
pub fn download_filename(kind: ReportKind, at: DateTime<Local>) -> String {
    format!("{}_{}.html", kind.download_name(), at.format("%Y%m%d_%H%M%S"))
}

/// A page under construction
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    kind: Option<ReportKind>,
    content: String,
    scripts: String,
}

impl Page {
    pub fn new(title: impl Into<String>, kind: Option<ReportKind>) -> Self {
        Self {
            title: title.into(),
            kind,
            content: String::new(),
            scripts: String::new(),
        }
    }

    /// Append raw, already escaped HTML
    pub fn push_html(&mut self, html: &str) {
        self.content.push_str(html);
    }

    /// Append a chart container and its drawing script
    pub fn push_chart(&mut self, id: &str, chart: &ChartData) {
        if chart.is_empty() {
            return;
        }
        let (div, script) = charts::chart_block(id, chart);
        self.content.push_str(&div);
        self.scripts.push_str(&script);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn scripts(&self) -> &str {
        &self.scripts
    }

    /// Render the full document
    pub fn render(&self, mode: RenderMode) -> String {
        let nav = match mode {
            RenderMode::Page => nav_bar(self.kind),
            RenderMode::Download => String::new(),
        };

        let mut header = String::new();
        let _ = write!(
            header,
            r#"<div class="d-flex justify-content-between align-items-center mb-3"><h1 class="h3 mb-0">{}</h1>"#,
            esc(&self.title)
        );
        if mode == RenderMode::Page {
            if let Some(path) = self.kind.and_then(ReportKind::download_path) {
                let _ = write!(
                    header,
                    r#"<a class="btn btn-outline-light btn-sm" href="{}"><i class="bi bi-download"></i> Download</a>"#,
                    attr(&path)
                );
            }
        }
        header.push_str("</div>");

        let footer = match mode {
            RenderMode::Page => format!("Strategic Console v{}", env!("CARGO_PKG_VERSION")),
            RenderMode::Download => format!(
                "Downloaded on {} | Strategic Console",
                Local::now().format("%Y-%m-%d %H:%M")
            ),
        };

        fill_template(
            BASE_TEMPLATE,
            &[
                ("TITLE", esc(&self.title).as_ref()),
                ("NAV", nav.as_str()),
                ("FOOTER", esc(&footer).as_ref()),
                ("SCRIPTS", self.scripts.as_str()),
                ("CONTENT", format!("{}{}", header, self.content).as_str()),
            ],
        )
    }
}

/// Substitute `{{{NAME}}}` markers in a single pass over the template.
///
/// Inserted values are never rescanned, so sheet text that happens to
/// contain a marker stays literal.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find("{{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let value = after
            .find("}}}")
            .and_then(|end| values.iter().find(|(name, _)| *name == &after[..end]).map(|(_, v)| (end, *v)));
        match value {
            Some((end, v)) => {
                out.push_str(v);
                rest = &after[end + 3..];
            }
            None => {
                out.push_str("{{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn nav_bar(active: Option<ReportKind>) -> String {
    let mut nav = String::from(r#"<nav class="console-nav">"#);
    for kind in ReportKind::ALL {
        let class = if Some(kind) == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            r#"<a href="{}"{}>{}</a>"#,
            attr(&kind.path()),
            class,
            esc(kind.label())
        );
    }
    nav.push_str("</nav>");
    nav
}

/// Render a plain table; `cells` are escaped here
pub fn table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut html = String::from(r#"<div class="table-responsive"><table class="table table-hover"><thead><tr>"#);
    for header in headers {
        let _ = write!(html, "<th>{}</th>", esc(header.as_ref()));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", esc(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

/// Placeholder shown when a sheet has no data
pub fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="text-muted fst-italic py-4 text-center"><i class="bi bi-inbox"></i> {}</div>"#,
        esc(message)
    )
}
