//! Plotly figures
//!
//! [`ChartData`] is translated into a Plotly figure (`data` + `layout`)
//! and drawn client-side with `Plotly.newPlot`.

use serde_json::{json, Value};

use super::attr;
use crate::reports::{ChartData, SeriesKind};

const PALETTE: [&str; 4] = ["#5d6bff", "#2CCFBD", "#ffb547", "#ff6b8b"];

/// Plotly figure for a chart
pub fn figure(chart: &ChartData) -> Value {
    let traces: Vec<Value> = chart
        .series
        .iter()
        .enumerate()
        .map(|(idx, series)| {
            let color = PALETTE[idx % PALETTE.len()];
            let axis = if series.secondary_axis { "y2" } else { "y" };
            match series.kind {
                SeriesKind::Pie => json!({
                    "type": "pie",
                    "name": series.name,
                    "labels": chart.labels,
                    "values": series.values,
                    "hole": 0.45,
                    "marker": { "colors": PALETTE },
                }),
                SeriesKind::Bar => json!({
                    "type": "bar",
                    "name": series.name,
                    "x": chart.labels,
                    "y": series.values,
                    "yaxis": axis,
                    "marker": { "color": color },
                }),
                SeriesKind::Line => json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": series.name,
                    "x": chart.labels,
                    "y": series.values,
                    "yaxis": axis,
                    "line": { "color": color, "width": 3 },
                }),
            }
        })
        .collect();

    let barmode = if chart.stacked { "stack" } else { "group" };
    let mut layout = json!({
        "title": { "text": chart.title },
        "barmode": barmode,
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "font": { "color": "#f8fbff" },
        "legend": { "orientation": "h" },
        "margin": { "t": 48, "r": 24, "b": 48, "l": 56 },
        "xaxis": { "gridcolor": "rgba(255,255,255,0.06)" },
        "yaxis": { "gridcolor": "rgba(255,255,255,0.06)" },
    });

    if chart.series.iter().any(|s| s.secondary_axis) {
        layout["yaxis2"] = json!({
            "overlaying": "y",
            "side": "right",
            "ticksuffix": "%",
            "showgrid": false,
        });
    }

    json!({ "data": traces, "layout": layout })
}

/// JSON safe to inline inside a `<script>` element
pub fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Container div and drawing script for a chart
pub fn chart_block(id: &str, chart: &ChartData) -> (String, String) {
    let div = format!(r#"<div id="{}" class="chart"></div>"#, attr(id));
    let script = format!(
        "<script>(function () {{ const fig = {}; Plotly.newPlot({}, fig.data, fig.layout, {{responsive: true, displaylogo: false}}); }})();</script>\n",
        script_json(&figure(chart)),
        script_json(&Value::String(id.to_string())),
    );
    (div, script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ChartSeries;

    fn bob_chart() -> ChartData {
        ChartData {
            title: "BOB".to_string(),
            labels: vec!["Jan".into(), "Feb".into()],
            series: vec![
                ChartSeries::bar("BOB Order", vec![1.0, 2.0]),
                ChartSeries::line("CS%", vec![24.0, 25.0]).on_secondary_axis(),
            ],
            stacked: true,
        }
    }

    #[test]
    fn test_figure_traces() {
        let fig = figure(&bob_chart());
        assert_eq!(fig["data"][0]["type"], "bar");
        assert_eq!(fig["data"][1]["type"], "scatter");
        assert_eq!(fig["data"][1]["yaxis"], "y2");
        assert_eq!(fig["layout"]["barmode"], "stack");
        assert_eq!(fig["layout"]["yaxis2"]["side"], "right");
    }

    #[test]
    fn test_pie_uses_labels() {
        let chart = ChartData {
            title: "Status".into(),
            labels: vec!["On Track".into()],
            series: vec![ChartSeries::pie("Status", vec![3.0])],
            stacked: false,
        };
        let fig = figure(&chart);
        assert_eq!(fig["data"][0]["labels"][0], "On Track");
        assert!(fig["layout"].get("yaxis2").is_none());
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        let value = json!({ "label": "</script><b>" });
        assert!(!script_json(&value).contains("</script>"));
    }
}
