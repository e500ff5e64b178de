//! Before/since period lines, one subplot per state

use serde_json::{json, Value};

use super::utils::colors::categorical_color;
use super::Figure;
use crate::compare::{PeriodComparison, SeriesReport};

/// Line plot configuration
#[derive(Debug, Clone)]
pub struct LinePlotConfig {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            title: "Yearly Tornado Counts by State and Year".to_string(),
            x_title: "Year".to_string(),
            y_title: "Count".to_string(),
        }
    }
}

/// Side-by-side subplots, each with a "before" and a "since" line
pub fn period_lines_figure(periods: &[PeriodComparison], config: &LinePlotConfig) -> Figure {
    let columns = periods.len().max(1);
    let mut layout = json!({
        "title": { "text": config.title },
        "grid": { "rows": 1, "columns": columns, "pattern": "independent" },
        "annotations": [],
    });

    let mut traces = Vec::new();
    for (idx, period) in periods.iter().enumerate() {
        let suffix = axis_suffix(idx);
        layout[format!("xaxis{suffix}")] = json!({ "title": { "text": config.x_title } });
        layout[format!("yaxis{suffix}")] = json!({ "title": { "text": config.y_title } });
        if let Some(annotations) = layout["annotations"].as_array_mut() {
            annotations.push(subplot_title(period.state.as_str(), idx, columns));
        }

        for (series_idx, series) in [&period.before, &period.since].into_iter().enumerate() {
            traces.push(line_trace(series, &suffix, series_idx));
        }
    }

    let mut figure = Figure::new(layout);
    for trace in traces {
        figure.push(trace);
    }
    figure
}

/// Plotly names the first axis pair `x`/`y`, later ones `x2`/`y2`, ...
fn axis_suffix(idx: usize) -> String {
    if idx == 0 {
        String::new()
    } else {
        (idx + 1).to_string()
    }
}

fn line_trace(series: &SeriesReport, suffix: &str, series_idx: usize) -> Value {
    let years: Vec<_> = series.yearly.keys().copied().collect();
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": series.label,
        "x": years,
        "y": series.counts(),
        "xaxis": format!("x{suffix}"),
        "yaxis": format!("y{suffix}"),
        "line": { "color": categorical_color(series_idx).css() },
    })
}

fn subplot_title(text: &str, idx: usize, columns: usize) -> Value {
    json!({
        "text": text,
        "showarrow": false,
        "xref": "paper",
        "yref": "paper",
        "x": (idx as f64 + 0.5) / columns as f64,
        "y": 1.0,
        "xanchor": "center",
        "yanchor": "bottom",
    })
}
