//! Bar chart implementations

use serde_json::{json, Value};

use super::utils::colors::categorical_color;
use super::{titled_layout, Figure};
use crate::aggregate::{AreaRate, StackedCounts};

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    pub title: String,

    /// Category axis title (X-axis)
    pub x_title: String,

    /// Value axis title (Y-axis)
    pub y_title: String,

    /// Continuous color scale for value-colored bars
    pub color_scale: String,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            title: "Tornadoes per Year by State".to_string(),
            x_title: "Year".to_string(),
            y_title: "Total Tornadoes".to_string(),
            color_scale: "Jet".to_string(),
        }
    }
}

impl BarChartConfig {
    /// Defaults for the per-area ranking
    pub fn area_rate() -> Self {
        Self {
            title: "Tornadoes per Square Mile".to_string(),
            x_title: "State".to_string(),
            y_title: "Tornadoes per Square Mile".to_string(),
            ..Self::default()
        }
    }
}

/// One stacked trace per state group, summed per year
pub fn stacked_counts_figure(counts: &StackedCounts, config: &BarChartConfig) -> Figure {
    let mut layout = titled_layout(&config.title, &config.x_title, &config.y_title);
    layout["barmode"] = json!("stack");
    let mut figure = Figure::new(layout);

    for (idx, group) in counts.groups.iter().enumerate() {
        let series = counts.group_series(group);
        let years: Vec<_> = series.keys().copied().collect();
        let totals: Vec<_> = series.values().copied().collect();
        figure.push(json!({
            "type": "bar",
            "name": group,
            "x": years,
            "y": totals,
            "marker": {
                "color": categorical_color(idx).css(),
                "line": { "width": 0 },
            },
        }));
    }
    figure
}

/// States ranked by tornadoes per square mile, colored by total count
pub fn area_rate_figure(rates: &[AreaRate], config: &BarChartConfig) -> Figure {
    let states: Vec<&str> = rates.iter().map(|r| r.state.as_str()).collect();
    let values: Vec<f64> = rates.iter().map(|r| r.rate).collect();
    let totals: Vec<usize> = rates.iter().map(|r| r.total_events).collect();

    let mut figure = Figure::new(titled_layout(&config.title, &config.x_title, &config.y_title));
    figure.push(bar_trace(&states, &values, json!({
        "color": totals,
        "colorscale": config.color_scale,
        "showscale": true,
        "colorbar": { "title": { "text": "Total Tornadoes" } },
    })));
    figure
}

fn bar_trace(categories: &[&str], values: &[f64], marker: Value) -> Value {
    json!({
        "type": "bar",
        "x": categories,
        "y": values,
        "marker": marker,
    })
}
