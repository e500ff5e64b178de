//! Scatter plot of per-state casualties

use serde_json::json;

use super::utils::colors::categorical_color;
use super::{titled_layout, Figure};
use crate::aggregate::StateCasualties;

/// Configuration for scatter plot
#[derive(Debug, Clone)]
pub struct ScatterPlotConfig {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub marker_size: f64,
}

impl Default for ScatterPlotConfig {
    fn default() -> Self {
        Self {
            title: "Total Injuries vs Total Fatalities for each State".to_string(),
            x_title: "Total Injuries".to_string(),
            y_title: "Total Fatalities".to_string(),
            marker_size: 30.0,
        }
    }
}

/// One point per state, injuries against fatalities
pub fn casualty_scatter(states: &[StateCasualties], config: &ScatterPlotConfig) -> Figure {
    let mut layout = titled_layout(&config.title, &config.x_title, &config.y_title);
    layout["legend"] = json!({ "title": { "text": "State" } });
    let mut figure = Figure::new(layout);

    for (idx, state) in states.iter().enumerate() {
        figure.push(json!({
            "type": "scatter",
            "mode": "markers",
            "name": state.state.as_str(),
            "x": [state.injuries],
            "y": [state.fatalities],
            "marker": {
                "size": config.marker_size,
                "color": categorical_color(idx).css(),
            },
        }));
    }
    figure
}
