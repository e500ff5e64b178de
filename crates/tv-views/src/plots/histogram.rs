//! Histogram of yearly counts for two compared series

use serde_json::json;

use super::{titled_layout, Figure};
use crate::compare::SeriesReport;

/// Configuration for histogram view
#[derive(Debug, Clone)]
pub struct HistogramConfig {
    pub title: String,

    /// Colors of the first and second series
    pub colors: [String; 2],

    /// Bar opacity, so overlapping bins stay readable
    pub opacity: f64,

    pub bar_gap: f64,
    pub bar_group_gap: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            title: "Histogram of Tornado Counts Per Year".to_string(),
            colors: ["blue".to_string(), "red".to_string()],
            opacity: 0.75,
            bar_gap: 0.2,
            bar_group_gap: 0.1,
        }
    }
}

/// Overlaid distributions of two series' yearly counts, bins chosen by the renderer
pub fn comparison_histogram(a: &SeriesReport, b: &SeriesReport, config: &HistogramConfig) -> Figure {
    let mut layout = titled_layout(&config.title, "Count", "Frequency");
    layout["bargap"] = json!(config.bar_gap);
    layout["bargroupgap"] = json!(config.bar_group_gap);
    let mut figure = Figure::new(layout);

    for (series, color) in [a, b].into_iter().zip(&config.colors) {
        figure.push(json!({
            "type": "histogram",
            "name": series.label,
            "x": series.counts(),
            "opacity": config.opacity,
            "autobinx": true,
            "marker": { "color": color },
        }));
    }
    figure
}
