//! Plotly-compatible figure builders
//!
//! Every builder produces a [`Figure`]: a list of trace objects plus a
//! layout object, serializable straight to the JSON a Plotly front end
//! renders.

pub mod bar;
pub mod histogram;
pub mod line;
pub mod map;
pub mod scatter;
pub mod utils;

pub use bar::{area_rate_figure, stacked_counts_figure, BarChartConfig};
pub use histogram::{comparison_histogram, HistogramConfig};
pub use line::{period_lines_figure, LinePlotConfig};
pub use map::map_figure;
pub use scatter::{casualty_scatter, ScatterPlotConfig};

use serde::Serialize;
use serde_json::{json, Value};

/// A chart ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn new(layout: Value) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn push(&mut self, trace: Value) {
        self.data.push(trace);
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }
}

/// Layout with a title and both axis titles
fn titled_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": x_title } },
        "yaxis": { "title": { "text": y_title } },
    })
}
