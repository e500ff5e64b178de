//! Dashboard presentation settings

use serde::{Deserialize, Serialize};

use crate::model::Year;

/// Number of states shown by name in the stacked yearly chart
pub const DEFAULT_TOP_STATES: usize = 8;

/// Threshold below which a p-value rejects equal means
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// First year of the "since" period in before/since comparisons
pub const DEFAULT_PERIOD_SPLIT_YEAR: Year = 2000;

/// Settings shared by the aggregation, statistics and figure builders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// States kept by name before the rest collapse into "Other"
    pub top_states: usize,

    /// Significance level for the t-tests
    pub significance_level: f64,

    /// Period comparisons split at this year (inclusive on the "since" side)
    pub period_split_year: Year,

    /// Map figure styling
    pub map: MapStyle,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            top_states: DEFAULT_TOP_STATES,
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            period_split_year: DEFAULT_PERIOD_SPLIT_YEAR,
            map: MapStyle::default(),
        }
    }
}

/// Map styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub marker_size: f64,
    pub line_width: f64,
    pub line_color: String,
    pub start_color: String,
    pub end_color: String,
    pub point_color: String,
    pub base_fill: String,
    pub base_outline: String,
    pub base_opacity: f64,
    pub tile_style: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            marker_size: 4.0,
            line_width: 2.0,
            line_color: "Blue".to_string(),
            start_color: "Green".to_string(),
            end_color: "Red".to_string(),
            point_color: "Blue".to_string(),
            base_fill: "rgb(204, 204, 204)".to_string(),
            base_outline: "Blue".to_string(),
            base_opacity: 0.5,
            tile_style: "carto-positron".to_string(),
            center_lat: 37.0902,
            center_lon: -95.7129,
            zoom: 3.0,
            width: 800,
            height: 1000,
        }
    }
}
