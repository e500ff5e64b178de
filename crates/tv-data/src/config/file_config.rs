//! Dashboard configuration file

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tv_core::{DashboardSettings, EventFilter, StateCode};

use super::null_handling::NullConfig;
use crate::DataError;

/// Locations of the input tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePaths {
    /// Event table (CSV)
    pub events: PathBuf,

    /// State boundaries (GeoJSON feature collection)
    pub boundaries: PathBuf,

    /// State land areas (CSV)
    pub areas: PathBuf,

    /// Feature property holding the state code in the boundary file
    pub boundary_key: String,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            events: PathBuf::from("data/us_tornado_dataset_1950_2021.csv"),
            boundaries: PathBuf::from("data/us_states.geojson"),
            areas: PathBuf::from("data/sq_mi_agg.csv"),
            boundary_key: "STUSPS".to_string(),
        }
    }
}

/// The two states put side by side on the comparison page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub state_a: StateCode,
    pub state_b: StateCode,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            state_a: StateCode::new("TX"),
            state_b: StateCode::new("OK"),
        }
    }
}

/// Everything a dashboard run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sources: SourcePaths,

    /// Null handling applied to every CSV source
    pub null_config: NullConfig,

    pub filter: EventFilter,

    pub compare: CompareConfig,

    pub settings: DashboardSettings,

    /// Directory the figures and report are written to
    pub output_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: SourcePaths::default(),
            null_config: NullConfig::default(),
            filter: EventFilter::default(),
            compare: CompareConfig::default(),
            settings: DashboardSettings::default(),
            output_dir: PathBuf::from("dashboard"),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no run could use
    pub fn validate(&self) -> Result<(), DataError> {
        let alpha = self.settings.significance_level;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(DataError::Config(format!(
                "significance_level must be in (0, 1), got {alpha}"
            )));
        }
        if self.settings.top_states == 0 {
            return Err(DataError::Config("top_states must be at least 1".to_string()));
        }
        if self.sources.boundary_key.trim().is_empty() {
            return Err(DataError::Config("boundary_key must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tv_core::{MagnitudeRange, StateSelection};

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.compare, CompareConfig::default());
        assert_eq!(config.filter, EventFilter::default());
        assert_eq!(config.settings.top_states, 8);
        assert_eq!(config.sources.boundary_key, "STUSPS");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_filter_section() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{
                "filter": {
                    "states": { "only": ["tx", "OK"] },
                    "magnitude": { "min": 2, "max": 3 }
                },
                "compare": { "state_a": "ks" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.filter.states, StateSelection::only(["TX", "OK"]));
        assert_eq!(config.filter.magnitude, Some(MagnitudeRange::new(2, 3)));
        assert_eq!(config.compare.state_a, StateCode::new("KS"));
        assert_eq!(config.compare.state_b, StateCode::new("OK"));
    }

    #[test]
    fn test_invalid_significance_rejected() {
        let mut config = DashboardConfig::default();
        config.settings.significance_level = 1.5;
        assert!(matches!(config.validate(), Err(DataError::Config(_))));
    }
}
