//! Data loading for the tornado explorer
//!
//! Reads the event table, the state area table and the state boundary
//! collection from disk once, and hands them over as an immutable
//! [`SessionContext`].

pub mod config;
pub mod schema;
pub mod sources;
pub mod tables;

use arrow::error::ArrowError;
use thiserror::Error;
use tracing::info;

use tv_core::{AreaTable, DataSource, SessionContext};

// Re-exports
pub use config::{CompareConfig, DashboardConfig, NullConfig, SourcePaths};
pub use sources::{load_boundaries, CsvSource};
pub use tables::{decode_areas, decode_events};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name}: invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        source_name: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}

impl From<geojson::Error> for DataError {
    fn from(error: geojson::Error) -> Self {
        DataError::GeoJson(error.to_string())
    }
}

/// Load every input table and build the session context.
///
/// Any failure here is fatal: the explorer has nothing to show without
/// its events, boundaries and areas.
pub fn load_session(paths: &SourcePaths, null_config: &NullConfig) -> Result<SessionContext, DataError> {
    let event_source = CsvSource::open(&paths.events, schema::event_schema(), null_config)?;
    let events = decode_events(&event_source)?;
    info!("Loaded {} tornado events from {}", events.len(), event_source.source_name());

    let area_source = CsvSource::open(&paths.areas, schema::area_schema(), null_config)?;
    let areas = AreaTable::new(decode_areas(&area_source)?);
    info!("Loaded {} state areas from {}", areas.len(), area_source.source_name());

    let boundaries = load_boundaries(&paths.boundaries, &paths.boundary_key)?;
    info!("Loaded {} state boundaries from {:?}", boundaries.len(), paths.boundaries);

    Ok(SessionContext::new(events, boundaries, areas))
}
