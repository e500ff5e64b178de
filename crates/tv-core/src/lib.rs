//! Core functionality for the tornado explorer
//!
//! This crate provides the domain model, the immutable session context
//! loaded at startup, and the filter engine every view is driven by.

pub mod context;
pub mod filter;
pub mod model;
pub mod settings;

// Re-export commonly used types
pub use context::{AreaTable, SessionContext};
pub use filter::{filter, EventFilter, FilteredEventSet, MagnitudeRange, StateSelection};
pub use model::{
    GeoPoint, Magnitude, PathShape, StateAreaFact, StateBoundary, StateCode, TornadoEvent, Year,
    UNKNOWN_MAGNITUDE,
};
pub use settings::{DashboardSettings, MapStyle};
pub use data::DataSource;

pub mod data {
    use arrow::datatypes::SchemaRef;
    use arrow::record_batch::RecordBatch;

    /// Trait for tabular sources read once at startup
    pub trait DataSource {
        /// Get the schema of this data source
        fn schema(&self) -> SchemaRef;

        /// All rows of the source
        fn record_batch(&self) -> &RecordBatch;

        /// Get total row count
        fn row_count(&self) -> usize {
            self.record_batch().num_rows()
        }

        /// Get the source name/path
        fn source_name(&self) -> &str;

        /// Render the first `rows` rows as a text table
        fn preview(&self, rows: usize) -> anyhow::Result<String> {
            let batch = self.record_batch();
            let head = batch.slice(0, rows.min(batch.num_rows()));
            Ok(arrow::util::pretty::pretty_format_batches(&[head])?.to_string())
        }
    }
}
