pub mod boundary_source;
pub mod csv_source;

pub use boundary_source::load_boundaries;
pub use csv_source::CsvSource;
