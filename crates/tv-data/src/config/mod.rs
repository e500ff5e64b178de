//! Loader and dashboard configuration

pub mod file_config;
pub mod null_handling;

pub use file_config::*;
pub use null_handling::*;
