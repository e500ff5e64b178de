//! Utilities for figure builders

pub mod colors;

// Re-export commonly used items
pub use colors::{categorical_color, Rgb};
