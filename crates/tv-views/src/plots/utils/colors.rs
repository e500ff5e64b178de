//! Color utilities for figures

use std::fmt;

/// An opaque color, rendered as a CSS `rgb(...)` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Rgb {
    pub fn css(&self) -> String {
        self.to_string()
    }
}

/// Get a categorical color from a palette
pub fn categorical_color(index: usize) -> Rgb {
    const PALETTE: &[Rgb] = &[
        Rgb(100, 150, 250), // Blue
        Rgb(250, 150, 100), // Orange
        Rgb(150, 250, 100), // Green
        Rgb(250, 100, 150), // Pink
        Rgb(150, 100, 250), // Purple
        Rgb(250, 250, 100), // Yellow
        Rgb(100, 250, 250), // Cyan
        Rgb(250, 100, 100), // Red
        Rgb(160, 160, 160), // Gray
    ];
    PALETTE[index % PALETTE.len()]
}
