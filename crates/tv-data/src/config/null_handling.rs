//! Which raw CSV cells load as missing values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Missing-value markers for the tabular sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Cell texts read as missing in every column
    pub patterns: Vec<String>,

    /// Extra markers for single columns, e.g. `{"mag": ["-9"]}`
    pub column_patterns: BTreeMap<String, Vec<String>>,

    pub trim_whitespace: bool,

    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: ["", "NA", "N/A", "NaN", "null", "None"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            column_patterns: BTreeMap::new(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Whether `value` from `column` loads as missing
    pub fn is_null(&self, column: &str, value: &str) -> bool {
        let value = if self.trim_whitespace { value.trim() } else { value };
        let column_specific = self.column_patterns.get(column).into_iter().flatten();
        self.patterns
            .iter()
            .chain(column_specific)
            .any(|pattern| self.matches(pattern, value))
    }

    fn matches(&self, pattern: &str, value: &str) -> bool {
        if self.case_sensitive {
            value == pattern
        } else {
            value.eq_ignore_ascii_case(pattern)
        }
    }

    /// Register a marker for one column, or for all columns when `column` is `None`
    pub fn add_pattern(&mut self, column: Option<&str>, pattern: impl Into<String>) {
        let pattern = pattern.into();
        let target = match column {
            Some(column) => self.column_patterns.entry(column.to_string()).or_default(),
            None => &mut self.patterns,
        };
        if !target.contains(&pattern) {
            target.push(pattern);
        }
    }
}
