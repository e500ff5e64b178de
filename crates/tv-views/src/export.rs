//! Figure and report export

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::plots::Figure;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Indented JSON
    #[default]
    PrettyJson,
    /// Single-line JSON
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        "json"
    }

    fn render<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        match self {
            ExportFormat::PrettyJson => serde_json::to_string_pretty(value),
            ExportFormat::Json => serde_json::to_string(value),
        }
    }
}

/// Write `figure` as `<dir>/<name>.json`, creating `dir` if needed
pub fn write_figure(dir: &Path, name: &str, figure: &Figure) -> anyhow::Result<PathBuf> {
    write_json(dir, name, figure, ExportFormat::default())
}

/// Write the dashboard report as `<dir>/<name>.json`
pub fn write_report<T: Serialize>(dir: &Path, name: &str, report: &T) -> anyhow::Result<PathBuf> {
    write_json(dir, name, report, ExportFormat::default())
}

pub fn write_json<T: Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
    format: ExportFormat,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(format!("{}.{}", name, format.extension()));
    let text = format.render(value)?;
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Exported {}", path.display());
    Ok(path)
}
