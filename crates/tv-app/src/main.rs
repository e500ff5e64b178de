//! Main application entry point
//!
//! `tornadovis [CONFIG_PATH]` loads the tornado tables once, builds the
//! overview and comparison pages for the configured filter and states, and
//! writes every figure plus a report as JSON into the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use tv_data::{load_session, DashboardConfig};
use tv_views::{write_figure, write_report, ComparisonPage, Dashboard, Report};

/// Read the configuration named on the command line, or fall back to defaults
fn load_config() -> Result<DashboardConfig> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Reading configuration from {}", path.display());
            DashboardConfig::from_path(&path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))
        }
        None => {
            info!("No configuration given, using defaults");
            Ok(DashboardConfig::default())
        }
    }
}

fn run(config: &DashboardConfig) -> Result<()> {
    let ctx = load_session(&config.sources, &config.null_config)
        .context("Failed to load tornado data")?;

    if config.filter.magnitude.is_none() {
        if let Some(bounds) = ctx.magnitude_bounds() {
            info!("Magnitude range {}..={} (full data range)", bounds.min, bounds.max);
        }
    }

    let dashboard = Dashboard::build(&ctx, &config.filter, &config.settings);
    for (name, figure) in dashboard.figures(&ctx)? {
        write_figure(&config.output_dir, name, &figure)?;
    }

    let comparison = ComparisonPage::build(
        &ctx,
        &config.compare.state_a,
        &config.compare.state_b,
        &config.settings,
    );
    for (name, figure) in comparison.figures() {
        write_figure(&config.output_dir, name, &figure)?;
    }

    write_report(&config.output_dir, "report", &Report::new(&dashboard, &comparison))?;
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting tornado explorer");

    let config = load_config()?;
    run(&config)?;

    info!("Dashboard written to {}", config.output_dir.display());
    Ok(())
}
