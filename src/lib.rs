//! Scrape software versions from pipeline output files
//!
//! Each configured component has a file and a pattern with one capture group.
//! The collected versions are rendered as a report fragment for an external
//! report aggregator and as a tab-separated table.
//!
//! # Modules
//!
//! - [`config`]: built-in components and the optional JSON tool file
//! - [`collector`]: reads files and extracts versions
//! - [`report`]: report fragment and table rendering
//! - [`error`]: error types for configuration and output
//! - [`logging`]: tracing subscriber setup

pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use crate::collector::CollectedVersions;
use crate::config::{ToolsConfig, resolve_specs};

/// Resolved inputs for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
}

/// Collect versions, print the report to `out`, then write the table.
pub fn run<W: Write>(options: &RunOptions, out: &mut W) -> anyhow::Result<CollectedVersions> {
    let tools = options
        .config
        .as_deref()
        .map(ToolsConfig::load)
        .transpose()?;
    let specs = resolve_specs(tools.as_ref())?;
    debug!("Scraping {} components from {:?}", specs.len(), options.input_dir);

    let versions = collector::collect(&specs, &options.input_dir);

    out.write_all(report::render_report(&versions).as_bytes())
        .context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    report::write_table(&versions, &options.output)?;

    Ok(versions)
}
