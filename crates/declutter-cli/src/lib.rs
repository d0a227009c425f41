//! Declutter CLI: command-line frontend for the scan engine.
//!
//! Wires an [`ExportProvider`] to the core scanner, then renders the result
//! as JSON or text and optionally exports CSV.
pub mod args;
pub mod csv_export;
pub mod report;

pub use args::{Cli, OutputFormat};

use anyhow::{Context, Result};
use declutter_core::provider::{AccessToken, ExportProvider};
use declutter_core::{start_scan, ScanConfig, ScanError};
use std::sync::Arc;
use tracing::info;

/// Run one scan as described by the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => ScanConfig::from_json_file(path)?,
        None => ScanConfig::default(),
    };
    let config = cli.apply_overrides(base);
    config.validate()?;

    let mut provider = ExportProvider::new(&cli.files);
    if let Some(quota) = &cli.quota {
        provider = provider.with_quota(quota);
    }

    let handle = start_scan(Arc::new(provider), AccessToken::new(&cli.token), config)
        .context("cannot start scanner thread")?;
    let result = handle.wait()?;

    let rendered = match cli.format {
        OutputFormat::Json => report::render_json(&result)?,
        OutputFormat::Text => report::render_text(&result),
    };
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if let Some(path) = &cli.csv {
        csv_export::write_csv_file(path, &result)?;
        info!("CSV written to {}", path.display());
    }
    Ok(())
}

/// User-facing message for a failed run.
///
/// A rejected token asks the user to re-authenticate; anything else is a
/// generic failure with its cause chain.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ScanError>() {
        Some(scan_err) if scan_err.is_unauthorized() => {
            "Access token expired or rejected. Please re-authenticate and retry.".to_string()
        }
        _ => format!("Scan failed: {err:#}"),
    }
}
