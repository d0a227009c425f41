//! Command-line arguments.
use clap::{ArgAction, Parser, ValueEnum};
use declutter_core::config::MIB;
use declutter_core::ScanConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full scan result as pretty-printed JSON.
    Json,
    /// Human-readable summary.
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "declutter")]
#[command(about = "Find duplicate, oversized and stale files in a cloud-storage listing", long_about = None)]
pub struct Cli {
    /// Saved `files.list` response (JSON envelope or bare array).
    #[arg(long, value_name = "PATH")]
    pub files: PathBuf,

    /// Saved `about?fields=storageQuota` response. Defaults to a 15 GiB quota.
    #[arg(long, value_name = "PATH")]
    pub quota: Option<PathBuf>,

    /// JSON file overriding any of the detection thresholds.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Access token handed to the storage provider.
    #[arg(long, default_value = "")]
    pub token: String,

    /// Report files larger than this many MiB.
    #[arg(long, value_name = "MIB")]
    pub large_threshold_mb: Option<u64>,

    /// Report files not modified for this many days.
    #[arg(long, value_name = "DAYS")]
    pub old_days: Option<u64>,

    /// Ignore files of this many bytes or fewer when looking for duplicates.
    #[arg(long, value_name = "BYTES")]
    pub duplicate_min_size: Option<u64>,

    /// Maximum number of files to scan.
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also export large and old files as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a base configuration.
    pub fn apply_overrides(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(mb) = self.large_threshold_mb {
            config.large_file_threshold = mb.saturating_mul(MIB);
        }
        if let Some(days) = self.old_days {
            config.old_file_days = days;
        }
        if let Some(bytes) = self.duplicate_min_size {
            config.duplicate_min_size = bytes;
        }
        if let Some(n) = self.max_files {
            config.max_files = n;
        }
        config
    }

    pub fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::WARN,
            (false, 0) => tracing::Level::INFO,
            (false, 1) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        }
    }
}
