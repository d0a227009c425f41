//! Declutter Core: classification and aggregation of cloud-storage listings.
//!
//! This crate contains all scan logic with no frontend dependencies. A
//! [`provider::StorageProvider`] supplies a file listing and a quota
//! snapshot; [`scanner::scan`] turns them into a [`scanner::ScanResult`].
//!
//! # Modules
//!
//! - [`model`]: File records, quota snapshots and size formatting.
//! - [`analysis`]: Categorisation, duplicate, large- and old-file detection, storage totals.
//! - [`scanner`]: Scan orchestration, concurrent fetching and progress reporting.
//! - [`provider`]: The storage-provider seam and an on-disk export provider.
//! - [`config`]: Detection thresholds.
//! - [`error`]: Error types.
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod scanner;

pub use config::ScanConfig;
pub use error::{ProviderError, ScanError};
pub use scanner::{fetch_and_scan, scan, scan_at, start_scan, ScanResult};
