//! Scan orchestration: composes the classifier, detectors and aggregator
//! over one listing and one quota snapshot.
//!
//! [`scan`] is the pure entry point. [`fetch_and_scan`] adds the provider
//! round-trip, issuing the listing and quota requests concurrently, and
//! [`start_scan`] runs that on a background thread with progress reporting.
pub mod progress;

use crate::analysis::{
    analyse_file_types, find_duplicates, find_large_files, find_stale_files, summarize_storage,
    DuplicateGroup, FileStats, LargeFile, StaleFile, StorageSummary,
};
use crate::analysis::duplicates::duplicate_savings;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::model::{FileRecord, GibAmount, QuotaSnapshot};
use crate::provider::{AccessToken, StorageProvider};
use chrono::{DateTime, Utc};
use crossbeam_channel::Receiver;
use progress::ScanProgress;
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Headline counts for one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_files: usize,
    /// Quota usage, not the sum of listed sizes: the listing may be capped.
    pub total_size: GibAmount,
    pub duplicate_savings: GibAmount,
    pub large_files_count: usize,
    pub old_files_count: usize,
    pub duplicate_groups_count: usize,
}

/// Everything one scan produces. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub duplicates: Vec<DuplicateGroup>,
    /// Largest first.
    pub large_files: Vec<LargeFile>,
    /// Oldest first.
    pub old_files: Vec<StaleFile>,
    pub file_stats: FileStats,
    pub storage: StorageSummary,
    pub summary: ScanSummary,
}

/// Scan a listing against the wall clock.
pub fn scan(files: &[FileRecord], quota: &QuotaSnapshot, config: &ScanConfig) -> ScanResult {
    scan_at(files, quota, config, Utc::now())
}

/// Scan a listing, judging file age relative to `now`.
pub fn scan_at(
    files: &[FileRecord],
    quota: &QuotaSnapshot,
    config: &ScanConfig,
    now: DateTime<Utc>,
) -> ScanResult {
    let start = Instant::now();

    let file_stats = analyse_file_types(files);
    let duplicates = find_duplicates(files, config.duplicate_min_size);
    let large_files = find_large_files(files, config.large_file_threshold);
    let old_files = find_stale_files(files, config.old_file_days, now);
    let storage = summarize_storage(quota, &duplicates, &large_files, &old_files);

    let summary = ScanSummary {
        total_files: files.len(),
        total_size: GibAmount::from_unsigned(quota.usage),
        duplicate_savings: GibAmount::from_unsigned(duplicate_savings(&duplicates)),
        large_files_count: large_files.len(),
        old_files_count: old_files.len(),
        duplicate_groups_count: duplicates.len(),
    };

    info!(
        files = files.len(),
        duplicate_groups = duplicates.len(),
        large = large_files.len(),
        old = old_files.len(),
        "Scan analysed in {:.2?}",
        start.elapsed()
    );

    ScanResult {
        duplicates,
        large_files,
        old_files,
        file_stats,
        storage,
        summary,
    }
}

/// Fetch the listing and quota concurrently, then scan.
///
/// Either fetch failing aborts the whole scan; no partial result is built.
pub fn fetch_and_scan<P>(
    provider: &P,
    token: &AccessToken,
    config: &ScanConfig,
) -> Result<ScanResult, ScanError>
where
    P: StorageProvider + ?Sized,
{
    let (files, quota) = fetch_both(provider, token, config)?;
    Ok(scan(&files, &quota, config))
}

fn fetch_both<P>(
    provider: &P,
    token: &AccessToken,
    config: &ScanConfig,
) -> Result<(Vec<FileRecord>, QuotaSnapshot), ScanError>
where
    P: StorageProvider + ?Sized,
{
    config.validate()?;
    debug!("Fetching listing (max {}) and quota", config.max_files);

    let (files, quota) = rayon::join(
        || provider.fetch_file_listing(token, config.max_files),
        || provider.fetch_quota(token),
    );
    let files = files.map_err(ScanError::ListingFetch)?;
    let quota = quota.map_err(ScanError::QuotaFetch)?;

    debug!(files = files.len(), limit = quota.limit, usage = quota.usage, "Fetched");
    Ok((files, quota))
}

/// Maximum number of progress messages that may queue up in the channel.
///
/// A scan sends at most three, so the scan thread never blocks on a caller
/// that is slow to drain.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 8;

/// Handle to a running or completed background scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Block until the scan finishes and return its outcome.
    pub fn wait(mut self) -> Result<ScanResult, ScanError> {
        let outcome = loop {
            match self.progress_rx.recv() {
                Ok(ScanProgress::Complete { result, .. }) => break Ok(*result),
                Ok(ScanProgress::Failed(e)) => break Err(e),
                Ok(_) => continue,
                Err(_) => break Err(ScanError::WorkerLost),
            }
        };
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Scan thread panicked");
            }
        }
        outcome
    }
}

/// Start a provider scan on a background thread.
///
/// Returns a `ScanHandle` for receiving progress or waiting for the result.
pub fn start_scan(
    provider: Arc<dyn StorageProvider>,
    token: AccessToken,
    config: ScanConfig,
) -> std::io::Result<ScanHandle> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);

    let thread = thread::Builder::new()
        .name("declutter-scanner".into())
        .spawn(move || {
            let start = Instant::now();
            info!("Starting scan");
            let _ = progress_tx.send(ScanProgress::Fetching);

            let message = match fetch_both(provider.as_ref(), &token, &config) {
                Ok((files, quota)) => {
                    let _ = progress_tx.send(ScanProgress::Fetched {
                        files: files.len(),
                        quota,
                    });
                    let result = scan(&files, &quota, &config);
                    ScanProgress::Complete {
                        result: Box::new(result),
                        duration: start.elapsed(),
                    }
                }
                Err(e) => {
                    warn!("Scan aborted: {e}");
                    ScanProgress::Failed(e)
                }
            };
            let _ = progress_tx.send(message);
        })?;

    Ok(ScanHandle {
        progress_rx,
        thread: Some(thread),
    })
}
