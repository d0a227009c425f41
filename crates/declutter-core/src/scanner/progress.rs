//! Scan progress reporting: messages sent from the scan thread to the
//! caller via a crossbeam channel.
use crate::error::ScanError;
use crate::model::QuotaSnapshot;
use crate::scanner::ScanResult;
use std::time::Duration;

/// Progress updates sent from the scan thread.
#[derive(Debug)]
pub enum ScanProgress {
    /// Listing and quota requests have been issued.
    Fetching,
    /// Both fetches returned; classification is running.
    Fetched { files: usize, quota: QuotaSnapshot },
    /// The scan finished. The result is boxed to keep the enum small.
    Complete {
        result: Box<ScanResult>,
        duration: Duration,
    },
    /// A fetch failed and the scan was aborted. No partial result exists.
    Failed(ScanError),
}
