//! Scan configuration: the four scalar knobs that tune detection.
//!
//! Defaults match a typical personal cloud drive: 100 MiB "large",
//! one year "old", 1 KiB duplicate floor and a 1 000-file listing cap.
use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One mebibyte in bytes.
pub const MIB: u64 = 1024 * 1024;

pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * MIB;
pub const DEFAULT_OLD_FILE_DAYS: u64 = 365;
pub const DEFAULT_DUPLICATE_MIN_SIZE: u64 = 1024;
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Tunable thresholds for a single scan.
///
/// Every field is optional in serialized form; missing knobs keep their
/// default, so a config file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Files strictly larger than this many bytes are reported as large.
    pub large_file_threshold: u64,
    /// Files last modified more than this many days ago are reported as old.
    pub old_file_days: u64,
    /// Files at or below this many bytes are ignored for duplicate detection.
    pub duplicate_min_size: u64,
    /// Maximum number of files a provider hands to one scan.
    pub max_files: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            old_file_days: DEFAULT_OLD_FILE_DAYS,
            duplicate_min_size: DEFAULT_DUPLICATE_MIN_SIZE,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl ScanConfig {
    /// Load a (possibly partial) configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ScanError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ScanError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            ScanError::InvalidConfig(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.max_files == 0 {
            return Err(ScanError::InvalidConfig(
                "maxFiles must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
