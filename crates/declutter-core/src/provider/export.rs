//! Provider backed by saved API responses on disk.
//!
//! Reads a `files.list` response (`{"files": [...]}`, or a bare array) and
//! optionally an `about?fields=storageQuota` response. Useful for offline
//! analysis of an exported listing and for tests.
use crate::error::ProviderError;
use crate::model::{
    parse_listing, DriveAbout, DriveFile, DriveListing, FileRecord, QuotaSnapshot, DEFAULT_QUOTA,
};
use crate::provider::{AccessToken, StorageProvider};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ExportProvider {
    listing_path: PathBuf,
    quota_path: Option<PathBuf>,
}

impl ExportProvider {
    pub fn new(listing_path: impl Into<PathBuf>) -> Self {
        Self {
            listing_path: listing_path.into(),
            quota_path: None,
        }
    }

    pub fn with_quota(mut self, quota_path: impl Into<PathBuf>) -> Self {
        self.quota_path = Some(quota_path.into());
        self
    }

    fn read_quota(path: &Path) -> Result<QuotaSnapshot, ProviderError> {
        let text = read(path)?;
        let about: DriveAbout = serde_json::from_str(&text).map_err(|source| {
            ProviderError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        match about.storage_quota {
            Some(raw) => Ok(QuotaSnapshot::from_drive(&raw)),
            None => Ok(DEFAULT_QUOTA),
        }
    }
}

/// Accept both the API envelope and a bare array of files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListingFile {
    Envelope(DriveListing),
    Bare(Vec<DriveFile>),
}

fn read(path: &Path) -> Result<String, ProviderError> {
    std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl StorageProvider for ExportProvider {
    fn fetch_file_listing(
        &self,
        _token: &AccessToken,
        max_files: usize,
    ) -> Result<Vec<FileRecord>, ProviderError> {
        let path = &self.listing_path;
        let text = read(path)?;
        let raw = match serde_json::from_str::<ListingFile>(&text).map_err(|source| ProviderError::Parse {
            path: path.clone(),
            source,
        })? {
            ListingFile::Envelope(listing) => listing.files,
            ListingFile::Bare(files) => files,
        };

        let files = parse_listing(raw, max_files);
        info!("Loaded {} files from {}", files.len(), path.display());
        Ok(files)
    }

    /// Missing or unreadable quota data degrades to [`DEFAULT_QUOTA`].
    fn fetch_quota(&self, _token: &AccessToken) -> Result<QuotaSnapshot, ProviderError> {
        let Some(path) = &self.quota_path else {
            info!("No quota export given, assuming default 15 GiB quota");
            return Ok(DEFAULT_QUOTA);
        };
        match Self::read_quota(path) {
            Ok(quota) => Ok(quota),
            Err(e) => {
                warn!("Failed to load quota, using default: {e}");
                Ok(DEFAULT_QUOTA)
            }
        }
    }
}
