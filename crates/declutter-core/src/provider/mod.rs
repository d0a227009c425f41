//! Storage-provider seam: where file listings and quota snapshots come from.
//!
//! The engine never talks to a cloud API itself. A [`StorageProvider`]
//! supplies one listing and one quota per scan; authentication, transport
//! and retries are the provider's business.
pub mod export;

pub use export::ExportProvider;

use crate::error::ProviderError;
use crate::model::{FileRecord, QuotaSnapshot};
use std::fmt;

/// Bearer token for the connected account.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// A source of file listings and quota snapshots.
///
/// Both calls are read-only and independent, so callers may issue them
/// concurrently. Implementations that cannot obtain quota data should
/// return [`DEFAULT_QUOTA`](crate::model::DEFAULT_QUOTA) rather than fail.
pub trait StorageProvider: Send + Sync {
    /// Fetch at most `max_files` normalised file records.
    fn fetch_file_listing(
        &self,
        token: &AccessToken,
        max_files: usize,
    ) -> Result<Vec<FileRecord>, ProviderError>;

    fn fetch_quota(&self, token: &AccessToken) -> Result<QuotaSnapshot, ProviderError>;
}
