//! Error types surfaced by the engine and its storage-provider seam.
//!
//! Per-file anomalies (missing checksum, timestamp or MIME type) are never
//! errors; they only exclude the file from the detector that needs the
//! missing attribute. The variants here cover the few conditions that are.
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building or running a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A provider record could not be turned into a `FileRecord`.
    #[error("invalid file record '{id}': {reason}")]
    InvalidInput { id: String, reason: String },

    /// The quota limit is zero, so a usage percentage cannot be computed.
    #[error("quota limit is zero; usage percentage is undefined")]
    DivideByZero,

    /// The file listing could not be fetched. The whole scan is aborted.
    #[error("failed to fetch file listing")]
    ListingFetch(#[source] ProviderError),

    /// The quota snapshot could not be fetched. The whole scan is aborted.
    #[error("failed to fetch storage quota")]
    QuotaFetch(#[source] ProviderError),

    /// The background scan thread stopped without reporting a result.
    #[error("scan thread exited without a result")]
    WorkerLost,

    /// A configuration knob is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScanError {
    /// `true` when the failure means the caller must re-authenticate
    /// before retrying.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::ListingFetch(ProviderError::Unauthorized)
                | Self::QuotaFetch(ProviderError::Unauthorized)
        )
    }
}

/// Failures reported by a [`StorageProvider`](crate::provider::StorageProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The access token was rejected or has expired.
    #[error("access token rejected or expired")]
    Unauthorized,

    #[error("storage provider unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_detected_on_either_fetch() {
        assert!(ScanError::ListingFetch(ProviderError::Unauthorized).is_unauthorized());
        assert!(ScanError::QuotaFetch(ProviderError::Unauthorized).is_unauthorized());
        assert!(!ScanError::DivideByZero.is_unauthorized());
        assert!(
            !ScanError::ListingFetch(ProviderError::Unavailable("timeout".into()))
                .is_unauthorized()
        );
    }

    #[test]
    fn invalid_input_message_names_the_record() {
        let err = ScanError::InvalidInput {
            id: "f1".into(),
            reason: "negative size -5".into(),
        };
        assert_eq!(err.to_string(), "invalid file record 'f1': negative size -5");
    }
}
