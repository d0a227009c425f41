//! Storage quota snapshot for the connected account.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 15 GiB, the free-tier limit assumed when the provider reports none.
pub const DEFAULT_QUOTA_LIMIT: u64 = 15 * 1024 * 1024 * 1024;

/// Quota reported when the provider cannot supply one.
pub const DEFAULT_QUOTA: QuotaSnapshot = QuotaSnapshot {
    limit: DEFAULT_QUOTA_LIMIT,
    usage: 0,
    usage_in_drive: Some(0),
    usage_in_drive_trash: Some(0),
};

/// Total/used byte counts for one account at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaSnapshot {
    pub limit: u64,
    pub usage: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_in_drive: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_in_drive_trash: Option<u64>,
}

impl QuotaSnapshot {
    pub fn new(limit: u64, usage: u64) -> Self {
        Self {
            limit,
            usage,
            usage_in_drive: None,
            usage_in_drive_trash: None,
        }
    }

    /// Normalise a raw `about.storageQuota` payload.
    ///
    /// A missing limit (unlimited plans omit it) falls back to
    /// [`DEFAULT_QUOTA_LIMIT`]; a missing usage to 0.
    pub fn from_drive(raw: &DriveQuota) -> Self {
        Self {
            limit: parse_bytes(raw.limit.as_ref()).unwrap_or(DEFAULT_QUOTA_LIMIT),
            usage: parse_bytes(raw.usage.as_ref()).unwrap_or(0),
            usage_in_drive: parse_bytes(raw.usage_in_drive.as_ref()),
            usage_in_drive_trash: parse_bytes(raw.usage_in_drive_trash.as_ref()),
        }
    }
}

impl Default for QuotaSnapshot {
    fn default() -> Self {
        DEFAULT_QUOTA
    }
}

/// Raw quota fields; Drive encodes them as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveQuota {
    pub limit: Option<Value>,
    pub usage: Option<Value>,
    pub usage_in_drive: Option<Value>,
    pub usage_in_drive_trash: Option<Value>,
}

/// The envelope of an `about` response requested with `fields=storageQuota`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveAbout {
    pub storage_quota: Option<DriveQuota>,
}

fn parse_bytes(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
