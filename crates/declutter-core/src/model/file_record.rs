//! A single file in a cloud-storage listing.
//!
//! Provider payloads arrive as loosely-typed [`DriveFile`] records (sizes as
//! strings, optional everything). They are normalised once, at this boundary,
//! into immutable [`FileRecord`]s so the detectors never re-parse anything.
use crate::error::ScanError;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A normalised file record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Provider-assigned identifier, unique within one scan.
    pub id: CompactString,
    /// File name only, as shown by the provider. May be empty.
    pub name: CompactString,
    /// Logical size in bytes. Absent sizes (folders, native docs) are 0.
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    /// Provider-supplied content checksum (MD5 on Google Drive).
    #[serde(
        default,
        rename = "md5Checksum",
        skip_serializing_if = "Option::is_none"
    )]
    pub checksum: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<CompactString>,
}

impl FileRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: impl Into<CompactString>, name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            mime_type: None,
            modified_time: None,
            checksum: None,
            parents: Vec::new(),
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<CompactString>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified_time = Some(modified);
        self
    }

    pub fn with_checksum(mut self, checksum: impl Into<CompactString>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    /// The checksum, treating an empty string as absent.
    #[inline]
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref().filter(|c| !c.is_empty())
    }

    /// Normalise a raw provider record.
    ///
    /// Missing or unparsable sizes become 0. A negative size or a missing id
    /// is rejected as [`ScanError::InvalidInput`]. Empty strings for the
    /// checksum or MIME type are treated as absent, and an unparsable
    /// timestamp is dropped so the file is simply never judged old.
    pub fn from_drive(raw: DriveFile) -> Result<Self, ScanError> {
        let id = match raw.id {
            Some(id) if !id.is_empty() => CompactString::from(id),
            _ => {
                return Err(ScanError::InvalidInput {
                    id: raw.name.unwrap_or_default(),
                    reason: "missing id".into(),
                })
            }
        };

        let size = parse_size(raw.size.as_ref()).map_err(|reason| ScanError::InvalidInput {
            id: id.to_string(),
            reason,
        })?;

        let modified_time = raw.modified_time.as_deref().and_then(|ts| {
            match DateTime::parse_from_rfc3339(ts) {
                Ok(dt) => Some(dt.with_timezone(&Utc)),
                Err(e) => {
                    debug!("Ignoring unparsable modifiedTime {ts:?} on {id}: {e}");
                    None
                }
            }
        });

        Ok(Self {
            name: CompactString::from(raw.name.unwrap_or_default()),
            size,
            mime_type: non_empty(raw.mime_type),
            modified_time,
            checksum: non_empty(raw.md5_checksum),
            parents: raw.parents.into_iter().map(CompactString::from).collect(),
            id,
        })
    }
}

/// A raw record as returned by a Drive-v3 style `files.list` call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Usually a decimal string; some exports use a JSON number.
    pub size: Option<Value>,
    pub mime_type: Option<String>,
    pub modified_time: Option<String>,
    pub md5_checksum: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// The envelope of a `files.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriveListing {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

/// Normalise a whole listing, keeping at most `max_files` records.
///
/// Records rejected by [`FileRecord::from_drive`] are dropped with a warning
/// rather than failing the listing.
pub fn parse_listing(raw: Vec<DriveFile>, max_files: usize) -> Vec<FileRecord> {
    let available = raw.len();
    let mut files = Vec::with_capacity(available.min(max_files));
    let mut rejected = 0usize;

    for drive_file in raw {
        if files.len() == max_files {
            break;
        }
        match FileRecord::from_drive(drive_file) {
            Ok(record) => files.push(record),
            Err(e) => {
                warn!("Dropping file record: {e}");
                rejected += 1;
            }
        }
    }

    if available > files.len() + rejected {
        debug!(
            "Listing capped at {max_files} files ({available} available)",
        );
    }
    files
}

/// Parse a provider size field. `Ok(0)` for anything missing or unparsable;
/// `Err` only for a negative value.
fn parse_size(value: Option<&Value>) -> Result<u64, String> {
    let parsed: Option<i128> = match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n
            .as_u64()
            .map(i128::from)
            .or_else(|| n.as_i64().map(i128::from))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i128)),
        Some(Value::String(s)) => leading_integer(s),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n < 0 => Err(format!("negative size {n}")),
        Some(n) => Ok(u64::try_from(n).unwrap_or(u64::MAX)),
        None => Ok(0),
    }
}

/// The integer prefix of a decimal string: `"5000.7"` → 5000, `"12kb"` → 12.
/// Digit runs too long for `i128` saturate, keeping their sign.
fn leading_integer(s: &str) -> Option<i128> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i128>().unwrap_or(i128::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn non_empty(value: Option<String>) -> Option<CompactString> {
    value.filter(|s| !s.is_empty()).map(CompactString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drive(value: Value) -> DriveFile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parses_full_drive_record() {
        let raw = drive(json!({
            "id": "abc",
            "name": "photo.jpg",
            "size": "2048",
            "mimeType": "image/jpeg",
            "modifiedTime": "2024-01-02T03:04:05.000Z",
            "md5Checksum": "d41d8cd9",
            "parents": ["root"]
        }));
        let f = FileRecord::from_drive(raw).unwrap();
        assert_eq!(f.id, "abc");
        assert_eq!(f.size, 2048);
        assert_eq!(f.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(f.checksum(), Some("d41d8cd9"));
        assert_eq!(f.parents, vec![CompactString::from("root")]);
        assert_eq!(
            f.modified_time.unwrap().to_rfc3339(),
            "2024-01-02T03:04:05+00:00"
        );
    }

    /// Native documents and folders carry no size; they count as 0 bytes.
    #[test]
    fn missing_or_garbage_size_is_zero() {
        let f = FileRecord::from_drive(drive(json!({ "id": "a", "name": "Doc" }))).unwrap();
        assert_eq!(f.size, 0);

        let f = FileRecord::from_drive(drive(json!({ "id": "b", "size": "lots" }))).unwrap();
        assert_eq!(f.size, 0);
    }

    /// Fractional sizes truncate the same way whether quoted or not.
    #[test]
    fn fractional_size_truncates_in_both_forms() {
        for size in [json!(5000.7), json!("5000.7"), json!(" 5000bytes")] {
            let f = FileRecord::from_drive(drive(json!({ "id": "a", "size": size }))).unwrap();
            assert_eq!(f.size, 5000, "size {size}");
        }
        let err = FileRecord::from_drive(drive(json!({ "id": "n", "size": "-3.5" })));
        assert!(matches!(err, Err(ScanError::InvalidInput { .. })));
    }

    #[test]
    fn oversized_size_saturates() {
        let f = FileRecord::from_drive(drive(json!({
            "id": "a", "size": "999999999999999999999999999999999999999999"
        })))
        .unwrap();
        assert_eq!(f.size, u64::MAX);
    }

    #[test]
    fn numeric_size_is_accepted() {
        let f = FileRecord::from_drive(drive(json!({ "id": "a", "size": 5000 }))).unwrap();
        assert_eq!(f.size, 5000);
    }

    #[test]
    fn negative_size_is_invalid_input() {
        for size in [json!("-1"), json!(-42)] {
            let err = FileRecord::from_drive(drive(json!({ "id": "neg", "size": size })));
            assert!(
                matches!(err, Err(ScanError::InvalidInput { ref id, .. }) if id == "neg"),
                "expected InvalidInput, got {err:?}"
            );
        }
    }

    #[test]
    fn missing_id_is_invalid_input() {
        let err = FileRecord::from_drive(drive(json!({ "name": "orphan.txt", "size": "1" })));
        assert!(matches!(err, Err(ScanError::InvalidInput { .. })));
    }

    #[test]
    fn empty_checksum_and_mime_are_absent() {
        let f = FileRecord::from_drive(drive(json!({
            "id": "a", "mimeType": "", "md5Checksum": ""
        })))
        .unwrap();
        assert!(f.mime_type.is_none());
        assert!(f.checksum.is_none());
    }

    #[test]
    fn bad_timestamp_is_dropped() {
        let f = FileRecord::from_drive(drive(json!({
            "id": "a", "modifiedTime": "last tuesday"
        })))
        .unwrap();
        assert!(f.modified_time.is_none());
    }

    #[test]
    fn parse_listing_drops_invalid_and_caps() {
        let raw = vec![
            drive(json!({ "id": "1", "size": "10" })),
            drive(json!({ "id": "2", "size": "-10" })),
            drive(json!({ "id": "3", "size": "30" })),
            drive(json!({ "id": "4", "size": "40" })),
        ];
        let files = parse_listing(raw, 2);
        let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
