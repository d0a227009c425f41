//! File age analysis: find old/stale files that haven't been modified recently.
use crate::analysis::file_types::{categorize, Category};
use crate::model::FileRecord;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A file identified as old/stale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaleFile {
    #[serde(flatten)]
    pub file: FileRecord,
    /// Whole days between the last modification and the scan instant.
    pub days_old: i64,
    pub category: Category,
}

/// Find files last modified before `now - max_age_days`, oldest first.
///
/// Files without a modification timestamp cannot be judged and are skipped.
/// Equal timestamps keep listing order.
pub fn find_stale_files(
    files: &[FileRecord],
    max_age_days: u64,
    now: DateTime<Utc>,
) -> Vec<StaleFile> {
    let days = i64::try_from(max_age_days).unwrap_or(i64::MAX);
    // An age beyond what chrono can represent means nothing is old enough.
    let Some(cutoff) = Duration::try_days(days).and_then(|age| now.checked_sub_signed(age))
    else {
        return Vec::new();
    };

    let mut stale: Vec<StaleFile> = files
        .iter()
        .filter_map(|f| {
            let modified = f.modified_time?;
            if modified >= cutoff {
                return None;
            }
            Some(StaleFile {
                days_old: (now - modified).num_days(),
                category: categorize(f),
                file: f.clone(),
            })
        })
        .collect();

    stale.sort_by_key(|s| s.file.modified_time);
    stale
}

/// Sum of all stale-file sizes.
pub fn stale_files_total(stale: &[StaleFile]) -> u64 {
    stale.iter().map(|f| f.file.size).fold(0, u64::saturating_add)
}
