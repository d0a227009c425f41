//! Large-file analysis: files above a size threshold, biggest first.
use crate::analysis::file_types::{categorize, Category};
use crate::model::size::mib_string;
use crate::model::FileRecord;
use serde::Serialize;

/// A single entry in the "large files" results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LargeFile {
    #[serde(flatten)]
    pub file: FileRecord,
    /// Size in MiB, two decimals.
    #[serde(rename = "sizeInMB")]
    pub size_in_mb: String,
    pub category: Category,
}

/// Files strictly larger than `threshold` bytes, sorted by size descending.
///
/// The sort is stable, so equal sizes keep listing order.
pub fn find_large_files(files: &[FileRecord], threshold: u64) -> Vec<LargeFile> {
    let mut large: Vec<LargeFile> = files
        .iter()
        .filter(|f| f.size > threshold)
        .map(|f| LargeFile {
            size_in_mb: mib_string(f.size),
            category: categorize(f),
            file: f.clone(),
        })
        .collect();

    large.sort_by(|a, b| b.file.size.cmp(&a.file.size));
    large
}

/// Sum of all large-file sizes.
pub fn large_files_total(large: &[LargeFile]) -> u64 {
    large.iter().map(|f| f.file.size).fold(0, u64::saturating_add)
}
