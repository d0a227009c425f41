//! File type categorisation based on MIME type, then file extension.
//!
//! Groups files into five broad categories and computes size/count totals
//! per category.
use crate::model::size::{gib_string, mib_string};
use crate::model::FileRecord;
use serde::Serialize;

/// Broad file type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Images,
    Videos,
    Audio,
    Documents,
    Other,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Self::Images,
        Self::Videos,
        Self::Audio,
        Self::Documents,
        Self::Other,
    ];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Videos => "Videos",
            Self::Audio => "Audio",
            Self::Documents => "Documents",
            Self::Other => "Other",
        }
    }

    /// Lower-case key used in serialized output and CSV rows.
    pub fn key(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
            Self::Audio => "audio",
            Self::Documents => "documents",
            Self::Other => "other",
        }
    }
}

/// One row of the lookup table: a category with its exact MIME types and
/// lower-case extensions (without the dot).
struct CategoryRule {
    category: Category,
    mime_types: &'static [&'static str],
    extensions: &'static [&'static str],
}

/// Lookup table, checked top to bottom. The first match wins.
const RULES: [CategoryRule; 4] = [
    CategoryRule {
        category: Category::Images,
        mime_types: &[
            "image/jpeg",
            "image/png",
            "image/gif",
            "image/bmp",
            "image/webp",
            "image/svg+xml",
            "image/tiff",
        ],
        extensions: &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tiff", "tif"],
    },
    CategoryRule {
        category: Category::Videos,
        mime_types: &[
            "video/mp4",
            "video/avi",
            "video/mov",
            "video/wmv",
            "video/flv",
            "video/webm",
            "video/mkv",
            "video/m4v",
        ],
        extensions: &["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv", "m4v"],
    },
    CategoryRule {
        category: Category::Audio,
        mime_types: &[
            "audio/mpeg",
            "audio/wav",
            "audio/ogg",
            "audio/mp3",
            "audio/aac",
            "audio/flac",
            "audio/wma",
        ],
        extensions: &["mp3", "wav", "ogg", "aac", "flac", "wma"],
    },
    CategoryRule {
        category: Category::Documents,
        mime_types: &[
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "application/vnd.ms-powerpoint",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "text/plain",
        ],
        extensions: &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt"],
    },
];

/// Extension after the last `.`, lower-cased. Empty when there is no dot.
fn extension(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) => name[pos + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Categorise a file by exact MIME type, falling back to its extension.
///
/// Pure and total: every file maps to exactly one category.
pub fn categorize(file: &FileRecord) -> Category {
    if let Some(mime) = file.mime_type.as_deref() {
        if let Some(rule) = RULES.iter().find(|r| r.mime_types.iter().any(|m| *m == mime)) {
            return rule.category;
        }
    }

    let ext = extension(&file.name);
    if ext.is_empty() {
        return Category::Other;
    }
    RULES
        .iter()
        .find(|r| r.extensions.iter().any(|e| *e == ext))
        .map_or(Category::Other, |r| r.category)
}

/// Size and count totals for a single file category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub count: u64,
    pub total_size: u64,
    /// Two-decimal MiB string, e.g. `"12.50"`.
    #[serde(rename = "totalSizeMB")]
    pub total_size_mb: String,
    /// Two-decimal GiB string, e.g. `"0.01"`.
    #[serde(rename = "totalSizeGB")]
    pub total_size_gb: String,
}

impl CategoryStats {
    fn from_totals(count: u64, total_size: u64) -> Self {
        Self {
            count,
            total_size,
            total_size_mb: mib_string(total_size),
            total_size_gb: gib_string(total_size),
        }
    }
}

/// Per-category totals, one bucket for every [`Category`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    pub images: CategoryStats,
    pub videos: CategoryStats,
    pub audio: CategoryStats,
    pub documents: CategoryStats,
    pub other: CategoryStats,
}

impl FileStats {
    pub fn get(&self, category: Category) -> &CategoryStats {
        match category {
            Category::Images => &self.images,
            Category::Videos => &self.videos,
            Category::Audio => &self.audio,
            Category::Documents => &self.documents,
            Category::Other => &self.other,
        }
    }

    /// Buckets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryStats)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total_count(&self) -> u64 {
        self.iter().map(|(_, s)| s.count).sum()
    }
}

/// Compute per-category size and count stats for a listing.
pub fn analyse_file_types(files: &[FileRecord]) -> FileStats {
    // (count, bytes) indexed by `Category as usize`.
    let mut totals = [(0u64, 0u64); 5];

    for file in files {
        let slot = &mut totals[categorize(file) as usize];
        slot.0 += 1;
        slot.1 = slot.1.saturating_add(file.size);
    }

    let stats = |c: Category| {
        let (count, bytes) = totals[c as usize];
        CategoryStats::from_totals(count, bytes)
    };
    FileStats {
        images: stats(Category::Images),
        videos: stats(Category::Videos),
        audio: stats(Category::Audio),
        documents: stats(Category::Documents),
        other: stats(Category::Other),
    }
}
