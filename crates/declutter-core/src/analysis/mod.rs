//! Analysis modules: the classifier, detectors and aggregator.

pub mod age;
pub mod duplicates;
pub mod file_types;
pub mod large_files;
pub mod storage;

pub use age::{find_stale_files, StaleFile};
pub use duplicates::{find_duplicates, DetectionMethod, DuplicateGroup};
pub use file_types::{analyse_file_types, categorize, Category, CategoryStats, FileStats};
pub use large_files::{find_large_files, LargeFile};
pub use storage::{summarize_storage, StorageSummary, Usage};
