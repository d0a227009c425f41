//! Data model for a single scan: file records, quota and size helpers.
pub mod file_record;
pub mod quota;
pub mod size;

pub use file_record::{parse_listing, DriveFile, DriveListing, FileRecord};
pub use quota::{DriveAbout, DriveQuota, QuotaSnapshot, DEFAULT_QUOTA, DEFAULT_QUOTA_LIMIT};
pub use size::GibAmount;
