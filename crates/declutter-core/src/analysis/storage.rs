//! Storage summary: quota usage plus the savings the other detectors found.
use crate::analysis::age::{stale_files_total, StaleFile};
use crate::analysis::duplicates::{duplicate_savings, DuplicateGroup};
use crate::analysis::large_files::{large_files_total, LargeFile};
use crate::error::ScanError;
use crate::model::size::round_to;
use crate::model::{GibAmount, QuotaSnapshot};
use serde::Serialize;

/// Quota usage as a percentage, or the reason it could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Usage {
    /// `used / limit * 100`, one decimal.
    Measured { percentage: f64 },
    /// The quota limit was zero.
    DivideByZero,
}

impl Usage {
    pub fn from_quota(quota: &QuotaSnapshot) -> Self {
        if quota.limit == 0 {
            return Self::DivideByZero;
        }
        let pct = quota.usage as f64 / quota.limit as f64 * 100.0;
        Self::Measured {
            percentage: round_to(pct, 1),
        }
    }

    pub fn percentage(&self) -> Result<f64, ScanError> {
        match *self {
            Self::Measured { percentage } => Ok(percentage),
            Self::DivideByZero => Err(ScanError::DivideByZero),
        }
    }
}

/// Quota totals and estimated savings, every byte figure in GiB form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummary {
    pub total: GibAmount,
    pub used: GibAmount,
    /// `total - used`; negative when the account is over quota.
    pub free: GibAmount,
    pub usage: Usage,
    pub duplicates: GibAmount,
    pub large_files: GibAmount,
    pub old_files: GibAmount,
}

/// Build the storage summary from the quota and the detector outputs.
pub fn summarize_storage(
    quota: &QuotaSnapshot,
    duplicates: &[DuplicateGroup],
    large_files: &[LargeFile],
    old_files: &[StaleFile],
) -> StorageSummary {
    let limit = i128::from(quota.limit);
    let used = i128::from(quota.usage);
    let free = i64::try_from(limit - used).unwrap_or(if limit < used { i64::MIN } else { i64::MAX });

    StorageSummary {
        total: GibAmount::from_unsigned(quota.limit),
        used: GibAmount::from_unsigned(quota.usage),
        free: GibAmount::from_bytes(free),
        usage: Usage::from_quota(quota),
        duplicates: GibAmount::from_unsigned(duplicate_savings(duplicates)),
        large_files: GibAmount::from_unsigned(large_files_total(large_files)),
        old_files: GibAmount::from_unsigned(stale_files_total(old_files)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_used_fifteen_gib() {
        let quota = QuotaSnapshot::new(16_106_127_360, 8_053_063_680);
        let s = summarize_storage(&quota, &[], &[], &[]);

        assert_eq!(s.usage, Usage::Measured { percentage: 50.0 });
        assert_eq!(s.usage.percentage().unwrap(), 50.0);
        assert_eq!(s.free.bytes, 8_053_063_680);
        assert_eq!(s.total.display, "15.00 GB");
        assert_eq!(s.used.gib, 7.5);
        assert_eq!(s.duplicates.display, "0.00 GB");
    }

    #[test]
    fn zero_limit_reports_divide_by_zero() {
        let quota = QuotaSnapshot::new(0, 100);
        let s = summarize_storage(&quota, &[], &[], &[]);

        assert_eq!(s.usage, Usage::DivideByZero);
        assert!(matches!(s.usage.percentage(), Err(ScanError::DivideByZero)));
        assert_eq!(s.free.bytes, -100);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["usage"]["status"], "divide_by_zero");
    }

    /// Over-quota accounts keep the negative free figure.
    #[test]
    fn over_quota_free_is_negative() {
        let quota = QuotaSnapshot::new(1_073_741_824, 2_147_483_648);
        let s = summarize_storage(&quota, &[], &[], &[]);
        assert_eq!(s.free.bytes, -1_073_741_824);
        assert_eq!(s.free.display, "-1.00 GB");
        assert_eq!(s.usage.percentage().unwrap(), 200.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let quota = QuotaSnapshot::new(3, 1);
        assert_eq!(
            Usage::from_quota(&quota),
            Usage::Measured { percentage: 33.3 }
        );
    }

    #[test]
    fn measured_usage_serializes_with_percentage() {
        let json = serde_json::to_value(Usage::Measured { percentage: 12.5 }).unwrap();
        assert_eq!(json["status"], "measured");
        assert_eq!(json["percentage"], 12.5);
    }
}
