//! Size formatting utilities: byte counts in MiB/GiB and human form.
//!
//! All internal sizes are integer bytes. Floating point is only used
//! at the reporting boundary.
use serde::Serialize;

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Bytes as MiB, two decimals (`209715200` → `"200.00"`).
pub fn mib_string(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MB)
}

/// Bytes as GiB, two decimals (`1073741824` → `"1.00"`).
pub fn gib_string(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / GB)
}

/// A byte aggregate exposed three ways: raw bytes, GiB as a two-decimal
/// float, and the same value as a display string (`"7.50 GB"`).
///
/// Bytes are signed so that "free" space on an over-quota account keeps
/// its negative sign instead of being clamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GibAmount {
    pub bytes: i64,
    pub gib: f64,
    pub display: String,
}

impl GibAmount {
    pub fn from_bytes(bytes: i64) -> Self {
        let gib = round_to(bytes as f64 / GB, 2);
        Self {
            bytes,
            gib,
            display: format!("{gib:.2} GB"),
        }
    }

    /// Convenience for unsigned totals; saturates at `i64::MAX`.
    pub fn from_unsigned(bytes: u64) -> Self {
        Self::from_bytes(i64::try_from(bytes).unwrap_or(i64::MAX))
    }
}

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (KiB = 1024) but labels them with common short forms
/// (KB, MB, GB, TB) because that is what cloud-storage UIs show.
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else if b < TB {
        format!("{:.2} GB", b / GB)
    } else {
        format!("{:.2} TB", b / TB)
    }
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mib_string() {
        assert_eq!(mib_string(209_715_200), "200.00");
        assert_eq!(mib_string(0), "0.00");
        assert_eq!(mib_string(1_572_864), "1.50");
    }

    #[test]
    fn test_gib_string() {
        assert_eq!(gib_string(1_073_741_824), "1.00");
        assert_eq!(gib_string(8_053_063_680), "7.50");
    }

    #[test]
    fn test_gib_amount() {
        let a = GibAmount::from_bytes(8_053_063_680);
        assert_eq!(a.gib, 7.5);
        assert_eq!(a.display, "7.50 GB");
    }

    /// Over-quota accounts report negative free space.
    #[test]
    fn test_gib_amount_negative() {
        let a = GibAmount::from_bytes(-1_073_741_824);
        assert_eq!(a.bytes, -1_073_741_824);
        assert_eq!(a.gib, -1.0);
        assert_eq!(a.display, "-1.00 GB");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
        assert_eq!(format_size(1_099_511_627_776), "1.00 TB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
