//! Report rendering: JSON for machines, a short text summary for people.
use declutter_core::analysis::{Category, Usage};
use declutter_core::model::size::{format_count, format_size};
use declutter_core::ScanResult;
use std::fmt::Write;

/// Number of entries listed per section in the text report.
const TEXT_LIST_LIMIT: usize = 10;

pub fn render_json(result: &ScanResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn render_text(result: &ScanResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, result);
    out
}

fn write_text(out: &mut String, result: &ScanResult) -> std::fmt::Result {
    let storage = &result.storage;
    let summary = &result.summary;

    writeln!(out, "Scanned {} files", format_count(summary.total_files as u64))?;
    match storage.usage {
        Usage::Measured { percentage } => writeln!(
            out,
            "Storage: {} of {} used ({percentage:.1}%), {} free",
            storage.used.display, storage.total.display, storage.free.display
        )?,
        Usage::DivideByZero => writeln!(
            out,
            "Storage: {} used, quota limit unknown (reported as 0)",
            storage.used.display
        )?,
    }
    writeln!(out)?;

    writeln!(
        out,
        "Duplicate groups: {}, {} recoverable",
        summary.duplicate_groups_count, storage.duplicates.display
    )?;
    for group in result.duplicates.iter().take(TEXT_LIST_LIMIT) {
        writeln!(
            out,
            "  {} x{}  {} each  ({})",
            group.name,
            group.files.len(),
            format_size(group.size),
            match group.method {
                declutter_core::analysis::DetectionMethod::ChecksumMatch => "checksum",
                declutter_core::analysis::DetectionMethod::NameSizeMatch => "name+size",
            }
        )?;
    }

    writeln!(
        out,
        "Large files: {} totalling {}",
        summary.large_files_count, storage.large_files.display
    )?;
    for large in result.large_files.iter().take(TEXT_LIST_LIMIT) {
        writeln!(out, "  {:>10} MB  {}", large.size_in_mb, large.file.name)?;
    }

    writeln!(
        out,
        "Old files: {} totalling {}",
        summary.old_files_count, storage.old_files.display
    )?;
    for stale in result.old_files.iter().take(TEXT_LIST_LIMIT) {
        writeln!(out, "  {:>6} days  {}", stale.days_old, stale.file.name)?;
    }
    writeln!(out)?;

    writeln!(out, "By category:")?;
    for category in Category::ALL {
        let stats = result.file_stats.get(category);
        writeln!(
            out,
            "  {:<10} {:>7}  {:>10}",
            category.label(),
            format_count(stats.count),
            format_size(stats.total_size)
        )?;
    }
    Ok(())
}
