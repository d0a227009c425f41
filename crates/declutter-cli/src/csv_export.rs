//! CSV export of the large- and old-file lists.
use anyhow::{Context, Result};
use declutter_core::ScanResult;
use serde::Serialize;
use std::io;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Row<'a> {
    kind: &'static str,
    id: &'a str,
    name: &'a str,
    size: u64,
    category: &'static str,
    modified_time: Option<String>,
    days_old: Option<i64>,
}

/// Write one row per large file, then one per old file.
pub fn write_csv<W: io::Write>(writer: W, result: &ScanResult) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for large in &result.large_files {
        csv.serialize(Row {
            kind: "large",
            id: &large.file.id,
            name: &large.file.name,
            size: large.file.size,
            category: large.category.key(),
            modified_time: large.file.modified_time.map(|t| t.to_rfc3339()),
            days_old: None,
        })?;
    }
    for stale in &result.old_files {
        csv.serialize(Row {
            kind: "old",
            id: &stale.file.id,
            name: &stale.file.name,
            size: stale.file.size,
            category: stale.category.key(),
            modified_time: stale.file.modified_time.map(|t| t.to_rfc3339()),
            days_old: Some(stale.days_old),
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, result: &ScanResult) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    write_csv(io::BufWriter::new(file), result)
        .with_context(|| format!("cannot write {}", path.display()))
}
