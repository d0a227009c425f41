//! Duplicate file detection (provider checksum first, then name + size).
//!
//! Two tiers, in priority order:
//! 1. Files with a checksum are grouped by checksum value.
//! 2. Files without one are grouped by the `(name, size)` pair. A group
//!    here is suppressed if any member already sits in a tier-1 group.
//!
//! Files at or below the size floor are ignored in both tiers, which keeps
//! icons and empty placeholders from flooding the results.
use crate::model::FileRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// How a duplicate group was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    ChecksumMatch,
    NameSizeMatch,
}

/// A group of files that are copies of each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// `md5_<checksum>` or `name_size_<name>-<size>`.
    pub id: String,
    /// Name of the first member.
    pub name: String,
    /// Size of the first member.
    pub size: u64,
    #[serde(rename = "type")]
    pub method: DetectionMethod,
    /// Members in listing order. Always at least two.
    pub files: Vec<FileRecord>,
    pub total_size: u64,
    /// Bytes freed by keeping only the first member.
    pub potential_savings: u64,
}

impl DuplicateGroup {
    fn new(id: String, method: DetectionMethod, files: Vec<FileRecord>) -> Self {
        debug_assert!(files.len() >= 2, "duplicate group needs two members");
        let total_size = files.iter().map(|f| f.size).fold(0u64, u64::saturating_add);
        let kept = files.first().map_or(0, |f| f.size);
        Self {
            id,
            name: files.first().map(|f| f.name.to_string()).unwrap_or_default(),
            size: kept,
            method,
            total_size,
            potential_savings: total_size.saturating_sub(kept),
            files,
        }
    }
}

/// Group items by key, keeping groups in order of first appearance and
/// members in listing order.
fn group_in_order<'a, K, I>(items: I, key: impl Fn(&'a FileRecord) -> K) -> Vec<(K, Vec<&'a FileRecord>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a FileRecord>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a FileRecord>)> = Vec::new();

    for file in items {
        let k = key(file);
        match slots.get(&k) {
            Some(&slot) => groups[slot].1.push(file),
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push((k, vec![file]));
            }
        }
    }
    groups
}

/// Find duplicate groups in a listing.
///
/// `min_size` is the duplicate floor: only files strictly larger take part.
/// Every returned group has at least two members and no file appears in
/// more than one group.
pub fn find_duplicates(files: &[FileRecord], min_size: u64) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    // Tier 1: checksum.
    let with_checksum = files
        .iter()
        .filter(|f| f.size > min_size && f.checksum().is_some());
    for (checksum, members) in group_in_order(with_checksum, |f| f.checksum().unwrap_or_default()) {
        if members.len() > 1 {
            groups.push(DuplicateGroup::new(
                format!("md5_{checksum}"),
                DetectionMethod::ChecksumMatch,
                members.into_iter().cloned().collect(),
            ));
        }
    }

    let claimed: HashSet<&str> = groups
        .iter()
        .flat_map(|g| g.files.iter().map(|f| f.id.as_str()))
        .collect();

    // Tier 2: name + size, for files the provider did not checksum.
    let without_checksum = files
        .iter()
        .filter(|f| f.size > min_size && f.checksum().is_none());
    let mut name_size_groups = Vec::new();
    for ((name, size), members) in group_in_order(without_checksum, |f| (f.name.as_str(), f.size)) {
        if members.len() < 2 {
            continue;
        }
        if members.iter().any(|f| claimed.contains(f.id.as_str())) {
            continue;
        }
        name_size_groups.push(DuplicateGroup::new(
            format!("name_size_{name}-{size}"),
            DetectionMethod::NameSizeMatch,
            members.into_iter().cloned().collect(),
        ));
    }
    groups.extend(name_size_groups);

    groups
}

/// Total bytes recoverable by keeping one copy per group.
pub fn duplicate_savings(groups: &[DuplicateGroup]) -> u64 {
    groups
        .iter()
        .map(|g| g.potential_savings)
        .fold(0, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: u64 = 1024;

    fn summed(id: &str, name: &str, size: u64, checksum: &str) -> FileRecord {
        FileRecord::new(id, name, size).with_checksum(checksum)
    }

    /// Three identical checksums above the floor form one group.
    #[test]
    fn checksum_group_of_three() {
        let files = vec![
            summed("1", "a.jpg", 2048, "abc123"),
            summed("2", "b.jpg", 2048, "abc123"),
            summed("3", "c.jpg", 2048, "abc123"),
        ];
        let groups = find_duplicates(&files, FLOOR);

        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.id, "md5_abc123");
        assert_eq!(g.method, DetectionMethod::ChecksumMatch);
        assert_eq!(g.files.len(), 3);
        assert_eq!(g.total_size, 6144);
        assert_eq!(g.potential_savings, 4096);
        assert_eq!(g.name, "a.jpg");
        assert_eq!(g.size, 2048);
    }

    #[test]
    fn name_size_group_without_checksum() {
        let files = vec![
            FileRecord::new("1", "x.txt", 5000),
            FileRecord::new("2", "x.txt", 5000),
        ];
        let groups = find_duplicates(&files, FLOOR);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].method, DetectionMethod::NameSizeMatch);
        assert_eq!(groups[0].id, "name_size_x.txt-5000");
        assert_eq!(groups[0].files.len(), 2);
        assert_eq!(groups[0].potential_savings, 5000);
    }

    /// Files at the floor are ignored entirely.
    #[test]
    fn files_at_or_below_floor_are_ignored() {
        let files = vec![
            summed("1", "icon.png", 1024, "same"),
            summed("2", "icon.png", 1024, "same"),
            FileRecord::new("3", "tiny", 10),
            FileRecord::new("4", "tiny", 10),
        ];
        assert!(find_duplicates(&files, FLOOR).is_empty());
    }

    #[test]
    fn single_member_never_emits() {
        let files = vec![
            summed("1", "a", 4096, "one"),
            summed("2", "b", 4096, "two"),
            FileRecord::new("3", "c", 4096),
        ];
        assert!(find_duplicates(&files, FLOOR).is_empty());
    }

    /// A checksummed file never joins a name + size group, even when it
    /// shares the name and size with unchecksummed files.
    #[test]
    fn checksum_tier_has_priority() {
        let files = vec![
            summed("1", "dup.bin", 4096, "h"),
            summed("2", "dup.bin", 4096, "h"),
            FileRecord::new("3", "dup.bin", 4096),
        ];
        let groups = find_duplicates(&files, FLOOR);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].method, DetectionMethod::ChecksumMatch);
        assert_eq!(groups[0].files.len(), 2);
    }

    /// A name + size group whose member id was already claimed by a
    /// checksum group is dropped as a whole.
    #[test]
    fn name_size_group_suppressed_when_member_claimed() {
        let files = vec![
            summed("shared", "a.bin", 4096, "h"),
            summed("other", "b.bin", 4096, "h"),
            // Same id re-listed without a checksum (e.g. shortcut metadata).
            FileRecord::new("shared", "copy.bin", 9000),
            FileRecord::new("fresh", "copy.bin", 9000),
        ];
        let groups = find_duplicates(&files, FLOOR);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "md5_h");
    }

    #[test]
    fn empty_checksum_counts_as_missing() {
        let files = vec![
            summed("1", "same.doc", 3000, ""),
            summed("2", "same.doc", 3000, ""),
        ];
        let groups = find_duplicates(&files, FLOOR);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].method, DetectionMethod::NameSizeMatch);
    }

    /// No file id appears in two groups; every group has two or more members.
    #[test]
    fn groups_are_disjoint_and_non_trivial() {
        let mut files = Vec::new();
        for i in 0..30u64 {
            let id = format!("f{i}");
            let f = if i % 3 == 0 {
                FileRecord::new(id, format!("n{}", i % 4), 2000 + (i % 2))
            } else {
                summed(&id, "n", 5000, &format!("c{}", i % 5))
            };
            files.push(f);
        }
        let groups = find_duplicates(&files, FLOOR);
        assert!(!groups.is_empty());

        let mut seen = HashSet::new();
        for g in &groups {
            assert!(g.files.len() >= 2, "group {} too small", g.id);
            for f in &g.files {
                assert!(seen.insert(f.id.clone()), "{} in two groups", f.id);
            }
        }
    }

    /// Groups come out checksum tier first, each tier in order of first
    /// appearance; members keep listing order.
    #[test]
    fn output_order_follows_listing() {
        let files = vec![
            FileRecord::new("n1", "z.txt", 2000),
            summed("c1", "b", 2000, "bbb"),
            summed("c2", "a", 2000, "aaa"),
            FileRecord::new("n2", "z.txt", 2000),
            summed("c3", "b2", 2000, "bbb"),
            summed("c4", "a2", 2000, "aaa"),
        ];
        let groups = find_duplicates(&files, FLOOR);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["md5_bbb", "md5_aaa", "name_size_z.txt-2000"]);

        let members: Vec<&str> = groups[0].files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(members, vec!["c1", "c3"]);
    }

    #[test]
    fn huge_sizes_do_not_overflow() {
        let files = vec![
            FileRecord::new("1", "huge.img", u64::MAX),
            FileRecord::new("2", "huge.img", u64::MAX),
            FileRecord::new("3", "huge.img", u64::MAX),
        ];
        let groups = find_duplicates(&files, FLOOR);
        assert_eq!(groups[0].total_size, u64::MAX);
        assert_eq!(groups[0].potential_savings, 0);
        assert_eq!(duplicate_savings(&groups), 0);
    }

    #[test]
    fn savings_sum_over_groups() {
        let files = vec![
            summed("1", "a", 2048, "x"),
            summed("2", "a", 2048, "x"),
            FileRecord::new("3", "b", 3000),
            FileRecord::new("4", "b", 3000),
            FileRecord::new("5", "b", 3000),
        ];
        let groups = find_duplicates(&files, FLOOR);
        assert_eq!(duplicate_savings(&groups), 2048 + 6000);
    }
}
