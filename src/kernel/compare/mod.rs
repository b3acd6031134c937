//! 目录比较：按名称对两个单层目录列表分类
//!
//! 目录只比名字，不递归；文件按 size + mtime 判断是否相同。

pub mod sync;

use crate::models::{ListingEntry, Side};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

pub use sync::{
    pick_targets, sync_both_ways, sync_one_direction, BothWaysReport, SyncDirection, SyncError,
    SyncReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareStatus {
    LeftOnly,
    RightOnly,
    Different,
    Identical,
}

impl CompareStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareStatus::LeftOnly => "left_only",
            CompareStatus::RightOnly => "right_only",
            CompareStatus::Different => "different",
            CompareStatus::Identical => "identical",
        }
    }
}

impl fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareEntry {
    pub status: CompareStatus,
    pub left: Option<ListingEntry>,
    pub right: Option<ListingEntry>,
}

impl CompareEntry {
    pub fn side(&self, side: Side) -> Option<&ListingEntry> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompareCounts {
    pub total: usize,
    pub left_only: usize,
    pub right_only: usize,
    pub different: usize,
    pub identical: usize,
}

impl fmt::Display for CompareCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compare: {} files | Left only: {} | Right only: {} | Different: {} | Identical: {}",
            self.total, self.left_only, self.right_only, self.different, self.identical
        )
    }
}

/// Name → classification, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSnapshot {
    entries: BTreeMap<String, CompareEntry>,
}

impl CompareSnapshot {
    pub fn get(&self, name: &str) -> Option<&CompareEntry> {
        self.entries.get(name)
    }

    pub fn status(&self, name: &str) -> Option<CompareStatus> {
        self.entries.get(name).map(|e| e.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CompareEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> CompareCounts {
        let mut counts = CompareCounts {
            total: self.entries.len(),
            ..CompareCounts::default()
        };
        for entry in self.entries.values() {
            match entry.status {
                CompareStatus::LeftOnly => counts.left_only += 1,
                CompareStatus::RightOnly => counts.right_only += 1,
                CompareStatus::Different => counts.different += 1,
                CompareStatus::Identical => counts.identical += 1,
            }
        }
        counts
    }
}

/// Classifies every name in either listing. The `..` placeholder is ignored on both sides.
pub fn compare<'a, L, R>(left: L, right: R) -> CompareSnapshot
where
    L: IntoIterator<Item = &'a ListingEntry>,
    R: IntoIterator<Item = &'a ListingEntry>,
{
    let index = |entries: Vec<&'a ListingEntry>| -> FxHashMap<&'a str, &'a ListingEntry> {
        entries
            .into_iter()
            .filter(|e| !e.is_parent_placeholder())
            .map(|e| (e.name.as_str(), e))
            .collect()
    };
    let left = index(left.into_iter().collect());
    let mut right = index(right.into_iter().collect());

    let mut entries = BTreeMap::new();
    for (name, l) in &left {
        let r = right.remove(name);
        let status = match r {
            None => CompareStatus::LeftOnly,
            Some(r) => classify_pair(l, r),
        };
        entries.insert(
            name.to_string(),
            CompareEntry {
                status,
                left: Some((*l).clone()),
                right: r.cloned(),
            },
        );
    }
    for (name, r) in right {
        entries.insert(
            name.to_string(),
            CompareEntry {
                status: CompareStatus::RightOnly,
                left: None,
                right: Some(r.clone()),
            },
        );
    }

    let snapshot = CompareSnapshot { entries };
    tracing::debug!(counts = %snapshot.counts(), "compare snapshot built");
    snapshot
}

fn classify_pair(left: &ListingEntry, right: &ListingEntry) -> CompareStatus {
    match (left.is_dir(), right.is_dir()) {
        (true, true) => CompareStatus::Identical,
        (false, false)
            if left.meta.size == right.meta.size && left.meta.modified == right.meta.modified =>
        {
            CompareStatus::Identical
        }
        _ => CompareStatus::Different,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/compare/compare.rs"]
mod tests;
