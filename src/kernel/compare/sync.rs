//! 目录同步：单向（按选择）与双向（较新者覆盖较旧者）
//!
//! 单个条目失败不会中断整批；只记录最后一个错误。

use super::{CompareEntry, CompareSnapshot, CompareStatus};
use crate::kernel::services::adapters::FileService;
use crate::models::{PaneListing, Side};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    LeftToRight,
    RightToLeft,
}

impl SyncDirection {
    pub fn source(self) -> Side {
        match self {
            SyncDirection::LeftToRight => Side::Left,
            SyncDirection::RightToLeft => Side::Right,
        }
    }

    pub fn dest(self) -> Side {
        self.source().other()
    }

    /// Whether an entry with `status` is copied in this direction.
    pub fn accepts(self, status: CompareStatus) -> bool {
        matches!(
            (self, status),
            (SyncDirection::LeftToRight, CompareStatus::LeftOnly)
                | (SyncDirection::RightToLeft, CompareStatus::RightOnly)
                | (_, CompareStatus::Different)
        )
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SyncDirection::LeftToRight => "left→right",
            SyncDirection::RightToLeft => "right→left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    NotInCompareMode,
    NothingToSync(SyncDirection),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::NotInCompareMode => f.write_str("Not in compare mode"),
            SyncError::NothingToSync(SyncDirection::LeftToRight) => {
                f.write_str("No files to sync (select left_only or different files)")
            }
            SyncError::NothingToSync(SyncDirection::RightToLeft) => {
                f.write_str("No files to sync (select right_only or different files)")
            }
        }
    }
}

impl std::error::Error for SyncError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub direction: SyncDirection,
    pub copied: usize,
    pub last_error: Option<String>,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synced {} file(s) {}", self.copied, self.direction.arrow())?;
        if let Some(err) = &self.last_error {
            write!(f, ", last error: {}", err)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BothWaysReport {
    pub left_to_right: usize,
    pub right_to_left: usize,
    /// Copies decided by modification time; also counted in their direction.
    pub newer_copied: usize,
    pub last_error: Option<String>,
}

impl fmt::Display for BothWaysReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synced both ways: {} left→right, {} right→left, {} newer copied",
            self.left_to_right, self.right_to_left, self.newer_copied
        )?;
        if let Some(err) = &self.last_error {
            write!(f, " | Error: {}", err)?;
        }
        Ok(())
    }
}

/// Names to sync from `source`: its multi-selection, or else its highlighted entry when it is
/// the active pane.
pub fn pick_targets(source: &PaneListing, source_is_active: bool) -> Vec<String> {
    if source.has_selection() {
        return source
            .selected_entries()
            .into_iter()
            .map(|e| e.name.clone())
            .collect();
    }
    if !source_is_active {
        return Vec::new();
    }
    source
        .highlighted()
        .filter(|e| !e.is_parent_placeholder())
        .map(|e| vec![e.name.clone()])
        .unwrap_or_default()
}

fn copy_entry(
    name: &str,
    entry: &CompareEntry,
    from: Side,
    dest_dir: &Path,
    files: &FileService,
) -> Result<(), String> {
    let Some(source) = entry.side(from) else {
        return Err(format!("{}: missing on {} side", name, from));
    };
    let target = dest_dir.join(name);
    files.copy_recursive(&source.path, &target).map_err(|e| {
        tracing::warn!(
            from = %source.path.display(),
            to = %target.display(),
            error = %e,
            "sync copy failed"
        );
        format!("{}: {}", name, e)
    })
}

/// Copies every target whose status fits `direction` into `dest_dir`.
pub fn sync_one_direction(
    snapshot: &CompareSnapshot,
    targets: &[String],
    direction: SyncDirection,
    dest_dir: &Path,
    files: &FileService,
) -> Result<SyncReport, SyncError> {
    let qualifying: Vec<(&str, &CompareEntry)> = targets
        .iter()
        .filter_map(|name| snapshot.get(name).map(|entry| (name.as_str(), entry)))
        .filter(|(_, entry)| direction.accepts(entry.status))
        .collect();
    if qualifying.is_empty() {
        return Err(SyncError::NothingToSync(direction));
    }

    let mut report = SyncReport {
        direction,
        copied: 0,
        last_error: None,
    };
    for (name, entry) in qualifying {
        match copy_entry(name, entry, direction.source(), dest_dir, files) {
            Ok(()) => report.copied += 1,
            Err(e) => report.last_error = Some(e),
        }
    }
    tracing::info!(
        direction = direction.arrow(),
        copied = report.copied,
        failed = report.last_error.is_some(),
        "sync finished"
    );
    Ok(report)
}

/// Copies one-sided entries across and, for differing files, the newer over the older.
/// Equal or unknown modification times copy nothing.
pub fn sync_both_ways(
    snapshot: &CompareSnapshot,
    left_dir: &Path,
    right_dir: &Path,
    files: &FileService,
) -> BothWaysReport {
    let mut report = BothWaysReport::default();

    for (name, entry) in snapshot.iter() {
        let (direction, by_time) = match entry.status {
            CompareStatus::LeftOnly => (SyncDirection::LeftToRight, false),
            CompareStatus::RightOnly => (SyncDirection::RightToLeft, false),
            CompareStatus::Different => match newer_side(entry) {
                Some(Side::Left) => (SyncDirection::LeftToRight, true),
                Some(Side::Right) => (SyncDirection::RightToLeft, true),
                None => continue,
            },
            CompareStatus::Identical => continue,
        };
        let dest_dir = match direction.dest() {
            Side::Left => left_dir,
            Side::Right => right_dir,
        };

        match copy_entry(name, entry, direction.source(), dest_dir, files) {
            Ok(()) => {
                match direction {
                    SyncDirection::LeftToRight => report.left_to_right += 1,
                    SyncDirection::RightToLeft => report.right_to_left += 1,
                }
                if by_time {
                    report.newer_copied += 1;
                }
            }
            Err(e) => report.last_error = Some(e),
        }
    }

    tracing::info!(
        left_to_right = report.left_to_right,
        right_to_left = report.right_to_left,
        newer = report.newer_copied,
        failed = report.last_error.is_some(),
        "sync both ways finished"
    );
    report
}

fn newer_side(entry: &CompareEntry) -> Option<Side> {
    let (left, right) = (entry.left.as_ref()?, entry.right.as_ref()?);
    if left.is_dir() || right.is_dir() {
        return None;
    }
    let (l, r) = (left.meta.modified?, right.meta.modified?);
    match l.cmp(&r) {
        std::cmp::Ordering::Greater => Some(Side::Left),
        std::cmp::Ordering::Less => Some(Side::Right),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/compare/sync.rs"]
mod tests;
