use super::*;
use crate::kernel::compare::compare;
use crate::models::{FileMeta, ListingEntry};
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tempfile::{tempdir, TempDir};

struct Dirs {
    _root: TempDir,
    left: PathBuf,
    right: PathBuf,
}

fn dirs() -> Dirs {
    let root = tempdir().unwrap();
    let left = root.path().join("left");
    let right = root.path().join("right");
    fs::create_dir(&left).unwrap();
    fs::create_dir(&right).unwrap();
    Dirs {
        _root: root,
        left,
        right,
    }
}

fn write_at(path: &std::path::Path, content: &str, secs: u64) {
    fs::write(path, content).unwrap();
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn snapshot(files: &FileService, d: &Dirs) -> CompareSnapshot {
    let left = files.list(&d.left).unwrap();
    let right = files.list(&d.right).unwrap();
    compare(&left, &right)
}

#[test]
fn direction_accepts() {
    assert!(SyncDirection::LeftToRight.accepts(CompareStatus::LeftOnly));
    assert!(SyncDirection::LeftToRight.accepts(CompareStatus::Different));
    assert!(!SyncDirection::LeftToRight.accepts(CompareStatus::RightOnly));
    assert!(!SyncDirection::LeftToRight.accepts(CompareStatus::Identical));
    assert!(SyncDirection::RightToLeft.accepts(CompareStatus::RightOnly));
    assert!(!SyncDirection::RightToLeft.accepts(CompareStatus::LeftOnly));
    assert_eq!(SyncDirection::RightToLeft.dest(), Side::Left);
}

#[test]
fn pick_targets_prefers_selection() {
    let entries = vec![
        ListingEntry::new("a", "/d/a", FileMeta::file(1, None)),
        ListingEntry::new("b", "/d/b", FileMeta::file(1, None)),
    ];
    let mut pane = PaneListing::from_entries("/d", entries);
    // ".." sits at the top
    assert_eq!(pick_targets(&pane, true), Vec::<String>::new());

    pane.move_highlight(1);
    assert_eq!(pick_targets(&pane, true), vec!["a".to_string()]);
    assert!(pick_targets(&pane, false).is_empty());

    pane.move_highlight(1);
    pane.toggle_selection();
    assert_eq!(pick_targets(&pane, false), vec!["b".to_string()]);
}

#[test]
fn one_direction_copies_qualifying_entries() {
    let d = dirs();
    write_at(&d.left.join("new.txt"), "new", 100);
    write_at(&d.left.join("changed.txt"), "left", 200);
    write_at(&d.right.join("changed.txt"), "right side", 100);
    write_at(&d.right.join("theirs.txt"), "theirs", 100);
    fs::create_dir(d.left.join("sub")).unwrap();
    fs::write(d.left.join("sub").join("inner.txt"), "inner").unwrap();

    let files = FileService::new();
    let snap = snapshot(&files, &d);
    let targets: Vec<String> = ["new.txt", "changed.txt", "theirs.txt", "sub"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let report =
        sync_one_direction(&snap, &targets, SyncDirection::LeftToRight, &d.right, &files).unwrap();
    assert_eq!(report.copied, 3);
    assert!(report.last_error.is_none());
    assert_eq!(report.to_string(), "Synced 3 file(s) left→right");

    assert_eq!(fs::read_to_string(d.right.join("new.txt")).unwrap(), "new");
    assert_eq!(fs::read_to_string(d.right.join("changed.txt")).unwrap(), "left");
    assert_eq!(
        fs::read_to_string(d.right.join("sub").join("inner.txt")).unwrap(),
        "inner"
    );
    assert!(!d.left.join("theirs.txt").exists());
}

#[test]
fn one_direction_without_qualifying_targets() {
    let d = dirs();
    write_at(&d.right.join("theirs.txt"), "theirs", 100);
    let files = FileService::new();
    let snap = snapshot(&files, &d);

    let err = sync_one_direction(
        &snap,
        &["theirs.txt".to_string(), "missing".to_string()],
        SyncDirection::LeftToRight,
        &d.right,
        &files,
    )
    .unwrap_err();
    assert_eq!(err, SyncError::NothingToSync(SyncDirection::LeftToRight));
    assert_eq!(
        err.to_string(),
        "No files to sync (select left_only or different files)"
    );
}

#[test]
fn nothing_to_sync_names_the_source_side_statuses() {
    let d = dirs();
    write_at(&d.left.join("mine.txt"), "mine", 100);
    let files = FileService::new();
    let snap = snapshot(&files, &d);

    let err = sync_one_direction(
        &snap,
        &["mine.txt".to_string()],
        SyncDirection::RightToLeft,
        &d.left,
        &files,
    )
    .unwrap_err();
    assert_eq!(err, SyncError::NothingToSync(SyncDirection::RightToLeft));
    assert_eq!(
        err.to_string(),
        "No files to sync (select right_only or different files)"
    );
}

#[test]
fn one_direction_keeps_going_after_a_failure() {
    let d = dirs();
    write_at(&d.left.join("a.txt"), "a", 100);
    write_at(&d.left.join("b.txt"), "b", 100);

    let files = FileService::new();
    let snap = snapshot(&files, &d);
    fs::remove_file(d.left.join("a.txt")).unwrap();

    let report = sync_one_direction(
        &snap,
        &["a.txt".to_string(), "b.txt".to_string()],
        SyncDirection::LeftToRight,
        &d.right,
        &files,
    )
    .unwrap();
    assert_eq!(report.copied, 1);
    let err = report.last_error.clone().unwrap();
    assert!(err.starts_with("a.txt: "));
    assert!(report.to_string().contains(", last error: a.txt: "));
    assert!(d.right.join("b.txt").exists());
}

#[test]
fn both_ways_copies_one_sided_and_newer() {
    let d = dirs();
    write_at(&d.left.join("f1"), "only left", 100);
    write_at(&d.right.join("f2"), "only right", 100);
    write_at(&d.left.join("f3"), "newer", 300);
    write_at(&d.right.join("f3"), "older!", 200);
    write_at(&d.left.join("same"), "same", 50);
    write_at(&d.right.join("same"), "same", 50);

    let files = FileService::new();
    let snap = snapshot(&files, &d);
    let report = sync_both_ways(&snap, &d.left, &d.right, &files);

    assert_eq!(report.left_to_right, 2);
    assert_eq!(report.right_to_left, 1);
    assert_eq!(report.newer_copied, 1);
    assert!(report.last_error.is_none());
    assert_eq!(
        report.to_string(),
        "Synced both ways: 2 left→right, 1 right→left, 1 newer copied"
    );

    assert_eq!(fs::read_to_string(d.right.join("f1")).unwrap(), "only left");
    assert_eq!(fs::read_to_string(d.left.join("f2")).unwrap(), "only right");
    assert_eq!(fs::read_to_string(d.right.join("f3")).unwrap(), "newer");
}

#[test]
fn both_ways_skips_equal_mtimes_and_directories() {
    let d = dirs();
    write_at(&d.left.join("tie"), "short", 100);
    write_at(&d.right.join("tie"), "longer text", 100);
    fs::create_dir(d.left.join("x")).unwrap();
    write_at(&d.right.join("x"), "file", 100);

    let files = FileService::new();
    let snap = snapshot(&files, &d);
    assert_eq!(snap.status("tie"), Some(CompareStatus::Different));
    assert_eq!(snap.status("x"), Some(CompareStatus::Different));

    let report = sync_both_ways(&snap, &d.left, &d.right, &files);
    assert_eq!(report, BothWaysReport::default());
    assert_eq!(fs::read_to_string(d.left.join("tie")).unwrap(), "short");
}
