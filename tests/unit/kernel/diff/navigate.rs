use super::*;
use crate::kernel::diff::DiffKind;

fn blocks(kinds: &[DiffKind]) -> Vec<DiffBlock> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| DiffBlock::new(i..i + 1, i..i + 1, *kind))
        .collect()
}

use DiffKind::{Equal as E, Modify as M};

#[test]
fn next_skips_equal_blocks() {
    let b = blocks(&[E, M, E, M, E]);
    assert_eq!(
        find_difference(&b, 0, Direction::Next),
        Some(Found { index: 1, wrapped: false })
    );
    assert_eq!(
        find_difference(&b, 1, Direction::Next),
        Some(Found { index: 3, wrapped: false })
    );
}

#[test]
fn next_wraps_to_start() {
    let b = blocks(&[E, M, E, M, E]);
    assert_eq!(
        find_difference(&b, 3, Direction::Next),
        Some(Found { index: 1, wrapped: true })
    );
}

#[test]
fn previous_wraps_to_end() {
    let b = blocks(&[E, M, E, M, E]);
    assert_eq!(
        find_difference(&b, 3, Direction::Previous),
        Some(Found { index: 1, wrapped: false })
    );
    assert_eq!(
        find_difference(&b, 1, Direction::Previous),
        Some(Found { index: 3, wrapped: true })
    );
}

#[test]
fn single_difference_wraps_onto_itself() {
    let b = blocks(&[E, M, E]);
    assert_eq!(
        find_difference(&b, 1, Direction::Next),
        Some(Found { index: 1, wrapped: true })
    );
    assert_eq!(
        find_difference(&b, 1, Direction::Previous),
        Some(Found { index: 1, wrapped: true })
    );
}

#[test]
fn no_differences_is_none() {
    let b = blocks(&[E]);
    assert_eq!(find_difference(&b, 0, Direction::Next), None);
    assert_eq!(find_difference(&b, 0, Direction::Previous), None);
    assert_eq!(find_difference(&[], 0, Direction::Next), None);
}

#[test]
fn out_of_range_current_is_clamped() {
    let b = blocks(&[M, E]);
    assert_eq!(
        find_difference(&b, 9, Direction::Next),
        Some(Found { index: 0, wrapped: true })
    );
}

#[test]
fn ordinal_counts_differences_only() {
    let b = blocks(&[E, M, E, M, DiffKind::Add]);
    assert_eq!(difference_ordinal(&b, 1), (1, 3));
    assert_eq!(difference_ordinal(&b, 3), (2, 3));
    assert_eq!(difference_ordinal(&b, 4), (3, 3));
}

#[test]
fn outcome_status_text() {
    let moved = NavigateOutcome::Moved {
        ordinal: 2,
        total: 5,
        wrapped: false,
    };
    assert_eq!(moved.to_string(), "Difference 2/5");
    let wrapped = NavigateOutcome::Moved {
        ordinal: 1,
        total: 5,
        wrapped: true,
    };
    assert_eq!(wrapped.to_string(), "Difference 1/5 (wrapped)");
    assert_eq!(NavigateOutcome::NoDifferences.to_string(), "No differences found");
}
