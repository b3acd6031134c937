use super::DiffBlock;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    pub index: usize,
    pub wrapped: bool,
}

/// Finds the nearest non-equal block strictly after (or before) `current`, wrapping to the
/// other end when the scan runs out. `current` itself is only reached after a full wrap.
pub fn find_difference(blocks: &[DiffBlock], current: usize, direction: Direction) -> Option<Found> {
    let len = blocks.len();
    if len == 0 {
        return None;
    }
    let current = current.min(len - 1);
    let is_diff = |idx: &usize| blocks[*idx].kind.is_difference();

    let (ahead, wrapped): (Option<usize>, Option<usize>) = match direction {
        Direction::Next => (
            (current + 1..len).find(is_diff),
            (0..=current).find(is_diff),
        ),
        Direction::Previous => (
            (0..current).rev().find(is_diff),
            (current..len).rev().find(is_diff),
        ),
    };

    ahead
        .map(|index| Found {
            index,
            wrapped: false,
        })
        .or_else(|| wrapped.map(|index| Found { index, wrapped: true }))
}

/// Ordinal of the difference at `index` among all non-equal blocks, 1-based, plus the total.
pub fn difference_ordinal(blocks: &[DiffBlock], index: usize) -> (usize, usize) {
    let total = blocks.iter().filter(|b| b.kind.is_difference()).count();
    let before = blocks
        .iter()
        .take(index)
        .filter(|b| b.kind.is_difference())
        .count();
    (before + 1, total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateOutcome {
    Moved {
        ordinal: usize,
        total: usize,
        wrapped: bool,
    },
    NoDifferences,
}

impl fmt::Display for NavigateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateOutcome::Moved {
                ordinal,
                total,
                wrapped,
            } => {
                write!(f, "Difference {}/{}", ordinal, total)?;
                if *wrapped {
                    f.write_str(" (wrapped)")?;
                }
                Ok(())
            }
            NavigateOutcome::NoDifferences => f.write_str("No differences found"),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/diff/navigate.rs"]
mod tests;
