//! 分块算法：双指针 + 有界前瞻
//!
//! Not a minimal edit script. A divergence that needs more than [`LOOKAHEAD`] lines to
//! resynchronize comes out as one `Modify` block.

use super::{DiffBlock, DiffKind};

pub const LOOKAHEAD: usize = 3;

/// Partitions `left` and `right` into ordered blocks that together cover both sequences with
/// no gaps or overlaps. Two empty inputs yield a single `Equal` block `0..0 / 0..0`.
pub fn calculate<T: PartialEq>(left: &[T], right: &[T]) -> Vec<DiffBlock> {
    let (n, m) = (left.len(), right.len());
    let mut blocks = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < n || j < m {
        let (eq_i, eq_j) = (i, j);
        while i < n && j < m && left[i] == right[j] {
            i += 1;
            j += 1;
        }
        if i > eq_i {
            blocks.push(DiffBlock::new(eq_i..i, eq_j..j, DiffKind::Equal));
        }
        if i >= n && j >= m {
            break;
        }

        let (start_i, start_j) = (i, j);
        if i >= n || j >= m {
            // One side ran out: the other side's tail is a single block.
            i = n;
            j = m;
        } else {
            loop {
                if let Some(k) = (1..=LOOKAHEAD).find(|k| i + k < n && left[i + k] == right[j]) {
                    i += k;
                } else if let Some(k) =
                    (1..=LOOKAHEAD).find(|k| j + k < m && right[j + k] == left[i])
                {
                    j += k;
                } else {
                    i += 1;
                    j += 1;
                }
                if i >= n || j >= m || left[i] == right[j] {
                    break;
                }
            }
        }

        blocks.push(DiffBlock::new(
            start_i..i,
            start_j..j,
            classify(i > start_i, j > start_j),
        ));
    }

    if blocks.is_empty() {
        blocks.push(DiffBlock::new(0..0, 0..0, DiffKind::Equal));
    }
    tracing::debug!(left = n, right = m, blocks = blocks.len(), "diff computed");
    blocks
}

fn classify(left_moved: bool, right_moved: bool) -> DiffKind {
    match (left_moved, right_moved) {
        (true, false) => DiffKind::Delete,
        (false, true) => DiffKind::Add,
        _ => DiffKind::Modify,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/diff/calculate.rs"]
mod tests;
