use super::DiffBlock;
use crate::models::{LineBuffer, Side};

/// Replaces the `from.other()` range of `block` with the lines of its `from` range.
/// Returns `false` and leaves both buffers untouched for an equal block.
pub fn merge_block(
    left: &mut LineBuffer,
    right: &mut LineBuffer,
    block: &DiffBlock,
    from: Side,
) -> bool {
    if !block.kind.is_difference() {
        return false;
    }
    let (source, dest) = match from {
        Side::Left => (&*left, right),
        Side::Right => (&*right, left),
    };
    let lines = source.slice(block.range(from).clone()).to_vec();
    dest.splice(block.range(from.other()).clone(), lines);
    true
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/diff/merge.rs"]
mod tests;
