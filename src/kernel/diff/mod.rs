//! 行级 diff / merge 引擎
//!
//! - `calculate`: 有界前瞻（K=3）的分块算法
//! - `navigate`: 在非 equal 块之间跳转（循环）
//! - `merge`: 把一侧的块内容拷贝到另一侧
//! - `edit`: 单侧缓冲的按位置编辑
//! - `session`: 打开 / 编辑 / 保存 / 关闭的状态机

pub mod calculate;
pub mod edit;
pub mod merge;
pub mod navigate;
pub mod session;

use crate::models::Side;
use std::ops::Range;

pub use calculate::{calculate, LOOKAHEAD};
pub use edit::{EditCursor, EditOp};
pub use merge::merge_block;
pub use navigate::{find_difference, Direction, Found, NavigateOutcome};
pub use session::{
    CloseChoice, CloseOutcome, DiffSession, MergeOutcome, OpenRejection, SaveError, SaveReport,
    SessionError, SessionMode, BINARY_SNIFF_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Equal,
    /// Lines present only on the right.
    Add,
    /// Lines present only on the left.
    Delete,
    Modify,
}

impl DiffKind {
    pub fn is_difference(self) -> bool {
        self != DiffKind::Equal
    }
}

/// One segment of the partition of both buffers. An empty range marks the insertion point on
/// the side that has no lines in this block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    pub left: Range<usize>,
    pub right: Range<usize>,
    pub kind: DiffKind,
}

impl DiffBlock {
    pub fn new(left: Range<usize>, right: Range<usize>, kind: DiffKind) -> Self {
        Self { left, right, kind }
    }

    pub fn range(&self, side: Side) -> &Range<usize> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}
