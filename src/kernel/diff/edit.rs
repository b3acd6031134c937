//! 单侧缓冲编辑：按 (row, col) 插入、删除、拆行、合并行
//!
//! `col` is a char index. Motions never mutate the buffer.

use crate::models::LineBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorLineStart,
    CursorLineEnd,
}

impl EditOp {
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            EditOp::InsertChar(_)
                | EditOp::InsertNewline
                | EditOp::DeleteBackward
                | EditOp::DeleteForward
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditCursor {
    pub row: usize,
    pub col: usize,
}

impl EditCursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Pulls the cursor back inside `buffer`.
    pub fn clamp_to(&mut self, buffer: &LineBuffer) {
        self.row = self.row.min(buffer.len().saturating_sub(1));
        self.col = self.col.min(buffer.line_len(self.row));
    }
}

/// Applies `op` at `cursor`. Returns whether the buffer changed.
pub fn apply(buffer: &mut LineBuffer, cursor: &mut EditCursor, op: EditOp) -> bool {
    if buffer.is_empty() && op.is_mutation() {
        // A merge can leave a side with zero lines; typing starts a fresh one.
        buffer.splice(0..0, vec![String::new()]);
    }
    cursor.clamp_to(buffer);

    match op {
        EditOp::InsertChar(ch) => {
            let inserted = buffer.insert_char(cursor.row, cursor.col, ch);
            if inserted {
                cursor.col += 1;
            }
            inserted
        }
        EditOp::InsertNewline => {
            let split = buffer.split_line(cursor.row, cursor.col);
            if split {
                cursor.row += 1;
                cursor.col = 0;
            }
            split
        }
        EditOp::DeleteBackward => {
            if cursor.col > 0 {
                cursor.col -= 1;
                buffer.remove_char(cursor.row, cursor.col)
            } else if cursor.row > 0 {
                match buffer.join_with_next(cursor.row - 1) {
                    Some(prev_len) => {
                        cursor.row -= 1;
                        cursor.col = prev_len;
                        true
                    }
                    None => false,
                }
            } else {
                false
            }
        }
        EditOp::DeleteForward => {
            if cursor.col < buffer.line_len(cursor.row) {
                buffer.remove_char(cursor.row, cursor.col)
            } else {
                buffer.join_with_next(cursor.row).is_some()
            }
        }
        EditOp::CursorUp => {
            cursor.row = cursor.row.saturating_sub(1);
            cursor.clamp_to(buffer);
            false
        }
        EditOp::CursorDown => {
            cursor.row += 1;
            cursor.clamp_to(buffer);
            false
        }
        EditOp::CursorLeft => {
            cursor.col = cursor.col.saturating_sub(1);
            false
        }
        EditOp::CursorRight => {
            cursor.col = (cursor.col + 1).min(buffer.line_len(cursor.row));
            false
        }
        EditOp::CursorLineStart => {
            cursor.col = 0;
            false
        }
        EditOp::CursorLineEnd => {
            cursor.col = buffer.line_len(cursor.row);
            false
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/diff/edit.rs"]
mod tests;
