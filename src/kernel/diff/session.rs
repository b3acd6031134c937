//! Diff 会话状态机：Viewing ⇄ Editing，Viewing → ConfirmClose
//!
//! 会话独占左右两个行缓冲；合并与退出编辑后整体重算分块。

use super::calculate::calculate;
use super::edit::{self, EditCursor, EditOp};
use super::merge::merge_block;
use super::navigate::{difference_ordinal, find_difference, Direction, NavigateOutcome};
use super::DiffBlock;
use crate::kernel::services::adapters::FileService;
use crate::kernel::services::ports::{CloseGuard, FileError};
use crate::models::{LineBuffer, ListingEntry, Side};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bytes inspected for a NUL when deciding whether a file is text.
pub const BINARY_SNIFF_LEN: usize = 8192;

#[derive(Debug)]
pub enum OpenRejection {
    MissingSelection,
    ParentPlaceholder,
    Directory,
    Unreadable { side: Side, error: FileError },
    Binary,
}

impl fmt::Display for OpenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenRejection::MissingSelection => f.write_str("Both panes must have a file selected"),
            OpenRejection::ParentPlaceholder => f.write_str("Cannot diff parent directory link"),
            OpenRejection::Directory => {
                f.write_str("Both selections must be files, not directories")
            }
            OpenRejection::Unreadable { side, error } => {
                write!(f, "Error reading {} file: {}", side, error)
            }
            OpenRejection::Binary => f.write_str("Both files must be readable text files"),
        }
    }
}

impl std::error::Error for OpenRejection {}

#[derive(Debug)]
pub struct SaveError {
    pub side: Side,
    pub path: PathBuf,
    pub error: FileError,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error saving {} file: {}", self.side, self.error)
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[derive(Debug)]
pub enum SessionError {
    NotAvailableWhileEditing,
    NotEditing,
    NoDifference,
    NoBlock,
    NoClosePending,
    ClosePending,
    Save(SaveError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotAvailableWhileEditing => f.write_str("Not available while editing"),
            SessionError::NotEditing => f.write_str("Not in edit mode"),
            SessionError::NoDifference => f.write_str("No difference at current position"),
            SessionError::NoBlock => f.write_str("No block at current position"),
            SessionError::NoClosePending => f.write_str("No close pending"),
            SessionError::ClosePending => f.write_str("Answer the close prompt first"),
            SessionError::Save(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<SaveError> for SessionError {
    fn from(e: SaveError) -> Self {
        SessionError::Save(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: usize,
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.saved {
            0 => f.write_str("No changes to save"),
            1 => f.write_str("Saved 1 file"),
            _ => f.write_str("Saved both files"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub from: Side,
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Copied {} → {}", self.from, self.from.other())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    SavedAndClosed(SaveReport),
    /// Two-step guard: flags were cleared, the next close goes through.
    Warned,
    Prompted,
    Cancelled,
}

impl CloseOutcome {
    pub fn is_closed(self) -> bool {
        matches!(self, CloseOutcome::Closed | CloseOutcome::SavedAndClosed(_))
    }
}

impl fmt::Display for CloseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseOutcome::Closed => f.write_str("Diff closed"),
            CloseOutcome::SavedAndClosed(report) => write!(f, "{}, diff closed", report),
            CloseOutcome::Warned => {
                f.write_str("Unsaved changes! Press Ctrl+S to save, ESC again to discard")
            }
            CloseOutcome::Prompted => {
                f.write_str("Unsaved changes: [s]ave, [d]iscard, [c]ancel")
            }
            CloseOutcome::Cancelled => f.write_str("Close cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Viewing,
    Editing,
    ConfirmClose,
}

#[derive(Debug, Clone)]
struct SideState {
    path: PathBuf,
    buffer: LineBuffer,
    modified: bool,
}

#[derive(Debug, Clone)]
pub struct DiffSession {
    left: SideState,
    right: SideState,
    blocks: Vec<DiffBlock>,
    current: usize,
    active: Side,
    cursor: EditCursor,
    scroll: usize,
    mode: SessionMode,
}

impl DiffSession {
    /// Validates the two pane entries and reads both files. Nothing is kept on rejection.
    pub fn open(
        left: Option<&ListingEntry>,
        right: Option<&ListingEntry>,
        files: &FileService,
    ) -> Result<Self, OpenRejection> {
        let result = Self::try_open(left, right, files);
        match &result {
            Ok(session) => tracing::info!(
                left = %session.left.path.display(),
                right = %session.right.path.display(),
                blocks = session.blocks.len(),
                "diff opened"
            ),
            Err(reason) => tracing::warn!(%reason, "diff open rejected"),
        }
        result
    }

    fn try_open(
        left: Option<&ListingEntry>,
        right: Option<&ListingEntry>,
        files: &FileService,
    ) -> Result<Self, OpenRejection> {
        let (Some(left), Some(right)) = (left, right) else {
            return Err(OpenRejection::MissingSelection);
        };
        if left.is_parent_placeholder() || right.is_parent_placeholder() {
            return Err(OpenRejection::ParentPlaceholder);
        }
        if left.is_dir() || right.is_dir() {
            return Err(OpenRejection::Directory);
        }

        let read = |side: Side, path: &Path| {
            files
                .read_file_bytes(path)
                .map_err(|error| OpenRejection::Unreadable { side, error })
        };
        let left_bytes = read(Side::Left, &left.path)?;
        let right_bytes = read(Side::Right, &right.path)?;
        if looks_binary(&left_bytes) || looks_binary(&right_bytes) {
            return Err(OpenRejection::Binary);
        }

        Ok(Self::from_buffers(
            left.path.clone(),
            LineBuffer::from_bytes(&left_bytes),
            right.path.clone(),
            LineBuffer::from_bytes(&right_bytes),
        ))
    }

    pub fn from_buffers(
        left_path: PathBuf,
        left: LineBuffer,
        right_path: PathBuf,
        right: LineBuffer,
    ) -> Self {
        let blocks = calculate(left.lines(), right.lines());
        Self {
            left: SideState {
                path: left_path,
                buffer: left,
                modified: false,
            },
            right: SideState {
                path: right_path,
                buffer: right,
                modified: false,
            },
            blocks,
            current: 0,
            active: Side::Left,
            cursor: EditCursor::default(),
            scroll: 0,
            mode: SessionMode::Viewing,
        }
    }

    fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn path(&self, side: Side) -> &Path {
        &self.side(side).path
    }

    pub fn buffer(&self, side: Side) -> &LineBuffer {
        &self.side(side).buffer
    }

    pub fn is_modified(&self, side: Side) -> bool {
        self.side(side).modified
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.left.modified || self.right.modified
    }

    pub fn blocks(&self) -> &[DiffBlock] {
        &self.blocks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_block(&self) -> Option<&DiffBlock> {
        self.blocks.get(self.current)
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    pub fn cursor(&self) -> EditCursor {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn difference_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.kind.is_difference()).count()
    }

    /// Longest of the two buffers; the side-by-side view has this many rows.
    pub fn line_count(&self) -> usize {
        self.left.buffer.len().max(self.right.buffer.len())
    }

    fn ensure_viewing(&self) -> Result<(), SessionError> {
        match self.mode {
            SessionMode::Editing => Err(SessionError::NotAvailableWhileEditing),
            SessionMode::Viewing | SessionMode::ConfirmClose => Ok(()),
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<NavigateOutcome, SessionError> {
        self.ensure_viewing()?;
        let Some(found) = find_difference(&self.blocks, self.current, direction) else {
            return Ok(NavigateOutcome::NoDifferences);
        };
        self.current = found.index;
        self.scroll = self.blocks[found.index].left.start;
        let (ordinal, total) = difference_ordinal(&self.blocks, found.index);
        Ok(NavigateOutcome::Moved {
            ordinal,
            total,
            wrapped: found.wrapped,
        })
    }

    /// Copies the current block from `from` onto the other side and recomputes.
    pub fn merge(&mut self, from: Side) -> Result<MergeOutcome, SessionError> {
        self.ensure_viewing()?;
        let block = self.current_block().cloned().ok_or(SessionError::NoBlock)?;
        if !merge_block(&mut self.left.buffer, &mut self.right.buffer, &block, from) {
            return Err(SessionError::NoDifference);
        }
        self.side_mut(from.other()).modified = true;
        self.recompute();
        Ok(MergeOutcome { from })
    }

    pub fn toggle_active_side(&mut self) -> Result<Side, SessionError> {
        self.ensure_viewing()?;
        self.active = self.active.other();
        Ok(self.active)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Enters edit mode on the active side with the cursor at the scroll line, column 0.
    pub fn enter_edit(&mut self) -> Result<(), SessionError> {
        match self.mode {
            SessionMode::Editing => return Ok(()),
            SessionMode::ConfirmClose => return Err(SessionError::ClosePending),
            SessionMode::Viewing => {}
        }
        let buffer = &self.side(self.active).buffer;
        self.cursor = EditCursor::new(self.scroll.min(buffer.len().saturating_sub(1)), 0);
        self.mode = SessionMode::Editing;
        Ok(())
    }

    /// Returns whether the active buffer changed.
    pub fn edit(&mut self, op: EditOp) -> Result<bool, SessionError> {
        if self.mode != SessionMode::Editing {
            return Err(SessionError::NotEditing);
        }
        let active = self.active;
        let mut cursor = self.cursor;
        let state = self.side_mut(active);
        let changed = edit::apply(&mut state.buffer, &mut cursor, op);
        if changed {
            state.modified = true;
        }
        self.cursor = cursor;
        Ok(changed)
    }

    /// Leaves edit mode; the blocks are always recomputed.
    pub fn exit_edit(&mut self) -> Result<(), SessionError> {
        if self.mode != SessionMode::Editing {
            return Err(SessionError::NotEditing);
        }
        self.mode = SessionMode::Viewing;
        self.recompute();
        Ok(())
    }

    /// Keeps the edit cursor inside a viewport of `height` rows.
    pub fn follow_cursor(&mut self, height: usize) {
        let height = height.max(1);
        if self.cursor.row < self.scroll {
            self.scroll = self.cursor.row;
        } else if self.cursor.row >= self.scroll + height {
            self.scroll = self.cursor.row + 1 - height;
        }
    }

    /// Writes each modified side, left first. Stops at the first failure; the failing side
    /// keeps its modified flag.
    pub fn save(&mut self, files: &FileService) -> Result<SaveReport, SaveError> {
        let mut saved = 0;
        for side in [Side::Left, Side::Right] {
            let state = self.side_mut(side);
            if !state.modified {
                continue;
            }
            let text = state.buffer.to_text();
            if let Err(error) = files.write_file_bytes(&state.path, text.as_bytes()) {
                tracing::warn!(side = %side, path = %state.path.display(), %error, "save failed");
                return Err(SaveError {
                    side,
                    path: state.path.clone(),
                    error,
                });
            }
            state.modified = false;
            saved += 1;
            tracing::info!(side = %side, path = %state.path.display(), "saved");
        }
        Ok(SaveReport { saved })
    }

    /// Asks to close. Without unsaved changes this always closes.
    pub fn request_close(&mut self, guard: CloseGuard) -> CloseOutcome {
        if !self.has_unsaved_changes() {
            return CloseOutcome::Closed;
        }
        match guard {
            CloseGuard::TwoStep => {
                self.left.modified = false;
                self.right.modified = false;
                CloseOutcome::Warned
            }
            CloseGuard::Prompt => {
                self.mode = SessionMode::ConfirmClose;
                CloseOutcome::Prompted
            }
        }
    }

    /// Answers the close prompt. A failed save returns to viewing with nothing discarded.
    pub fn resolve_close(
        &mut self,
        choice: CloseChoice,
        files: &FileService,
    ) -> Result<CloseOutcome, SessionError> {
        if self.mode != SessionMode::ConfirmClose {
            return Err(SessionError::NoClosePending);
        }
        self.mode = SessionMode::Viewing;
        match choice {
            CloseChoice::Save => {
                let report = self.save(files)?;
                Ok(CloseOutcome::SavedAndClosed(report))
            }
            CloseChoice::Discard => {
                tracing::info!("unsaved changes discarded");
                Ok(CloseOutcome::Closed)
            }
            CloseChoice::Cancel => Ok(CloseOutcome::Cancelled),
        }
    }

    fn recompute(&mut self) {
        self.blocks = calculate(self.left.buffer.lines(), self.right.buffer.lines());
        self.current = self.current.min(self.blocks.len().saturating_sub(1));
        let max = self.line_count().saturating_sub(1);
        self.scroll = self.scroll.min(max);
    }
}

fn looks_binary(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    memchr::memchr(0, head).is_some()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/diff/session.rs"]
mod tests;
