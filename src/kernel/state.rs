use std::path::Path;

use crate::kernel::compare::CompareSnapshot;
use crate::kernel::diff::{DiffSession, SessionMode};
use crate::kernel::services::ports::CloseGuard;
use crate::models::{PaneListing, Side};

/// What the two panes are currently showing. At most one diff session or compare snapshot
/// exists at a time.
#[derive(Debug, Clone, Default)]
pub enum Mode {
    #[default]
    Browse,
    Diff(Box<DiffSession>),
    Compare(CompareSnapshot),
}

impl Mode {
    pub fn is_browse(&self) -> bool {
        matches!(self, Mode::Browse)
    }

    pub fn diff(&self) -> Option<&DiffSession> {
        match self {
            Mode::Diff(session) => Some(session),
            _ => None,
        }
    }

    pub fn diff_mut(&mut self) -> Option<&mut DiffSession> {
        match self {
            Mode::Diff(session) => Some(session),
            _ => None,
        }
    }

    pub fn compare(&self) -> Option<&CompareSnapshot> {
        match self {
            Mode::Compare(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Input context derived from the mode, used for key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    Browse,
    Compare,
    Diff,
    DiffEdit,
    ClosePrompt,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub left: PaneListing,
    pub right: PaneListing,
    pub active: Side,
    pub mode: Mode,
    pub status: Option<String>,
    /// Rows available to a pane or to the diff view.
    pub view_height: usize,
    pub close_guard: CloseGuard,
    /// Set while a diff opened from compare mode is showing; closing it re-enters compare.
    pub return_to_compare: bool,
}

impl AppState {
    pub fn new(left: PaneListing, right: PaneListing) -> Self {
        Self {
            left,
            right,
            active: Side::Left,
            mode: Mode::Browse,
            status: None,
            view_height: 20,
            close_guard: CloseGuard::default(),
            return_to_compare: false,
        }
    }

    pub fn pane(&self, side: Side) -> &PaneListing {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, side: Side) -> &mut PaneListing {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn dir(&self, side: Side) -> &Path {
        self.pane(side).dir()
    }

    pub fn input_context(&self) -> InputContext {
        match &self.mode {
            Mode::Browse => InputContext::Browse,
            Mode::Compare(_) => InputContext::Compare,
            Mode::Diff(session) => match session.mode() {
                SessionMode::Viewing => InputContext::Diff,
                SessionMode::Editing => InputContext::DiffEdit,
                SessionMode::ConfirmClose => InputContext::ClosePrompt,
            },
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }
}
