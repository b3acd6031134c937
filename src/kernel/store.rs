use std::fmt;
use std::path::Path;

use crate::core::Command;
use crate::kernel::compare::{
    compare, pick_targets, sync_both_ways, sync_one_direction, CompareSnapshot, SyncDirection,
    SyncError,
};
use crate::kernel::diff::{
    CloseChoice, DiffSession, Direction, EditOp, SessionError, SessionMode,
};
use crate::kernel::services::adapters::FileService;
use crate::kernel::services::ports::FileResult;
use crate::models::{PaneListing, Side};

use super::{Action, AppState, InputContext, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub state_changed: bool,
    pub should_quit: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            state_changed,
            should_quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            state_changed: false,
            should_quit: true,
        }
    }
}

pub struct Store {
    state: AppState,
    files: FileService,
}

impl Store {
    pub fn new(state: AppState, files: FileService) -> Self {
        Self { state, files }
    }

    /// Lists both directories and starts in browse mode.
    pub fn open_dirs(left: &Path, right: &Path, files: FileService) -> FileResult<Self> {
        let left_pane = PaneListing::from_entries(left, files.list(left)?);
        let right_pane = PaneListing::from_entries(right, files.list(right)?);
        Ok(Self::new(AppState::new(left_pane, right_pane), files))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn files(&self) -> &FileService {
        &self.files
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::SetViewHeight { height } => {
                let height = height.max(1);
                let prev = self.state.view_height;
                self.state.view_height = height;
                if let Some(session) = self.state.mode.diff_mut() {
                    if session.mode() == SessionMode::Editing {
                        session.follow_cursor(height);
                    }
                }
                DispatchResult::changed(prev != height)
            }
            Action::Refresh => {
                self.refresh();
                DispatchResult::changed(true)
            }
        }
    }

    fn dispatch_command(&mut self, cmd: Command) -> DispatchResult {
        match self.state.input_context() {
            InputContext::Browse => self.browse_command(cmd),
            InputContext::Compare => self.compare_command(cmd),
            InputContext::Diff => self.diff_command(cmd),
            InputContext::DiffEdit => self.diff_edit_command(cmd),
            InputContext::ClosePrompt => self.close_prompt_command(cmd),
        }
    }

    // ==================== 浏览 ====================

    fn browse_command(&mut self, cmd: Command) -> DispatchResult {
        let side = self.state.active;
        let page = self.state.view_height.saturating_sub(1).max(1) as isize;
        match cmd {
            Command::MoveUp => self.move_highlight(side, -1),
            Command::MoveDown => self.move_highlight(side, 1),
            Command::PageUp => self.move_highlight(side, -page),
            Command::PageDown => self.move_highlight(side, page),
            Command::Activate => self.activate(side),
            Command::GoParent => self.go_parent(side),
            Command::SwitchPane => {
                self.state.active = side.other();
                DispatchResult::changed(true)
            }
            Command::ToggleSelection => {
                DispatchResult::changed(self.state.pane_mut(side).toggle_selection())
            }
            Command::Refresh => {
                self.refresh();
                DispatchResult::changed(true)
            }
            Command::OpenDiff => self.open_diff(),
            Command::ToggleCompare => self.toggle_compare(),
            Command::SyncLeftToRight | Command::SyncRightToLeft | Command::SyncBoth => {
                self.state.set_status(SyncError::NotInCompareMode.to_string());
                DispatchResult::changed(true)
            }
            Command::Quit | Command::Escape => DispatchResult::quit(),
            _ => DispatchResult::default(),
        }
    }

    fn move_highlight(&mut self, side: Side, delta: isize) -> DispatchResult {
        let pane = self.state.pane_mut(side);
        let prev = pane.highlighted_index();
        pane.move_highlight(delta);
        DispatchResult::changed(pane.highlighted_index() != prev)
    }

    fn activate(&mut self, side: Side) -> DispatchResult {
        let Some(entry) = self.state.pane(side).highlighted().cloned() else {
            return DispatchResult::default();
        };
        if !entry.is_dir() {
            return DispatchResult::default();
        }
        if entry.is_parent_placeholder() {
            return self.go_parent(side);
        }
        self.enter_dir(side, &entry.path, None)
    }

    fn go_parent(&mut self, side: Side) -> DispatchResult {
        let dir = self.state.dir(side);
        let Some(parent) = dir.parent().map(Path::to_path_buf) else {
            return DispatchResult::default();
        };
        let came_from = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.enter_dir(side, &parent, came_from.as_deref())
    }

    fn enter_dir(&mut self, side: Side, dir: &Path, highlight: Option<&str>) -> DispatchResult {
        match self.files.list(dir) {
            Ok(entries) => {
                let pane = self.state.pane_mut(side);
                pane.change_dir(dir, entries);
                if let Some(name) = highlight {
                    pane.highlight_name(name);
                }
                self.rebuild_compare();
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to list directory");
                self.state
                    .set_status(format!("Error reading directory {}: {}", dir.display(), e));
            }
        }
        DispatchResult::changed(true)
    }

    fn reload_pane(&mut self, side: Side) {
        let dir = self.state.dir(side).to_path_buf();
        match self.files.list(&dir) {
            Ok(entries) => self.state.pane_mut(side).set_entries(entries),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to reload directory");
                self.state
                    .set_status(format!("Error reading directory {}: {}", dir.display(), e));
            }
        }
    }

    fn refresh(&mut self) {
        self.reload_pane(Side::Left);
        self.reload_pane(Side::Right);
        self.rebuild_compare();
    }

    // ==================== 目录比较 ====================

    fn toggle_compare(&mut self) -> DispatchResult {
        if matches!(self.state.mode, Mode::Compare(_)) {
            self.state.mode = Mode::Browse;
            self.state.set_status("Compare mode off");
            tracing::info!("compare mode off");
        } else {
            self.state.mode = Mode::Compare(CompareSnapshot::default());
            self.rebuild_compare();
            tracing::info!(
                left = %self.state.left.dir().display(),
                right = %self.state.right.dir().display(),
                "compare mode on"
            );
        }
        DispatchResult::changed(true)
    }

    /// Rebuilds the snapshot from the current pane listings when in compare mode.
    fn rebuild_compare(&mut self) {
        if !matches!(self.state.mode, Mode::Compare(_)) {
            return;
        }
        let snapshot = compare(self.state.left.real_entries(), self.state.right.real_entries());
        let counts = snapshot.counts();
        self.state.mode = Mode::Compare(snapshot);
        self.state.set_status(counts.to_string());
    }

    fn compare_command(&mut self, cmd: Command) -> DispatchResult {
        match cmd {
            Command::SyncLeftToRight => self.sync_one(SyncDirection::LeftToRight),
            Command::SyncRightToLeft => self.sync_one(SyncDirection::RightToLeft),
            Command::SyncBoth => self.sync_both(),
            Command::Escape => self.toggle_compare(),
            other => self.browse_command(other),
        }
    }

    fn sync_one(&mut self, direction: SyncDirection) -> DispatchResult {
        let Some(snapshot) = self.state.mode.compare() else {
            self.state.set_status(SyncError::NotInCompareMode.to_string());
            return DispatchResult::changed(true);
        };
        let source = direction.source();
        let targets = pick_targets(self.state.pane(source), self.state.active == source);
        let dest_dir = self.state.dir(direction.dest());

        match sync_one_direction(snapshot, &targets, direction, dest_dir, &self.files) {
            Ok(report) => {
                self.state.pane_mut(source).clear_selection();
                self.refresh();
                self.report_with_counts(report);
            }
            Err(e) => self.state.set_status(e.to_string()),
        }
        DispatchResult::changed(true)
    }

    fn sync_both(&mut self) -> DispatchResult {
        let Some(snapshot) = self.state.mode.compare() else {
            self.state.set_status(SyncError::NotInCompareMode.to_string());
            return DispatchResult::changed(true);
        };
        let report = sync_both_ways(
            snapshot,
            self.state.left.dir(),
            self.state.right.dir(),
            &self.files,
        );
        self.state.left.clear_selection();
        self.state.right.clear_selection();
        self.refresh();
        self.report_with_counts(report);
        DispatchResult::changed(true)
    }

    fn report_with_counts(&mut self, report: impl fmt::Display) {
        let status = match self.state.mode.compare() {
            Some(snapshot) => format!("{} | {}", report, snapshot.counts()),
            None => report.to_string(),
        };
        self.state.set_status(status);
    }

    // ==================== Diff ====================

    fn open_diff(&mut self) -> DispatchResult {
        match DiffSession::open(
            self.state.left.highlighted(),
            self.state.right.highlighted(),
            &self.files,
        ) {
            Ok(session) => {
                let status = match session.difference_count() {
                    0 => "Files are identical".to_string(),
                    n => format!("{} difference(s) found", n),
                };
                self.state.return_to_compare = matches!(self.state.mode, Mode::Compare(_));
                self.state.mode = Mode::Diff(Box::new(session));
                self.state.set_status(status);
            }
            Err(rejection) => self.state.set_status(rejection.to_string()),
        }
        DispatchResult::changed(true)
    }

    fn diff_command(&mut self, cmd: Command) -> DispatchResult {
        let guard = self.state.close_guard;
        let page = self.state.view_height.saturating_sub(1).max(1) as isize;
        let Some(session) = self.state.mode.diff_mut() else {
            return DispatchResult::default();
        };

        let mut closed = false;
        let mut quit = false;
        let status = match cmd {
            Command::NextDifference => Some(status_of(session.navigate(Direction::Next))),
            Command::PrevDifference => Some(status_of(session.navigate(Direction::Previous))),
            Command::CopyLeftToRight => Some(status_of(session.merge(Side::Left))),
            Command::CopyRightToLeft => Some(status_of(session.merge(Side::Right))),
            Command::ToggleActiveSide => Some(status_of(
                session
                    .toggle_active_side()
                    .map(|side| format!("Active side: {}", side)),
            )),
            Command::EnterEdit => Some(status_of(session.enter_edit().map(|()| {
                format!("Editing {} file, ESC to finish", session.active_side())
            }))),
            Command::Save => Some(status_of(session.save(&self.files))),
            Command::MoveUp => {
                session.scroll_by(-1);
                None
            }
            Command::MoveDown => {
                session.scroll_by(1);
                None
            }
            Command::PageUp => {
                session.scroll_by(-page);
                None
            }
            Command::PageDown => {
                session.scroll_by(page);
                None
            }
            Command::Escape | Command::Quit => {
                let outcome = session.request_close(guard);
                closed = outcome.is_closed();
                quit = closed && cmd == Command::Quit;
                Some(outcome.to_string())
            }
            _ => return DispatchResult::default(),
        };

        if closed {
            self.close_diff();
        }
        if let Some(status) = status {
            self.state.set_status(status);
        }
        DispatchResult {
            state_changed: true,
            should_quit: quit,
        }
    }

    fn diff_edit_command(&mut self, cmd: Command) -> DispatchResult {
        let height = self.state.view_height;
        let Some(session) = self.state.mode.diff_mut() else {
            return DispatchResult::default();
        };
        match cmd {
            Command::Save => {
                let status = status_of(session.save(&self.files));
                self.state.set_status(status);
                DispatchResult::changed(true)
            }
            Command::Escape => {
                let status = status_of(session.exit_edit().map(|()| {
                    match session.difference_count() {
                        0 => "Edit finished, files are identical".to_string(),
                        n => format!("Edit finished, {} difference(s)", n),
                    }
                }));
                self.state.set_status(status);
                DispatchResult::changed(true)
            }
            Command::Quit => match session.exit_edit() {
                Ok(()) => self.diff_command(Command::Quit),
                Err(e) => {
                    self.state.set_status(e.to_string());
                    DispatchResult::changed(true)
                }
            },
            other => {
                let Some(op) = edit_op(&other) else {
                    return DispatchResult::default();
                };
                match session.edit(op) {
                    Ok(_) => {
                        session.follow_cursor(height);
                        DispatchResult::changed(true)
                    }
                    Err(e) => {
                        self.state.set_status(e.to_string());
                        DispatchResult::changed(true)
                    }
                }
            }
        }
    }

    fn close_prompt_command(&mut self, cmd: Command) -> DispatchResult {
        let choice = match cmd {
            Command::ConfirmSave => CloseChoice::Save,
            Command::ConfirmDiscard => CloseChoice::Discard,
            Command::ConfirmCancel | Command::Escape => CloseChoice::Cancel,
            _ => {
                self.state.set_status(SessionError::ClosePending.to_string());
                return DispatchResult::changed(true);
            }
        };
        let Some(session) = self.state.mode.diff_mut() else {
            return DispatchResult::default();
        };
        let status = match session.resolve_close(choice, &self.files) {
            Ok(outcome) => {
                if outcome.is_closed() {
                    self.close_diff();
                }
                outcome.to_string()
            }
            Err(e) => e.to_string(),
        };
        self.state.set_status(status);
        DispatchResult::changed(true)
    }

    /// Drops the session and reloads both panes, which may show saved files. A diff opened
    /// from compare mode goes back to a freshly rebuilt snapshot.
    fn close_diff(&mut self) {
        self.state.mode = if std::mem::take(&mut self.state.return_to_compare) {
            Mode::Compare(CompareSnapshot::default())
        } else {
            Mode::Browse
        };
        self.refresh();
        tracing::info!("diff closed");
    }
}

fn status_of<T: fmt::Display, E: fmt::Display>(result: Result<T, E>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => e.to_string(),
    }
}

fn edit_op(cmd: &Command) -> Option<EditOp> {
    Some(match cmd {
        Command::InsertChar(ch) => EditOp::InsertChar(*ch),
        Command::InsertNewline => EditOp::InsertNewline,
        Command::DeleteBackward => EditOp::DeleteBackward,
        Command::DeleteForward => EditOp::DeleteForward,
        Command::CursorUp => EditOp::CursorUp,
        Command::CursorDown => EditOp::CursorDown,
        Command::CursorLeft => EditOp::CursorLeft,
        Command::CursorRight => EditOp::CursorRight,
        Command::CursorLineStart => EditOp::CursorLineStart,
        Command::CursorLineEnd => EditOp::CursorLineEnd,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
