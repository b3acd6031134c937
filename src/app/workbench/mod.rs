//! 工作台：按键 → 命令 → Store，以及整屏渲染入口

use super::theme::UiTheme;
use crate::core::event::Key;
use crate::core::Command;
use crate::kernel::services::adapters::{KeybindingContext, KeybindingService};
use crate::kernel::services::ports::Settings;
use crate::kernel::{Action, DispatchResult, InputContext, Store};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

mod render;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

pub struct Workbench {
    store: Store,
    keybindings: KeybindingService,
    theme: UiTheme,
    last_view_height: Option<usize>,
}

impl Workbench {
    pub fn new(store: Store, keybindings: KeybindingService, theme: UiTheme) -> Self {
        Self {
            store,
            keybindings,
            theme,
            last_view_height: None,
        }
    }

    /// Default keybindings with the user's rules on top, theme colours and close guard from
    /// `settings`.
    pub fn from_settings(mut store: Store, settings: &Settings) -> Self {
        let mut keybindings = KeybindingService::new();
        keybindings.apply_rules(&settings.keybindings);
        store.state_mut().close_guard = settings.diff.close_guard;
        Self::new(store, keybindings, UiTheme::from_settings(&settings.theme))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn theme_mut(&mut self) -> &mut UiTheme {
        &mut self.theme
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) -> DispatchResult {
        if event.kind == KeyEventKind::Release {
            return DispatchResult::default();
        }
        let Some(command) = self.command_for(event) else {
            return DispatchResult::default();
        };
        tracing::debug!(command = command.name(), "key command");
        self.store.dispatch(Action::RunCommand(command))
    }

    fn command_for(&self, event: &KeyEvent) -> Option<Command> {
        let context = keybinding_context(self.store.state().input_context());
        let key = Key::from(*event);
        let bound = self
            .keybindings
            .resolve(context, &key)
            .or_else(|| self.keybindings.resolve(context, &key.without_shifted_symbol()));
        if let Some(command) = bound {
            return Some(command.clone());
        }

        // Unbound printable keys type into the buffer while editing.
        match event.code {
            KeyCode::Char(ch)
                if context == KeybindingContext::DiffEdit
                    && event.modifiers.difference(KeyModifiers::SHIFT).is_empty() =>
            {
                Some(Command::InsertChar(ch))
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);

        // Borders take one row above and below the content.
        let view_height = (body.height.saturating_sub(2) as usize).max(1);
        if self.last_view_height != Some(view_height) {
            self.last_view_height = Some(view_height);
            let _ = self.store.dispatch(Action::SetViewHeight {
                height: view_height,
            });
        }

        self.render_header(frame, header);
        if self.store.state().mode.diff().is_some() {
            self.render_diff(frame, body);
        } else {
            self.render_panes(frame, body);
        }
        self.render_status(frame, status);
    }
}

fn keybinding_context(context: InputContext) -> KeybindingContext {
    match context {
        InputContext::Browse => KeybindingContext::Browse,
        InputContext::Compare => KeybindingContext::Compare,
        InputContext::Diff => KeybindingContext::Diff,
        InputContext::DiffEdit => KeybindingContext::DiffEdit,
        InputContext::ClosePrompt => KeybindingContext::ClosePrompt,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
