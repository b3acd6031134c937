//! 快捷键：按键 → 命令（支持上下文）

use super::settings::parse_keybinding;
use crate::core::event::Key;
use crate::core::Command;
use crate::kernel::services::ports::settings::KeybindingRule;
use crossterm::event::KeyCode;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    Global,
    Browse,
    Compare,
    Diff,
    DiffEdit,
    ClosePrompt,
}

impl KeybindingContext {
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "global" => Some(Self::Global),
            "browse" | "pane" | "panes" => Some(Self::Browse),
            "compare" => Some(Self::Compare),
            "diff" => Some(Self::Diff),
            "edit" | "diffedit" | "diff.edit" => Some(Self::DiffEdit),
            "prompt" | "closeprompt" | "close_prompt" => Some(Self::ClosePrompt),
            _ => None,
        }
    }
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    browse: FxHashMap<Key, Command>,
    compare: FxHashMap<Key, Command>,
    diff: FxHashMap<Key, Command>,
    diff_edit: FxHashMap<Key, Command>,
    close_prompt: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            global: default_global_keybindings(),
            browse: default_browse_keybindings(),
            compare: default_compare_keybindings(),
            diff: default_diff_keybindings(),
            diff_edit: default_diff_edit_keybindings(),
            close_prompt: default_close_prompt_keybindings(),
        }
    }

    /// Compare mode keeps pane navigation, so it falls back to the browse map.
    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Browse => self.browse.get(key).or_else(|| self.global.get(key)),
            KeybindingContext::Compare => self
                .compare
                .get(key)
                .or_else(|| self.browse.get(key))
                .or_else(|| self.global.get(key)),
            KeybindingContext::Diff => self.diff.get(key).or_else(|| self.global.get(key)),
            KeybindingContext::DiffEdit => {
                self.diff_edit.get(key).or_else(|| self.global.get(key))
            }
            KeybindingContext::ClosePrompt => self.close_prompt.get(key),
        }
    }

    pub fn bindings(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Browse => &self.browse,
            KeybindingContext::Compare => &self.compare,
            KeybindingContext::Diff => &self.diff,
            KeybindingContext::DiffEdit => &self.diff_edit,
            KeybindingContext::ClosePrompt => &self.close_prompt,
        }
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Applies user rules on top of the defaults. A rule without context binds globally; an
    /// empty command unbinds. Returns how many rules were skipped as unparsable.
    pub fn apply_rules(&mut self, rules: &[KeybindingRule]) -> usize {
        let mut skipped = 0;
        for rule in rules {
            let context = match rule.context.as_deref() {
                None => KeybindingContext::Global,
                Some(name) => match KeybindingContext::parse(name) {
                    Some(ctx) => ctx,
                    None => {
                        skipped += 1;
                        continue;
                    }
                },
            };
            let Some(key) = parse_keybinding(&rule.key) else {
                skipped += 1;
                continue;
            };
            if rule.command.trim().is_empty() {
                self.unbind(context, &key);
            } else {
                self.bind(context, key, Command::from_name(rule.command.trim()));
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "ignored invalid keybinding rules");
        }
        skipped
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Browse => &mut self.browse,
            KeybindingContext::Compare => &mut self.compare,
            KeybindingContext::Diff => &mut self.diff,
            KeybindingContext::DiffEdit => &mut self.diff_edit,
            KeybindingContext::ClosePrompt => &mut self.close_prompt,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.insert(Key::ctrl(KeyCode::Char('q')), Command::Quit);
    bindings
}

fn default_browse_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(16);

    bindings.insert(Key::simple(KeyCode::Up), Command::MoveUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::MoveDown);
    bindings.insert(Key::char('k'), Command::MoveUp);
    bindings.insert(Key::char('j'), Command::MoveDown);
    bindings.insert(Key::simple(KeyCode::PageUp), Command::PageUp);
    bindings.insert(Key::simple(KeyCode::PageDown), Command::PageDown);
    bindings.insert(Key::simple(KeyCode::Enter), Command::Activate);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::GoParent);
    bindings.insert(Key::simple(KeyCode::Tab), Command::SwitchPane);
    bindings.insert(Key::char(' '), Command::ToggleSelection);
    bindings.insert(Key::ctrl(KeyCode::Char('r')), Command::Refresh);

    bindings.insert(Key::char('f'), Command::OpenDiff);
    bindings.insert(Key::char('y'), Command::ToggleCompare);

    bindings.insert(Key::char('q'), Command::Quit);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Escape);

    bindings
}

fn default_compare_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();

    bindings.insert(Key::char('>'), Command::SyncLeftToRight);
    bindings.insert(Key::char('<'), Command::SyncRightToLeft);
    bindings.insert(Key::char('='), Command::SyncBoth);
    bindings.insert(Key::char('y'), Command::ToggleCompare);
    bindings.insert(Key::simple(KeyCode::Esc), Command::ToggleCompare);

    bindings
}

fn default_diff_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(16);

    bindings.insert(Key::char('n'), Command::NextDifference);
    bindings.insert(Key::char('p'), Command::PrevDifference);
    bindings.insert(Key::char('>'), Command::CopyLeftToRight);
    bindings.insert(Key::char('<'), Command::CopyRightToLeft);
    bindings.insert(Key::char('e'), Command::EnterEdit);
    bindings.insert(Key::simple(KeyCode::Tab), Command::ToggleActiveSide);
    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Escape);

    bindings.insert(Key::simple(KeyCode::Up), Command::MoveUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::MoveDown);
    bindings.insert(Key::simple(KeyCode::PageUp), Command::PageUp);
    bindings.insert(Key::simple(KeyCode::PageDown), Command::PageDown);

    bindings
}

fn default_diff_edit_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(16);

    bindings.insert(Key::simple(KeyCode::Left), Command::CursorLeft);
    bindings.insert(Key::simple(KeyCode::Right), Command::CursorRight);
    bindings.insert(Key::simple(KeyCode::Up), Command::CursorUp);
    bindings.insert(Key::simple(KeyCode::Down), Command::CursorDown);
    bindings.insert(Key::simple(KeyCode::Home), Command::CursorLineStart);
    bindings.insert(Key::simple(KeyCode::End), Command::CursorLineEnd);
    bindings.insert(Key::simple(KeyCode::Enter), Command::InsertNewline);
    bindings.insert(Key::simple(KeyCode::Backspace), Command::DeleteBackward);
    bindings.insert(Key::simple(KeyCode::Delete), Command::DeleteForward);
    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Escape);

    bindings
}

fn default_close_prompt_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();

    bindings.insert(Key::char('s'), Command::ConfirmSave);
    bindings.insert(Key::char('d'), Command::ConfirmDiscard);
    bindings.insert(Key::char('c'), Command::ConfirmCancel);
    bindings.insert(Key::simple(KeyCode::Esc), Command::ConfirmCancel);

    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
