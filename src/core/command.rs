//! 命令系统：语义命令定义
//!
//! Command 与具体按键无关；按键到命令的映射由 KeybindingService 负责，
//! 设置文件里的命令按 `name()` 解析。

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 面板浏览 ====================
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Activate,
    GoParent,
    SwitchPane,
    ToggleSelection,
    Refresh,

    // ==================== 模式切换 ====================
    OpenDiff,
    ToggleCompare,

    // ==================== 比较视图 ====================
    NextDifference,
    PrevDifference,
    CopyLeftToRight,
    CopyRightToLeft,
    ToggleActiveSide,
    EnterEdit,
    Save,

    // ==================== 目录同步 ====================
    SyncLeftToRight,
    SyncRightToLeft,
    SyncBoth,

    // ==================== 编辑 ====================
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorLineStart,
    CursorLineEnd,
    InsertChar(char),
    InsertNewline,
    DeleteBackward,
    DeleteForward,

    // ==================== 关闭确认 ====================
    ConfirmSave,
    ConfirmDiscard,
    ConfirmCancel,

    // ==================== 系统操作 ====================
    Escape,
    Quit,

    // ==================== 扩展点 ====================
    Custom(String),
}

const NAMED: &[Command] = &[
    Command::MoveUp,
    Command::MoveDown,
    Command::PageUp,
    Command::PageDown,
    Command::Activate,
    Command::GoParent,
    Command::SwitchPane,
    Command::ToggleSelection,
    Command::Refresh,
    Command::OpenDiff,
    Command::ToggleCompare,
    Command::NextDifference,
    Command::PrevDifference,
    Command::CopyLeftToRight,
    Command::CopyRightToLeft,
    Command::ToggleActiveSide,
    Command::EnterEdit,
    Command::Save,
    Command::SyncLeftToRight,
    Command::SyncRightToLeft,
    Command::SyncBoth,
    Command::CursorUp,
    Command::CursorDown,
    Command::CursorLeft,
    Command::CursorRight,
    Command::CursorLineStart,
    Command::CursorLineEnd,
    Command::InsertNewline,
    Command::DeleteBackward,
    Command::DeleteForward,
    Command::ConfirmSave,
    Command::ConfirmDiscard,
    Command::ConfirmCancel,
    Command::Escape,
    Command::Quit,
];

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::MoveUp => "moveUp",
            Command::MoveDown => "moveDown",
            Command::PageUp => "pageUp",
            Command::PageDown => "pageDown",
            Command::Activate => "activate",
            Command::GoParent => "goParent",
            Command::SwitchPane => "switchPane",
            Command::ToggleSelection => "toggleSelection",
            Command::Refresh => "refresh",
            Command::OpenDiff => "openDiff",
            Command::ToggleCompare => "toggleCompare",
            Command::NextDifference => "nextDifference",
            Command::PrevDifference => "prevDifference",
            Command::CopyLeftToRight => "copyLeftToRight",
            Command::CopyRightToLeft => "copyRightToLeft",
            Command::ToggleActiveSide => "toggleActiveSide",
            Command::EnterEdit => "enterEdit",
            Command::Save => "save",
            Command::SyncLeftToRight => "syncLeftToRight",
            Command::SyncRightToLeft => "syncRightToLeft",
            Command::SyncBoth => "syncBoth",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::InsertChar(_) => "insertChar",
            Command::InsertNewline => "insertNewline",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::ConfirmSave => "confirmSave",
            Command::ConfirmDiscard => "confirmDiscard",
            Command::ConfirmCancel => "confirmCancel",
            Command::Escape => "escape",
            Command::Quit => "quit",
            Command::Custom(name) => name,
        }
    }

    /// Unknown names become `Custom`. `insertChar` carries data and can't be bound by name.
    pub fn from_name(name: &str) -> Command {
        NAMED
            .iter()
            .find(|c| c.name() == name)
            .cloned()
            .unwrap_or_else(|| Command::Custom(name.to_string()))
    }

    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::DeleteBackward
                | Command::DeleteForward
        )
    }

    pub fn is_cursor_command(&self) -> bool {
        matches!(
            self,
            Command::CursorLeft
                | Command::CursorRight
                | Command::CursorUp
                | Command::CursorDown
                | Command::CursorLineStart
                | Command::CursorLineEnd
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
