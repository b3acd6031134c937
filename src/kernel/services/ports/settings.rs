use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub diff: DiffSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// What closing a diff with unsaved changes does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseGuard {
    /// First close warns and drops the modified flags; the next close goes through.
    #[default]
    TwoStep,
    /// Ask save / discard / cancel.
    Prompt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffSettings {
    #[serde(default)]
    pub close_guard: CloseGuard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_add_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_delete_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_modify_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_current_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_left_only_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_right_only_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_different_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_identical_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            focus_border: Some("cyan".to_string()),
            inactive_border: Some("dark_gray".to_string()),
            header_fg: Some("cyan".to_string()),
            accent_fg: Some("yellow".to_string()),
            highlight_bg: Some("dark_gray".to_string()),
            selected_fg: Some("yellow".to_string()),
            line_number_fg: Some("dark_gray".to_string()),
            diff_add_fg: Some("green".to_string()),
            diff_delete_fg: Some("red".to_string()),
            diff_modify_fg: Some("yellow".to_string()),
            diff_current_bg: Some("#303040".to_string()),
            compare_left_only_fg: Some("green".to_string()),
            compare_right_only_fg: Some("blue".to_string()),
            compare_different_fg: Some("red".to_string()),
            compare_identical_fg: None,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
