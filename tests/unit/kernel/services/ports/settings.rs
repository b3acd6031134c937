use super::*;

#[test]
fn empty_object_deserializes_to_defaults() {
    let settings: Settings = serde_json::from_str("{}").expect("deserialize Settings");
    assert!(settings.keybindings.is_empty());
    assert_eq!(settings.diff.close_guard, CloseGuard::TwoStep);
    assert_eq!(settings.theme.focus_border.as_deref(), Some("cyan"));
}

#[test]
fn close_guard_uses_snake_case_names() {
    let settings: Settings =
        serde_json::from_str(r#"{"diff": {"close_guard": "prompt"}}"#).expect("deserialize");
    assert_eq!(settings.diff.close_guard, CloseGuard::Prompt);

    let json = serde_json::to_string(&DiffSettings::default()).expect("serialize");
    assert_eq!(json, r#"{"close_guard":"two_step"}"#);
}

#[test]
fn partial_theme_keeps_other_defaults() {
    let settings: Settings =
        serde_json::from_str(r##"{"theme": {"diff_add_fg": "#00ff00"}}"##).expect("deserialize");
    assert_eq!(settings.theme.diff_add_fg.as_deref(), Some("#00ff00"));
    assert_eq!(settings.theme.diff_delete_fg.as_deref(), Some("red"));
}

#[test]
fn keybinding_rule_context_is_optional() {
    let rule: KeybindingRule =
        serde_json::from_str(r#"{"key": "ctrl+s", "command": "save"}"#).expect("deserialize");
    assert_eq!(rule.context, None);
    let json = serde_json::to_string(&rule).expect("serialize");
    assert!(!json.contains("context"));
}

#[test]
fn theme_settings_serde_roundtrip_preserves_defaults() {
    let original = ThemeSettings::default();
    let json = serde_json::to_string(&original).expect("serialize ThemeSettings");
    let decoded: ThemeSettings = serde_json::from_str(&json).expect("deserialize ThemeSettings");
    assert_eq!(decoded.focus_border, original.focus_border);
    assert_eq!(decoded.diff_current_bg, original.diff_current_bg);
    assert_eq!(decoded.compare_identical_fg, None);
}
