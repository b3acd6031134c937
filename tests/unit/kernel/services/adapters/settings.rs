use super::*;
use crate::kernel::services::ports::settings::CloseGuard;
use tempfile::tempdir;

#[test]
fn ensure_settings_file_writes_defaults_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(SETTINGS_DIR).join(SETTINGS_FILE);

    ensure_settings_file_at(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.diff.close_guard, CloseGuard::TwoStep);

    std::fs::write(&path, r#"{"diff":{"close_guard":"prompt"}}"#).unwrap();
    ensure_settings_file_at(&path).unwrap();
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.diff.close_guard, CloseGuard::Prompt);
}

#[test]
fn invalid_settings_file_loads_as_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setting.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_settings_from(&path).is_none());
    assert!(load_settings_from(&dir.path().join("missing.json")).is_none());
}

#[cfg(feature = "tui")]
#[test]
fn parse_keybinding_handles_modifiers_and_named_keys() {
    assert_eq!(
        parse_keybinding("ctrl+s"),
        Some(Key::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
    );
    assert_eq!(
        parse_keybinding("Ctrl+Shift+X"),
        Some(Key::new(
            KeyCode::Char('x'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        ))
    );
    assert_eq!(parse_keybinding("f5"), Some(Key::simple(KeyCode::F(5))));
    assert_eq!(parse_keybinding("f"), Some(Key::simple(KeyCode::Char('f'))));
    assert_eq!(parse_keybinding("pageup"), Some(Key::simple(KeyCode::PageUp)));
    assert_eq!(parse_keybinding("space"), Some(Key::simple(KeyCode::Char(' '))));
    assert_eq!(parse_keybinding("ctrl+"), None);
    assert_eq!(parse_keybinding("nonsense"), None);
}

#[cfg(feature = "tui")]
#[test]
fn parse_command_resolves_by_name() {
    assert_eq!(parse_command("save"), Command::Save);
    assert_eq!(
        parse_command("does_not_exist"),
        Command::Custom("does_not_exist".to_string())
    );
}
