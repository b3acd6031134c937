use super::*;

#[test]
fn parse_color_names_and_hex() {
    assert_eq!(parse_color("cyan"), Some(Color::Cyan));
    assert_eq!(parse_color(" Dark_Gray "), Some(Color::DarkGray));
    assert_eq!(parse_color("#303040"), Some(Color::Rgb(0x30, 0x30, 0x40)));
    assert_eq!(parse_color("#30304"), None);
    assert_eq!(parse_color("#zzzzzz"), None);
    assert_eq!(parse_color("chartreuse"), None);
    assert_eq!(parse_color(""), None);
}

#[test]
fn default_settings_match_default_theme() {
    assert_eq!(
        UiTheme::from_settings(&ThemeSettings::default()),
        UiTheme::default()
    );
}

#[test]
fn apply_settings_overrides_only_valid_values() {
    let settings = ThemeSettings {
        diff_add_fg: Some("#00ff00".to_string()),
        diff_delete_fg: Some("not a color".to_string()),
        compare_identical_fg: None,
        ..ThemeSettings::default()
    };
    let theme = UiTheme::from_settings(&settings);
    assert_eq!(theme.diff_add_fg, Color::Rgb(0, 255, 0));
    assert_eq!(theme.diff_delete_fg, Color::Red);
    assert_eq!(theme.compare_fg(CompareStatus::Identical), Color::Reset);
    assert_eq!(theme.diff_fg(DiffKind::Modify), Color::Yellow);
}

#[test]
fn ansi16_fallback_converts_rgb_to_indexed_colors() {
    let mut theme = UiTheme {
        diff_current_bg: Color::Rgb(250, 10, 10),
        focus_border: Color::Indexed(196),
        ..UiTheme::default()
    };
    theme.apply_color_support(TerminalColorSupport::Ansi16);
    assert_eq!(theme.diff_current_bg, Color::Indexed(9));
    assert_eq!(theme.focus_border, Color::Indexed(9));
    assert_eq!(theme.diff_add_fg, Color::Green);
}

#[test]
fn ansi256_fallback_keeps_exact_cube_colors() {
    let mut theme = UiTheme {
        diff_current_bg: Color::Rgb(95, 135, 175),
        ..UiTheme::default()
    };
    theme.apply_color_support(TerminalColorSupport::Ansi256);
    assert_eq!(theme.diff_current_bg, Color::Indexed(16 + 36 + 2 * 6 + 3));
}
