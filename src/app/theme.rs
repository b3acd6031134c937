//! UI 主题：面板、diff 与比较标记的颜色集中在这里，渲染代码只读这个结构。

use crate::kernel::compare::CompareStatus;
use crate::kernel::diff::DiffKind;
use crate::kernel::services::ports::ThemeSettings;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub focus_border: Color,
    pub inactive_border: Color,
    pub header_fg: Color,
    pub accent_fg: Color,
    pub highlight_bg: Color,
    pub selected_fg: Color,
    pub line_number_fg: Color,
    pub diff_add_fg: Color,
    pub diff_delete_fg: Color,
    pub diff_modify_fg: Color,
    pub diff_current_bg: Color,
    pub compare_left_only_fg: Color,
    pub compare_right_only_fg: Color,
    pub compare_different_fg: Color,
    pub compare_identical_fg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("ZCMDR_COLOR_SUPPORT") {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if ["truecolor", "24bit", "direct"]
        .iter()
        .any(|tag| colorterm.contains(tag) || term.contains(tag))
    {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            header_fg: Color::Cyan,
            accent_fg: Color::Yellow,
            highlight_bg: Color::DarkGray,
            selected_fg: Color::Yellow,
            line_number_fg: Color::DarkGray,
            diff_add_fg: Color::Green,
            diff_delete_fg: Color::Red,
            diff_modify_fg: Color::Yellow,
            diff_current_bg: Color::Rgb(0x30, 0x30, 0x40),
            compare_left_only_fg: Color::Green,
            compare_right_only_fg: Color::Blue,
            compare_different_fg: Color::Red,
            compare_identical_fg: Color::Reset,
        }
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    /// Unset or unparsable values keep the current colour.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let slots: [(&mut Color, &Option<String>); 15] = [
            (&mut self.focus_border, &settings.focus_border),
            (&mut self.inactive_border, &settings.inactive_border),
            (&mut self.header_fg, &settings.header_fg),
            (&mut self.accent_fg, &settings.accent_fg),
            (&mut self.highlight_bg, &settings.highlight_bg),
            (&mut self.selected_fg, &settings.selected_fg),
            (&mut self.line_number_fg, &settings.line_number_fg),
            (&mut self.diff_add_fg, &settings.diff_add_fg),
            (&mut self.diff_delete_fg, &settings.diff_delete_fg),
            (&mut self.diff_modify_fg, &settings.diff_modify_fg),
            (&mut self.diff_current_bg, &settings.diff_current_bg),
            (&mut self.compare_left_only_fg, &settings.compare_left_only_fg),
            (&mut self.compare_right_only_fg, &settings.compare_right_only_fg),
            (&mut self.compare_different_fg, &settings.compare_different_fg),
            (&mut self.compare_identical_fg, &settings.compare_identical_fg),
        ];
        for (slot, value) in slots {
            if let Some(color) = value.as_deref().and_then(parse_color) {
                *slot = color;
            }
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for slot in [
            &mut self.focus_border,
            &mut self.inactive_border,
            &mut self.header_fg,
            &mut self.accent_fg,
            &mut self.highlight_bg,
            &mut self.selected_fg,
            &mut self.line_number_fg,
            &mut self.diff_add_fg,
            &mut self.diff_delete_fg,
            &mut self.diff_modify_fg,
            &mut self.diff_current_bg,
            &mut self.compare_left_only_fg,
            &mut self.compare_right_only_fg,
            &mut self.compare_different_fg,
            &mut self.compare_identical_fg,
        ] {
            *slot = map_color_for_support(*slot, support);
        }
    }

    pub fn diff_fg(&self, kind: DiffKind) -> Color {
        match kind {
            DiffKind::Equal => Color::Reset,
            DiffKind::Add => self.diff_add_fg,
            DiffKind::Delete => self.diff_delete_fg,
            DiffKind::Modify => self.diff_modify_fg,
        }
    }

    pub fn compare_fg(&self, status: CompareStatus) -> Color {
        match status {
            CompareStatus::LeftOnly => self.compare_left_only_fg,
            CompareStatus::RightOnly => self.compare_right_only_fg,
            CompareStatus::Different => self.compare_different_fg,
            CompareStatus::Identical => self.compare_identical_fg,
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) if i > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::Indexed(rgb_to_ansi16_index(r, g, b))
        }
        (_, value) => value,
    }
}

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    (0u8..=255)
        .min_by_key(|&index| {
            let (pr, pg, pb) = ansi256_index_to_rgb(index);
            color_distance_sq((r, g, b), (pr, pg, pb))
        })
        .unwrap_or(0)
}

fn rgb_to_ansi16_index(r: u8, g: u8, b: u8) -> u8 {
    ANSI16_RGB
        .iter()
        .enumerate()
        .min_by_key(|(_, &rgb)| color_distance_sq((r, g, b), rgb))
        .map(|(index, _)| index as u8)
        .unwrap_or(0)
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }
    if (16..=231).contains(&index) {
        let level = [0u8, 95, 135, 175, 215, 255];
        let offset = index - 16;
        return (
            level[(offset / 36) as usize],
            level[((offset / 6) % 6) as usize],
            level[(offset % 6) as usize],
        );
    }
    let gray = 8u8.saturating_add((index - 232).saturating_mul(10));
    (gray, gray, gray)
}

fn color_distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let dr = i32::from(a.0) - i32::from(b.0);
    let dg = i32::from(a.1) - i32::from(b.1);
    let db = i32::from(a.2) - i32::from(b.2);
    (dr * dr + dg * dg + db * db) as u32
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Accepts `#rrggbb` or a colour name (`dark_gray`, `light_blue`, `reset`, ...).
pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let c = match v.to_ascii_lowercase().as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
