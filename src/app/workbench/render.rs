use super::Workbench;
use crate::kernel::compare::CompareStatus;
use crate::kernel::diff::{DiffBlock, DiffKind, DiffSession, SessionMode};
use crate::kernel::{InputContext, Mode};
use crate::models::{ListingEntry, Side};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// `"1234 "`: line number column of the diff and edit views.
const NUMBER_WIDTH: u16 = 5;

/// One display row of the side-by-side view; a side without a line shows as filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct AlignedRow {
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub kind: DiffKind,
    pub block: usize,
    /// Left line this row sits at; filler rows inherit the previous left line.
    pub anchor: usize,
}

pub(super) fn aligned_rows(blocks: &[DiffBlock]) -> Vec<AlignedRow> {
    let mut rows = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let last_left = block.left.start + block.left.len().saturating_sub(1);
        for offset in 0..block.left.len().max(block.right.len()) {
            let left = (offset < block.left.len()).then(|| block.left.start + offset);
            let right = (offset < block.right.len()).then(|| block.right.start + offset);
            rows.push(AlignedRow {
                left,
                right,
                kind: block.kind,
                block: index,
                anchor: left.unwrap_or(last_left),
            });
        }
    }
    rows
}

/// First row to draw so the scroll line sits at the top, without leaving blank space below.
pub(super) fn first_visible_row(rows: &[AlignedRow], scroll: usize, height: usize) -> usize {
    let at = rows
        .iter()
        .position(|row| row.anchor >= scroll)
        .unwrap_or(rows.len());
    at.min(rows.len().saturating_sub(height))
}

fn scroll_offset(highlighted: usize, height: usize) -> usize {
    if height == 0 || highlighted < height {
        0
    } else {
        highlighted + 1 - height
    }
}

fn compare_marker(status: Option<CompareStatus>) -> &'static str {
    match status {
        Some(CompareStatus::LeftOnly) => "< ",
        Some(CompareStatus::RightOnly) => "> ",
        Some(CompareStatus::Different) => "! ",
        Some(CompareStatus::Identical) => "= ",
        None => "  ",
    }
}

impl Workbench {
    pub(super) fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mode = match self.store.state().input_context() {
            InputContext::Browse => "Browse",
            InputContext::Compare => "Compare",
            InputContext::Diff => "Diff",
            InputContext::DiffEdit => "Diff (editing)",
            InputContext::ClosePrompt => "Diff (closing)",
        };
        let line = Line::from(vec![
            Span::styled(
                " zcmdr ",
                Style::default()
                    .fg(self.theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("| {}", mode)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    pub(super) fn render_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.store.state();
        let line = match &state.status {
            Some(status) => Span::styled(
                format!(" {}", status),
                Style::default().fg(self.theme.accent_fg),
            ),
            None => Span::styled(
                format!(" {}", key_hint(state.input_context())),
                Style::default().fg(self.theme.line_number_fg),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(line)), area);
    }

    // ==================== 面板 ====================

    pub(super) fn render_panes(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        self.render_pane(frame, left, Side::Left);
        self.render_pane(frame, right, Side::Right);
    }

    fn render_pane(&self, frame: &mut Frame, area: Rect, side: Side) {
        let state = self.store.state();
        let pane = state.pane(side);
        let focused = state.active == side;
        let snapshot = match &state.mode {
            Mode::Compare(snapshot) => Some(snapshot),
            _ => None,
        };

        let height = area.height.saturating_sub(2) as usize;
        let highlighted = pane.highlighted_index();
        let lines: Vec<Line> = pane
            .entries()
            .iter()
            .enumerate()
            .skip(scroll_offset(highlighted, height))
            .take(height)
            .map(|(index, entry)| {
                let status = snapshot.and_then(|s| s.status(&entry.name));
                self.pane_line(
                    entry,
                    pane.is_selected(&entry.name),
                    index == highlighted,
                    focused,
                    status,
                )
            })
            .collect();

        let block = self.bordered(format!(" {} ", pane.dir().display()), focused);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn pane_line(
        &self,
        entry: &ListingEntry,
        selected: bool,
        highlighted: bool,
        focused: bool,
        status: Option<CompareStatus>,
    ) -> Line<'static> {
        let fg = if selected {
            self.theme.selected_fg
        } else {
            status.map_or(ratatui::style::Color::Reset, |s| self.theme.compare_fg(s))
        };
        let mut style = Style::default().fg(fg);
        if highlighted {
            style = style.bg(self.theme.highlight_bg);
            if focused {
                style = style.add_modifier(Modifier::BOLD);
            }
        }

        let mut name = entry.name.clone();
        if entry.is_dir() && !entry.is_parent_placeholder() {
            name.push('/');
        }
        let select_mark = if selected { "*" } else { " " };
        Line::from(vec![
            Span::styled(compare_marker(status), Style::default().fg(fg)),
            Span::styled(format!("{}{}", select_mark, name), style),
        ])
    }

    fn bordered(&self, title: String, focused: bool) -> Block<'static> {
        let border = if focused {
            self.theme.focus_border
        } else {
            self.theme.inactive_border
        };
        Block::bordered()
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, Style::default().fg(self.theme.header_fg)))
    }

    // ==================== Diff ====================

    pub(super) fn render_diff(&self, frame: &mut Frame, area: Rect) {
        let Some(session) = self.store.state().mode.diff() else {
            return;
        };
        if session.mode() == SessionMode::Editing {
            self.render_edit(frame, area, session);
            return;
        }

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        let height = area.height.saturating_sub(2) as usize;
        let rows = aligned_rows(session.blocks());
        let start = first_visible_row(&rows, session.scroll(), height);

        for (side, area) in [(Side::Left, left), (Side::Right, right)] {
            let lines: Vec<Line> = rows[start..]
                .iter()
                .take(height)
                .map(|row| self.diff_line(session, row, side))
                .collect();
            let block = self.bordered(side_title(session, side), session.active_side() == side);
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
    }

    fn diff_line(&self, session: &DiffSession, row: &AlignedRow, side: Side) -> Line<'static> {
        let index = match side {
            Side::Left => row.left,
            Side::Right => row.right,
        };
        let number = match index {
            Some(i) => format!("{:>4} ", i + 1),
            None => " ".repeat(NUMBER_WIDTH as usize),
        };
        let text = index
            .and_then(|i| session.buffer(side).line(i))
            .unwrap_or("")
            .to_string();

        let mut style = Style::default().fg(self.theme.diff_fg(row.kind));
        if row.kind.is_difference() && row.block == session.current_index() {
            style = style.bg(self.theme.diff_current_bg);
        }
        Line::from(vec![
            Span::styled(number, Style::default().fg(self.theme.line_number_fg)),
            Span::styled(text, style),
        ])
        .style(style)
    }

    fn render_edit(&self, frame: &mut Frame, area: Rect, session: &DiffSession) {
        let side = session.active_side();
        let buffer = session.buffer(side);
        let height = area.height.saturating_sub(2) as usize;
        let scroll = session.scroll();

        let lines: Vec<Line> = buffer.lines()[scroll.min(buffer.len())..]
            .iter()
            .take(height)
            .enumerate()
            .map(|(offset, text)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>4} ", scroll + offset + 1),
                        Style::default().fg(self.theme.line_number_fg),
                    ),
                    Span::raw(text.clone()),
                ])
            })
            .collect();
        let title = format!(" Editing{}", side_title(session, side));
        frame.render_widget(Paragraph::new(lines).block(self.bordered(title, true)), area);

        let cursor = session.cursor();
        if cursor.row < scroll || cursor.row >= scroll + height {
            return;
        }
        let line = buffer.line(cursor.row).unwrap_or("");
        let prefix: String = line.chars().take(cursor.col).collect();
        let x = area.x + 1 + NUMBER_WIDTH + prefix.width() as u16;
        let y = area.y + 1 + (cursor.row - scroll) as u16;
        if x < area.right().saturating_sub(1) {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

fn side_title(session: &DiffSession, side: Side) -> String {
    let dirty = if session.is_modified(side) { " [+]" } else { "" };
    format!(" {}: {}{} ", side, session.path(side).display(), dirty)
}

fn key_hint(context: InputContext) -> &'static str {
    match context {
        InputContext::Browse => {
            "f diff | y compare | Space select | Tab switch pane | Enter open | q quit"
        }
        InputContext::Compare => "> sync left→right | < sync right→left | = sync both | y/Esc leave",
        InputContext::Diff => {
            "n/p next/prev | >/< copy block | e edit | Tab side | Ctrl+S save | Esc close"
        }
        InputContext::DiffEdit => "Ctrl+S save | Esc finish editing",
        InputContext::ClosePrompt => "[s]ave | [d]iscard | [c]ancel",
    }
}
