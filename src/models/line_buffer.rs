//! 行缓冲：diff 会话中每一侧文件的行序列
//!
//! On-disk convention: lines are joined with `\n` plus one trailing `\n`. Reading drops the
//! single empty line a trailing newline produces, and never yields zero lines.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// A buffer holding one empty line, the same shape as an empty file.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Takes the lines verbatim. Unlike [`LineBuffer::from_text`] this may produce an empty buffer.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    pub fn to_text(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Length of `row` in chars; 0 for rows past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    pub fn slice(&self, range: Range<usize>) -> &[String] {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        &self.lines[start..end]
    }

    /// Replaces `range` with `replacement`; the buffer grows or shrinks accordingly.
    pub fn splice(&mut self, range: Range<usize>, replacement: Vec<String>) {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines.splice(start..end, replacement);
    }

    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> bool {
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        let at = byte_offset(line, col);
        line.insert(at, ch);
        true
    }

    /// Splits `row` at `col`; the tail becomes a new line right after it.
    pub fn split_line(&mut self, row: usize, col: usize) -> bool {
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        let at = byte_offset(line, col);
        let tail = line.split_off(at);
        self.lines.insert(row + 1, tail);
        true
    }

    /// Removes the char at `col`. Returns `false` when `col` is at or past the line end.
    pub fn remove_char(&mut self, row: usize, col: usize) -> bool {
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        let at = byte_offset(line, col);
        if at >= line.len() {
            return false;
        }
        line.remove(at);
        true
    }

    /// Appends line `row + 1` onto `row`. Returns the char length `row` had before the join.
    pub fn join_with_next(&mut self, row: usize) -> Option<usize> {
        if row + 1 >= self.lines.len() {
            return None;
        }
        let next = self.lines.remove(row + 1);
        let line = &mut self.lines[row];
        let prev_len = line.chars().count();
        line.push_str(&next);
        Some(prev_len)
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(offset, _)| offset)
}

#[cfg(test)]
#[path = "../../tests/unit/models/line_buffer.rs"]
mod tests;
