//! Buffer representation - the lines of the open file with its metadata

use std::path::{Path, PathBuf};

use crate::line::Line;

/// The text being edited
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text, never empty
    lines: Vec<Line>,
    /// Associated file path (None for an untitled buffer)
    filename: Option<PathBuf>,
    /// Whether buffer has unsaved changes
    modified: bool,
    /// Name of the detected syntax language
    language: Option<String>,
    /// Whether the text ends with a newline
    trailing_newline: bool,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a buffer from file contents. `\r\n` line endings are read as `\n`.
    pub fn from_text(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let lines = if text.is_empty() {
            vec![Line::default()]
        } else {
            body.split('\n')
                .map(|l| Line::from(l.strip_suffix('\r').unwrap_or(l)))
                .collect()
        };

        Self {
            lines,
            filename: None,
            modified: false,
            language: None,
            trailing_newline,
        }
    }

    /// Contents as written to disk
    pub fn to_text(&self) -> String {
        let mut text = self
            .lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// Get a short name for display
    pub fn name(&self) -> String {
        self.filename
            .as_deref()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, path: Option<PathBuf>) {
        self.filename = path;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Insert a character at position
    pub fn insert_char(&mut self, line_idx: usize, byte_pos: usize, ch: char) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            line.insert_char(byte_pos, ch);
            self.modified = true;
        }
    }

    /// Insert text without newlines at position
    pub fn insert_str(&mut self, line_idx: usize, byte_pos: usize, s: &str) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            line.insert_str(byte_pos, s);
            self.modified = true;
        }
    }

    /// Insert a newline, splitting the current line
    pub fn insert_newline(&mut self, line_idx: usize, byte_pos: usize) {
        if let Some(line) = self.lines.get_mut(line_idx) {
            let new_line = line.split_off(byte_pos);
            self.lines.insert(line_idx + 1, new_line);
            self.modified = true;
        }
    }

    /// Delete the character at position, joining with the next line at the
    /// end of a line. Returns whether anything was deleted.
    pub fn delete_char(&mut self, line_idx: usize, byte_pos: usize) -> bool {
        let Some(line) = self.lines.get_mut(line_idx) else {
            return false;
        };
        if let Some(end) = line.next_boundary(byte_pos) {
            line.delete_range(byte_pos, end);
            self.modified = true;
            return true;
        }
        if line_idx + 1 < self.lines.len() {
            let next = self.lines.remove(line_idx + 1);
            self.lines[line_idx].append(next);
            self.modified = true;
            return true;
        }
        false
    }

    /// Delete the character before position, joining with the previous line
    /// at column 0. Returns the new cursor position.
    pub fn delete_backward(&mut self, line_idx: usize, byte_pos: usize) -> Option<(usize, usize)> {
        if byte_pos > 0 {
            let line = self.lines.get_mut(line_idx)?;
            let start = line.prev_boundary(byte_pos)?;
            line.delete_range(start, byte_pos);
            self.modified = true;
            return Some((line_idx, start));
        }
        if line_idx == 0 || line_idx >= self.lines.len() {
            return None;
        }
        let current = self.lines.remove(line_idx);
        let prev = &mut self.lines[line_idx - 1];
        let join_pos = prev.len();
        prev.append(current);
        self.modified = true;
        Some((line_idx - 1, join_pos))
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(buffer: &Buffer) -> Vec<&str> {
        (0..buffer.line_count())
            .filter_map(|i| buffer.line(i))
            .map(Line::text)
            .collect()
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = Buffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.to_text(), "");
        assert_eq!(buffer.name(), "untitled");
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_trailing_newline_preserved() {
        assert_eq!(Buffer::from_text("a\nb\n").to_text(), "a\nb\n");
        assert_eq!(Buffer::from_text("a\nb").to_text(), "a\nb");
        assert_eq!(Buffer::from_text("\n").to_text(), "\n");
        assert_eq!(Buffer::from_text("a\n\n").to_text(), "a\n\n");
        assert_eq!(text_of(&Buffer::from_text("a\n\n")), vec!["a", ""]);
    }

    #[test]
    fn test_crlf_read_as_lf() {
        let buffer = Buffer::from_text("one\r\ntwo\r\n");
        assert_eq!(text_of(&buffer), vec!["one", "two"]);
        assert_eq!(buffer.to_text(), "one\ntwo\n");
    }

    #[test]
    fn test_insert_and_split() {
        let mut buffer = Buffer::from_text("hello");
        buffer.insert_char(0, 5, '!');
        buffer.insert_newline(0, 2);
        assert_eq!(text_of(&buffer), vec!["he", "llo!"]);
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_delete_char_joins_next_line() {
        let mut buffer = Buffer::from_text("ab\ncd");
        assert!(buffer.delete_char(0, 1));
        assert_eq!(text_of(&buffer), vec!["a", "cd"]);
        assert!(buffer.delete_char(0, 1));
        assert_eq!(text_of(&buffer), vec!["acd"]);
        assert!(!buffer.delete_char(0, 3));
    }

    #[test]
    fn test_delete_backward_joins_previous_line() {
        let mut buffer = Buffer::from_text("aé\ncd");
        assert_eq!(buffer.delete_backward(1, 0), Some((0, 3)));
        assert_eq!(text_of(&buffer), vec!["aécd"]);
        assert_eq!(buffer.delete_backward(0, 3), Some((0, 1)));
        assert_eq!(text_of(&buffer), vec!["acd"]);
        assert_eq!(buffer.delete_backward(0, 0), None);
    }

    #[test]
    fn test_name_from_filename() {
        let mut buffer = Buffer::new();
        buffer.set_filename(Some(PathBuf::from("/tmp/page.html")));
        assert_eq!(buffer.name(), "page.html");
    }
}
