//! Line representation and text operations
//!
//! Positions inside a line are byte offsets that always sit on a char
//! boundary. Display columns expand tabs to the next multiple of the tab
//! width and use `unicode-width` for everything else.

use unicode_width::UnicodeWidthChar;

/// Display width of `ch` when it starts at column `col`
pub fn char_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab = tab_width.max(1);
        tab - col % tab
    } else {
        ch.width().unwrap_or(1)
    }
}

/// A single line of text in a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Insert a character at byte position
    pub fn insert_char(&mut self, byte_pos: usize, ch: char) {
        self.text.insert(byte_pos, ch);
    }

    /// Insert a string at byte position
    pub fn insert_str(&mut self, byte_pos: usize, s: &str) {
        self.text.insert_str(byte_pos, s);
    }

    /// Delete a range of bytes and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        self.text.drain(start..end).collect()
    }

    /// Split the line at byte position, returning the remainder
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        Line::from(self.text.split_off(byte_pos))
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
    }

    /// Byte offset of the character after the one at `byte_pos`
    pub fn next_boundary(&self, byte_pos: usize) -> Option<usize> {
        self.text[byte_pos..]
            .chars()
            .next()
            .map(|ch| byte_pos + ch.len_utf8())
    }

    /// Byte offset of the character before `byte_pos`
    pub fn prev_boundary(&self, byte_pos: usize) -> Option<usize> {
        self.text[..byte_pos]
            .chars()
            .next_back()
            .map(|ch| byte_pos - ch.len_utf8())
    }

    /// Display column of a byte position
    pub fn byte_to_col(&self, byte_pos: usize, tab_width: usize) -> usize {
        let end = byte_pos.min(self.text.len());
        self.text[..end]
            .chars()
            .fold(0, |col, ch| col + char_width(ch, col, tab_width))
    }

    /// Byte position of the character covering display column `col`,
    /// clamped to the end of the line
    pub fn col_to_byte(&self, col: usize, tab_width: usize) -> usize {
        let mut current = 0;
        for (byte_idx, ch) in self.text.char_indices() {
            let width = char_width(ch, current, tab_width);
            if current + width > col {
                return byte_idx;
            }
            current += width;
        }
        self.text.len()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line_operations() {
        let mut line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);

        line.insert_char(5, '!');
        assert_eq!(line.text(), "Hello!");
        line.insert_str(0, "> ");
        assert_eq!(line.text(), "> Hello!");
    }

    #[test]
    fn test_boundaries_utf8() {
        let line = Line::from("a😀é");
        assert_eq!(line.next_boundary(0), Some(1));
        assert_eq!(line.next_boundary(1), Some(5));
        assert_eq!(line.next_boundary(7), None);
        assert_eq!(line.prev_boundary(7), Some(5));
        assert_eq!(line.prev_boundary(5), Some(1));
        assert_eq!(line.prev_boundary(0), None);
    }

    #[test]
    fn test_columns_wide_chars() {
        let line = Line::from("你好x");
        assert_eq!(line.byte_to_col(3, 4), 2);
        assert_eq!(line.byte_to_col(6, 4), 4);
        assert_eq!(line.byte_to_col(7, 4), 5);
        // A column inside a wide char maps to its start
        assert_eq!(line.col_to_byte(1, 4), 0);
        assert_eq!(line.col_to_byte(4, 4), 6);
        assert_eq!(line.col_to_byte(99, 4), 7);
    }

    #[test]
    fn test_columns_tabs() {
        let line = Line::from("a\tb");
        assert_eq!(line.byte_to_col(1, 4), 1);
        assert_eq!(line.byte_to_col(2, 4), 4);
        assert_eq!(line.col_to_byte(2, 4), 1);
        assert_eq!(line.col_to_byte(4, 4), 2);
        assert_eq!(char_width('\t', 0, 8), 8);
        assert_eq!(char_width('\t', 3, 8), 5);
    }

    #[test]
    fn test_delete_range() {
        let mut line = Line::from("Hello World");
        let deleted = line.delete_range(0, 6);
        assert_eq!(deleted, "Hello ");
        assert_eq!(line.text(), "World");
    }

    #[test]
    fn test_split_and_append() {
        let mut line = Line::from("Hello World");
        let remainder = line.split_off(6);
        assert_eq!(line.text(), "Hello ");
        assert_eq!(remainder.text(), "World");
        line.append(remainder);
        assert_eq!(line.text(), "Hello World");
    }
}
