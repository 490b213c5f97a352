//! Window representation - the viewport onto the buffer

/// The text area's view of the buffer
#[derive(Debug, Default)]
pub struct Window {
    /// First visible line in the window
    top_line: usize,
    /// Cursor line position (0-indexed)
    cursor_line: usize,
    /// Cursor column position (byte offset within line)
    cursor_col: usize,
    /// Number of text rows in window
    height: u16,
    /// Goal display column for vertical movement
    goal_col: usize,
}

impl Window {
    pub fn new(height: u16) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Get cursor column (byte offset)
    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn set_cursor(&mut self, line: usize, col: usize) {
        self.cursor_line = line;
        self.cursor_col = col;
    }

    pub fn goal_col(&self) -> usize {
        self.goal_col
    }

    pub fn set_goal_col(&mut self, col: usize) {
        self.goal_col = col;
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.ensure_cursor_visible();
    }

    /// Move to the start of the buffer and forget the scroll position
    pub fn reset(&mut self) {
        *self = Self::new(self.height);
    }

    /// Ensure cursor is visible, adjusting top_line if needed
    pub fn ensure_cursor_visible(&mut self) {
        let height = (self.height as usize).max(1);
        if self.cursor_line < self.top_line {
            self.top_line = self.cursor_line;
        } else if self.cursor_line >= self.top_line + height {
            self.top_line = self.cursor_line + 1 - height;
        }
    }

    /// Scroll the view down by n lines, keeping the cursor in view
    pub fn scroll_down(&mut self, n: usize, line_count: usize) {
        self.top_line = self
            .top_line
            .saturating_add(n)
            .min(line_count.saturating_sub(1));
        if self.cursor_line < self.top_line {
            self.cursor_line = self.top_line;
        }
    }

    /// Scroll the view up by n lines, keeping the cursor in view
    pub fn scroll_up(&mut self, n: usize) {
        self.top_line = self.top_line.saturating_sub(n);
        let bottom = self.top_line + (self.height as usize).max(1) - 1;
        if self.cursor_line > bottom {
            self.cursor_line = bottom;
        }
    }
}
