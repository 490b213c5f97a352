//! Display rendering
//!
//! Screen layout, top to bottom: the menu bar, the body (explorer panel,
//! separator and text area), the mode line and the message line.

use std::io::{self, Write};

use crate::buffer::Buffer;
use crate::command::{KeyTable, MENU};
use crate::editor::Focus;
use crate::error::Result;
use crate::explorer::Explorer;
use crate::line::char_width;
use crate::syntax::{Span, Style, SyntaxManager};
use crate::terminal::{queue_style, Terminal};
use crate::window::Window;

/// Rows used by the menu bar, mode line and message line
pub const CHROME_ROWS: u16 = 3;

/// Text rows available on a terminal with `rows` rows
pub fn text_height(rows: u16) -> u16 {
    rows.saturating_sub(CHROME_ROWS).max(1)
}

/// Everything one frame paints
pub struct Frame<'a> {
    pub buffer: &'a Buffer,
    pub window: &'a Window,
    pub explorer: &'a Explorer,
    pub focus: Focus,
    pub syntax: &'a SyntaxManager,
    pub keytab: &'a KeyTable,
    pub prompt_active: bool,
    pub tab_width: usize,
}

/// Display state
#[derive(Debug)]
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in minibuffer (bottom line)
    message: Option<String>,
    /// Ring the bell after this key
    bell: bool,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
            bell: false,
            show_line_numbers: false,
        }
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
        self.needs_redraw = true;
    }

    /// Calculate width needed for line numbers (including separator)
    fn line_number_width(&self, line_count: usize) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        line_count.max(1).to_string().len().max(3) + 1
    }

    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    #[cfg(test)]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn bell(&mut self) {
        self.bell = true;
    }

    /// Whether the bell was requested since the last call
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    /// Render the editor display
    pub fn render(&mut self, terminal: &mut Terminal, frame: &Frame) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        let height = text_height(rows);

        terminal.set_cursor_visible(false)?;
        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        self.render_menu_bar(terminal, frame.keytab, cols)?;

        let text_left = if frame.explorer.visible {
            let width = (frame.explorer.width as usize).min(cols.saturating_sub(1));
            self.render_explorer(terminal, frame, width, height)?;
            width + 1
        } else {
            0
        };

        self.render_text(terminal, frame, text_left, cols.saturating_sub(text_left), height)?;
        self.render_mode_line(terminal, frame, rows.saturating_sub(2), cols)?;
        self.render_minibuffer(terminal, rows.saturating_sub(1), cols)?;
        self.position_cursor(terminal, frame, text_left, cols)?;

        terminal.set_cursor_visible(true)?;
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    fn render_menu_bar(&self, terminal: &mut Terminal, keytab: &KeyTable, cols: usize) -> Result<()> {
        terminal.move_cursor(0, 0)?;
        terminal.set_reverse(true)?;
        let bar = menu_bar_text(keytab);
        terminal.write_str(&pad_to_width(&bar, cols))?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    fn render_explorer(
        &self,
        terminal: &mut Terminal,
        frame: &Frame,
        width: usize,
        height: u16,
    ) -> Result<()> {
        let explorer = frame.explorer;
        let first = explorer.scroll_offset(height as usize);

        for row in 0..height {
            terminal.move_cursor(row + 1, 0)?;
            let idx = first + row as usize;
            match explorer.entries().get(idx) {
                Some(entry) => {
                    let marker = match (entry.is_dir, entry.expanded) {
                        (true, true) => "▾ ",
                        (true, false) => "▸ ",
                        _ => "  ",
                    };
                    let label = format!("{}{}{}", "  ".repeat(entry.depth), marker, entry.name);
                    let selected = idx == explorer.selected_index();
                    if selected && frame.focus == Focus::Explorer {
                        terminal.set_reverse(true)?;
                    } else if selected || entry.is_dir {
                        terminal.apply_style(&Style::default().with_bold())?;
                    }
                    terminal.write_str(&pad_to_width(&label, width))?;
                    terminal.reset_attributes()?;
                }
                None => terminal.write_str(&" ".repeat(width))?,
            }
            terminal.set_dim(true)?;
            terminal.write_str("│")?;
            terminal.set_dim(false)?;
        }
        Ok(())
    }

    fn render_text(
        &self,
        terminal: &mut Terminal,
        frame: &Frame,
        left: usize,
        cols: usize,
        height: u16,
    ) -> Result<()> {
        let buffer = frame.buffer;
        let lnum_width = self.line_number_width(buffer.line_count());
        let text_cols = cols.saturating_sub(lnum_width);
        let language = buffer.language();

        for row in 0..height {
            let line_idx = frame.window.top_line() + row as usize;
            terminal.move_cursor(row + 1, left as u16)?;

            match buffer.line(line_idx) {
                Some(line) => {
                    if lnum_width > 0 {
                        terminal.set_dim(true)?;
                        terminal.write_str(&format!("{:>width$} ", line_idx + 1, width = lnum_width - 1))?;
                        terminal.set_dim(false)?;
                    }
                    // Formatted at paint time, so an edited line is never shown with stale spans
                    let spans = frame.syntax.highlight_line(language, line.text());
                    for (style, text) in styled_segments(line.text(), &spans, text_cols, frame.tab_width) {
                        terminal.apply_style(&style)?;
                        terminal.write_str(&text)?;
                    }
                    terminal.reset_attributes()?;
                }
                None => {
                    if lnum_width > 0 {
                        terminal.write_str(&" ".repeat(lnum_width))?;
                    }
                    terminal.set_dim(true)?;
                    terminal.write_str("~")?;
                    terminal.set_dim(false)?;
                }
            }
            terminal.clear_to_eol()?;
        }
        Ok(())
    }

    fn render_mode_line(&self, terminal: &mut Terminal, frame: &Frame, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;
        terminal.write_str(&pad_to_width(&mode_line_text(frame), cols))?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    /// Render the minibuffer (message area)
    fn render_minibuffer(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        if let Some(ref msg) = self.message {
            terminal.write_str(&truncate_to_width(msg, cols))?;
        }
        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Position the hardware cursor at the correct location
    fn position_cursor(&self, terminal: &mut Terminal, frame: &Frame, left: usize, cols: usize) -> Result<()> {
        let last_col = cols.saturating_sub(1);

        if frame.prompt_active {
            let width = self.message.as_deref().map(display_width).unwrap_or(0);
            terminal.move_cursor(terminal.rows().saturating_sub(1), width.min(last_col) as u16)?;
            return Ok(());
        }

        if frame.focus == Focus::Explorer {
            let height = text_height(terminal.rows()) as usize;
            let row = frame.explorer.selected_index() - frame.explorer.scroll_offset(height);
            terminal.move_cursor(row as u16 + 1, 0)?;
            return Ok(());
        }

        let window = frame.window;
        let display_col = frame
            .buffer
            .line(window.cursor_line())
            .map(|line| line.byte_to_col(window.cursor_col(), frame.tab_width))
            .unwrap_or(0);
        let lnum_width = self.line_number_width(frame.buffer.line_count());
        let row = window.cursor_line().saturating_sub(window.top_line()) as u16 + 1;
        let col = (left + lnum_width + display_col).min(last_col) as u16;
        terminal.move_cursor(row, col)?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Menu bar text: each file command with its key
fn menu_bar_text(keytab: &KeyTable) -> String {
    let items: Vec<String> = MENU
        .iter()
        .map(|(label, command)| match keytab.key_for(command) {
            Some(key) => format!("{} [{}]", label, key.display_name()),
            None => label.to_string(),
        })
        .collect();
    format!(" {}", items.join("  "))
}

/// Mode line: modified flag, file name, language, line and position
fn mode_line_text(frame: &Frame) -> String {
    let buffer = frame.buffer;
    let modified = if buffer.is_modified() { "**" } else { "--" };
    let filename = buffer
        .filename()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "no file".to_string());
    let language = buffer.language().unwrap_or("Text");

    let line_count = buffer.line_count();
    let cursor_line = frame.window.cursor_line() + 1;
    let percent = if line_count <= 1 {
        "All".to_string()
    } else if cursor_line == 1 {
        "Top".to_string()
    } else if cursor_line >= line_count {
        "Bot".to_string()
    } else {
        format!("{}%", cursor_line * 100 / line_count)
    };

    let syntax = if frame.syntax.enabled { "" } else { " plain" };
    format!(
        "{} codepad: {} ({}) [{}{}] L{} {} --",
        modified,
        buffer.name(),
        filename,
        language,
        syntax,
        cursor_line,
        percent
    )
}

/// Split a line into styled pieces ready to print, cut at `max_cols`
/// display columns. Tabs become spaces and other control characters `?`.
/// Bytes outside every span get the default style.
pub fn styled_segments(text: &str, spans: &[Span], max_cols: usize, tab_width: usize) -> Vec<(Style, String)> {
    let mut segments: Vec<(Style, String)> = Vec::new();
    let mut col = 0;
    let mut span_idx = 0;

    for (byte_idx, ch) in text.char_indices() {
        let width = char_width(ch, col, tab_width);
        if col + width > max_cols {
            break;
        }

        while span_idx < spans.len() && spans[span_idx].end() <= byte_idx {
            span_idx += 1;
        }
        let style = match spans.get(span_idx) {
            Some(span) if span.contains(byte_idx) => span.style,
            _ => Style::default(),
        };

        let shown = if ch == '\t' {
            " ".repeat(width)
        } else if ch.is_control() {
            "?".to_string()
        } else {
            ch.to_string()
        };

        match segments.last_mut() {
            Some((last, piece)) if *last == style => piece.push_str(&shown),
            _ => segments.push((style, shown)),
        }
        col += width;
    }
    segments
}

/// Write `text` with ANSI styling for `spans`, followed by a newline
pub fn print_highlighted<W: Write>(out: &mut W, text: &str, spans: &[Span], tab_width: usize) -> io::Result<()> {
    for (style, piece) in styled_segments(text, spans, usize::MAX, tab_width) {
        queue_style(out, &style)?;
        out.write_all(piece.as_bytes())?;
    }
    queue_style(out, &Style::default())?;
    writeln!(out)
}

fn display_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

/// Truncate or pad with spaces to exactly `width` columns
fn pad_to_width(s: &str, width: usize) -> String {
    let mut result = truncate_to_width(s, width);
    let used = display_width(&result);
    result.push_str(&" ".repeat(width.saturating_sub(used)));
    result
}
