//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{self as ct, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::syntax::{Color, Style};

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
    /// Set when the size changed since the last call to `take_resized`
    resized: bool,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self {
            cols,
            rows,
            resized: false,
        })
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Whether the terminal was resized since the last call
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Read a key event (blocking). Resize events update the size.
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(key_event),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    self.resized = true;
                    return Ok(KeyEvent::from(event::KeyCode::Null));
                }
                _ => {}
            }
        }
    }

    /// Set the style for following output
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        queue_style(&mut io::stdout(), style)?;
        Ok(())
    }

    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled { Attribute::Reverse } else { Attribute::NoReverse };
        queue!(io::stdout(), SetAttribute(attr))?;
        Ok(())
    }

    /// Set dim/faint mode (for line numbers, etc.)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        let attr = if enabled { Attribute::Dim } else { Attribute::NormalIntensity };
        queue!(io::stdout(), SetAttribute(attr))?;
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Sound the bell
    pub fn beep(&mut self) -> Result<()> {
        queue!(io::stdout(), Print('\x07'))?;
        self.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn to_crossterm(color: Color) -> ct::Color {
    match color {
        Color::Default => ct::Color::Reset,
        Color::Black => ct::Color::Black,
        Color::Red => ct::Color::DarkRed,
        Color::Green => ct::Color::DarkGreen,
        Color::Yellow => ct::Color::DarkYellow,
        Color::Blue => ct::Color::DarkBlue,
        Color::Magenta => ct::Color::DarkMagenta,
        Color::Cyan => ct::Color::DarkCyan,
        Color::White => ct::Color::Grey,
        Color::BrightBlack => ct::Color::DarkGrey,
        Color::BrightRed => ct::Color::Red,
        Color::BrightGreen => ct::Color::Green,
        Color::BrightYellow => ct::Color::Yellow,
        Color::BrightBlue => ct::Color::Blue,
        Color::BrightMagenta => ct::Color::Magenta,
        Color::BrightCyan => ct::Color::Cyan,
        Color::BrightWhite => ct::Color::White,
    }
}

/// Queue the escape sequences for `style` on any writer.
/// Attributes are reset first so styles never leak from one run to the next.
pub fn queue_style<W: Write>(out: &mut W, style: &Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if style.is_default() {
        return Ok(());
    }
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(to_crossterm(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(to_crossterm(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_only_resets() {
        let mut out = Vec::new();
        queue_style(&mut out, &Style::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[0m");
    }

    #[test]
    fn test_style_sequences() {
        let mut out = Vec::new();
        queue_style(&mut out, &Style::fg(Color::Magenta).with_bold()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[0m"));
        assert!(text.contains("\x1b[1m"));
        assert!(text.contains("\x1b[38;5;5m"));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(to_crossterm(Color::Default), ct::Color::Reset);
        assert_eq!(to_crossterm(Color::BrightBlack), ct::Color::DarkGrey);
        assert_eq!(to_crossterm(Color::Red), ct::Color::DarkRed);
    }
}
