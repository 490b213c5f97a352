//! Navigation commands - cursor movement

use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// Move cursor forward one character, wrapping to the next line
pub fn forward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(editor.move_cursor_right().into())
}

/// Move cursor backward one character, wrapping to the previous line
pub fn backward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(editor.move_cursor_left().into())
}

/// Move cursor to next line
pub fn next_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(editor.move_cursor_down().into())
}

/// Move cursor to previous line
pub fn previous_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(editor.move_cursor_up().into())
}

pub fn beginning_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.move_to_bol();
    Ok(CommandStatus::Success)
}

pub fn end_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.move_to_eol();
    Ok(CommandStatus::Success)
}

/// Scroll down one page (C-v)
pub fn scroll_down(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.page_down();
    Ok(CommandStatus::Success)
}

/// Scroll up one page (M-v)
pub fn scroll_up(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.page_up();
    Ok(CommandStatus::Success)
}

/// Move to the start of the buffer (M-<)
pub fn beginning_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.move_to_buffer_start();
    Ok(CommandStatus::Success)
}

/// Move to the end of the buffer (M->)
pub fn end_of_buffer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.move_to_buffer_end();
    Ok(CommandStatus::Success)
}
