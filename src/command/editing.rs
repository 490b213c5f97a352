//! Editing commands - insertion and deletion

use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// Split the line at the cursor
pub fn newline(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.insert_newline();
    Ok(CommandStatus::Success)
}

/// Delete the character under the cursor; at end of line the next line is joined
pub fn delete_char_forward(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(editor.delete_forward().into())
}

/// Delete the character before the cursor
pub fn delete_char_backward(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(editor.delete_backward().into())
}

pub fn insert_tab(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.insert_tab();
    Ok(CommandStatus::Success)
}
