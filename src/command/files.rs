//! File commands - open, save, and filesystem operations

use std::path::Path;

use crate::editor::{Confirm, EditorState, PromptAction};
use crate::error::{EditorError, Result};
use super::CommandStatus;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Start an empty untitled buffer (C-x C-n)
pub fn new_file(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.is_modified() {
        editor.ask("Discard changes?", Confirm::NewFile);
    } else {
        editor.new_buffer();
    }
    Ok(CommandStatus::Success)
}

/// Prompt for a file to open (C-x C-f)
pub fn open_file(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.start_prompt("Open file", PromptAction::OpenFile, None);
    Ok(CommandStatus::Success)
}

/// Save the buffer; an untitled buffer prompts for a name (C-x C-s)
pub fn save_file(editor: &mut EditorState) -> Result<CommandStatus> {
    match editor.buffer.filename().map(Path::to_path_buf) {
        Some(path) => Ok(editor.save_to(path)),
        None => save_file_as(editor),
    }
}

/// Save the buffer under a new name (C-x C-w)
pub fn save_file_as(editor: &mut EditorState) -> Result<CommandStatus> {
    let default = editor.buffer.filename().map(file_name);
    editor.start_prompt("Save as", PromptAction::SaveAs, default);
    Ok(CommandStatus::Success)
}

/// Rename the explorer selection, or the buffer's file from the text area
pub fn rename_file(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(path) = editor.file_target() else {
        return Ok(editor.fail(EditorError::NoFileName));
    };
    let name = file_name(&path);
    editor.start_prompt(
        &format!("Rename {} to", name),
        PromptAction::RenameFile(path),
        Some(name),
    );
    Ok(CommandStatus::Success)
}

/// Delete the explorer selection, or the buffer's file, after confirmation
pub fn delete_file(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(path) = editor.file_target() else {
        return Ok(editor.fail(EditorError::NoFileName));
    };
    let question = format!("Delete {}?", file_name(&path));
    editor.ask(&question, Confirm::Delete(path));
    Ok(CommandStatus::Success)
}

/// Prompt for a new file name in the selected directory
pub fn create_file(editor: &mut EditorState) -> Result<CommandStatus> {
    let dir = editor.explorer.target_dir();
    editor.start_prompt("New file", PromptAction::CreateFile(dir), None);
    Ok(CommandStatus::Success)
}

/// Prompt for a new directory name in the selected directory
pub fn create_directory(editor: &mut EditorState) -> Result<CommandStatus> {
    let dir = editor.explorer.target_dir();
    editor.start_prompt("New folder", PromptAction::CreateDirectory(dir), None);
    Ok(CommandStatus::Success)
}

/// Re-read the buffer's file, asking first when there are unsaved changes
pub fn revert_file(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(path) = editor.buffer.filename().map(Path::to_path_buf) else {
        return Ok(editor.fail(EditorError::NoFileName));
    };
    if editor.buffer.is_modified() {
        editor.ask("Discard changes and revert?", Confirm::Revert(path));
        Ok(CommandStatus::Success)
    } else {
        Ok(editor.open_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/tmp/dir/main.py")), "main.py");
        assert_eq!(file_name(Path::new("/")), "/");
    }
}
