//! Explorer commands - file tree navigation and focus

use crate::editor::{EditorState, Focus};
use crate::error::Result;
use super::CommandStatus;

/// Show or hide the explorer (C-x t, F2)
pub fn toggle_explorer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.explorer.visible = !editor.explorer.visible;
    if !editor.explorer.visible {
        editor.focus = Focus::Text;
    }
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}

/// Move focus between the explorer and the text area (C-x o)
pub fn other_pane(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.focus = match editor.focus {
        Focus::Text => {
            if !editor.explorer.visible {
                editor.explorer.visible = true;
                editor.display.force_redraw();
            }
            Focus::Explorer
        }
        Focus::Explorer => Focus::Text,
    };
    Ok(CommandStatus::Success)
}

pub fn explorer_next(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.explorer.select_next();
    Ok(CommandStatus::Success)
}

pub fn explorer_previous(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.explorer.select_previous();
    Ok(CommandStatus::Success)
}

/// Expand or collapse a directory; open a file
pub fn explorer_activate(editor: &mut EditorState) -> Result<CommandStatus> {
    let Some(entry) = editor.explorer.selected() else {
        return Ok(CommandStatus::Failure);
    };
    let (path, is_dir) = (entry.path.clone(), entry.is_dir);

    if is_dir {
        if let Err(e) = editor.explorer.toggle_selected(editor.fs.as_ref()) {
            return Ok(editor.fail(e));
        }
        Ok(CommandStatus::Success)
    } else {
        Ok(editor.open_or_confirm(path))
    }
}

/// Collapse the selected directory, or move to its parent
pub fn explorer_collapse(editor: &mut EditorState) -> Result<CommandStatus> {
    if let Err(e) = editor.explorer.collapse_selected(editor.fs.as_ref()) {
        return Ok(editor.fail(e));
    }
    Ok(CommandStatus::Success)
}

/// Re-read the tree from disk (F5)
pub fn refresh_explorer(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.refresh_explorer();
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}
