//! Miscellaneous commands

use crate::editor::{Confirm, EditorState, PromptAction};
use crate::error::Result;
use super::CommandStatus;

/// Redraw the display (C-l)
pub fn redraw_display(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.display.force_redraw();
    Ok(CommandStatus::Success)
}

pub fn toggle_line_numbers(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.display.toggle_line_numbers();
    let state = if editor.display.show_line_numbers { "on" } else { "off" };
    editor.display.set_message(format!("Line numbers {}", state));
    Ok(CommandStatus::Success)
}

pub fn toggle_syntax_highlighting(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.syntax.toggle();
    editor.display.force_redraw();
    let state = if editor.syntax.enabled { "on" } else { "off" };
    editor.display.set_message(format!("Syntax highlighting {}", state));
    Ok(CommandStatus::Success)
}

/// Prompt for a command name and run it (M-x)
pub fn execute_command(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.start_prompt("M-x", PromptAction::ExecuteCommand, None);
    Ok(CommandStatus::Success)
}

/// Cancel the current operation (C-g)
pub fn keyboard_quit(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.input.reset();
    Ok(CommandStatus::Abort)
}

/// Exit the editor, asking first if there are unsaved changes (C-x C-c)
pub fn quit(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.is_modified() {
        editor.ask("Modified buffer; quit anyway?", Confirm::Quit);
    } else {
        editor.running = false;
    }
    Ok(CommandStatus::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fileops::DiskFs;
    use crate::syntax::{SyntaxManager, Theme};

    fn editor() -> (tempfile::TempDir, EditorState) {
        let dir = tempfile::tempdir().unwrap();
        let syntax = SyntaxManager::new(&Theme::default()).unwrap();
        let editor = EditorState::new(Config::default(), syntax, Box::new(DiskFs::new()), dir.path().to_path_buf());
        (dir, editor)
    }

    #[test]
    fn test_toggles_report_state() {
        let (_dir, mut editor) = editor();
        let before = editor.display.show_line_numbers;
        toggle_line_numbers(&mut editor).unwrap();
        assert_ne!(editor.display.show_line_numbers, before);

        assert!(editor.syntax.enabled);
        toggle_syntax_highlighting(&mut editor).unwrap();
        assert!(!editor.syntax.enabled);
        assert_eq!(editor.display.message(), Some("Syntax highlighting off"));
    }

    #[test]
    fn test_keyboard_quit_aborts() {
        let (_dir, mut editor) = editor();
        assert_eq!(editor.execute("keyboard-quit").unwrap(), CommandStatus::Abort);
        assert_eq!(editor.display.message(), Some("Quit"));
    }

    #[test]
    fn test_quit_unmodified_stops_immediately() {
        let (_dir, mut editor) = editor();
        quit(&mut editor).unwrap();
        assert!(!editor.running);
    }
}
