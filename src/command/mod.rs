//! Command dispatch system
//!
//! Commands are plain functions registered by name in a `CommandRegistry`.
//! A `KeyTable` maps keys to command names; the editor keeps one table for
//! the text area and one consulted first while the explorer has focus.
//! Commands are organized into submodules by category.

mod editing;
mod explorer;
mod files;
mod misc;
mod navigation;

use std::collections::HashMap;

use crate::editor::EditorState;
use crate::error::Result;
use crate::input::{special, Key};

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The command could not do its job; the bell rings
    Failure,
    /// The user cancelled
    Abort,
}

impl From<bool> for CommandStatus {
    fn from(ok: bool) -> Self {
        if ok {
            CommandStatus::Success
        } else {
            CommandStatus::Failure
        }
    }
}

/// Command function signature
pub type CommandFn = fn(&mut EditorState) -> Result<CommandStatus>;

/// A named command
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub function: CommandFn,
    pub help: &'static str,
}

/// Menu bar entries: label and command name
pub const MENU: &[(&str, &str)] = &[
    ("New", "new-file"),
    ("Open", "open-file"),
    ("Save", "save-file"),
    ("Save As", "save-file-as"),
    ("Rename", "rename-file"),
    ("Delete", "delete-file"),
    ("New File", "create-file"),
    ("New Folder", "create-directory"),
    ("Explorer", "toggle-explorer"),
    ("Quit", "quit"),
];

/// All commands, by name
pub struct CommandRegistry {
    commands: HashMap<&'static str, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registry holding every built-in command
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.setup_defaults();
        registry
    }

    pub fn register(&mut self, name: &'static str, function: CommandFn, help: &'static str) {
        self.commands.insert(name, Command { name, function, help });
    }

    pub fn get(&self, name: &str) -> Option<CommandFn> {
        self.commands.get(name).map(|c| c.function)
    }

    pub fn help(&self, name: &str) -> Option<&'static str> {
        self.commands.get(name).map(|c| c.help)
    }

    /// Get all command names (sorted)
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.values().map(|c| c.name).collect();
        names.sort_unstable();
        names
    }

    fn setup_defaults(&mut self) {
        use editing::*;
        use explorer::*;
        use files::*;
        use misc::*;
        use navigation::*;

        // Movement
        self.register("forward-char", forward_char, "Move forward one character");
        self.register("backward-char", backward_char, "Move backward one character");
        self.register("next-line", next_line, "Move to the next line");
        self.register("previous-line", previous_line, "Move to the previous line");
        self.register("beginning-of-line", beginning_of_line, "Move to the start of the line");
        self.register("end-of-line", end_of_line, "Move to the end of the line");
        self.register("scroll-up", scroll_up, "Scroll up one page");
        self.register("scroll-down", scroll_down, "Scroll down one page");
        self.register("beginning-of-buffer", beginning_of_buffer, "Move to the start of the buffer");
        self.register("end-of-buffer", end_of_buffer, "Move to the end of the buffer");

        // Editing
        self.register("newline", newline, "Split the line at the cursor");
        self.register("delete-char", delete_char_forward, "Delete the character at the cursor");
        self.register("delete-backward-char", delete_char_backward, "Delete the character before the cursor");
        self.register("insert-tab", insert_tab, "Insert spaces up to the tab width");

        // Files
        self.register("new-file", new_file, "Start an empty untitled buffer");
        self.register("open-file", open_file, "Open a file");
        self.register("save-file", save_file, "Save the buffer to its file");
        self.register("save-file-as", save_file_as, "Save the buffer under a new name");
        self.register("rename-file", rename_file, "Rename the selected or current file");
        self.register("delete-file", delete_file, "Delete the selected or current file");
        self.register("create-file", create_file, "Create a file in the selected directory");
        self.register("create-directory", create_directory, "Create a directory in the selected directory");
        self.register("revert-file", revert_file, "Reload the buffer from disk");

        // Explorer
        self.register("toggle-explorer", toggle_explorer, "Show or hide the explorer");
        self.register("other-pane", other_pane, "Move focus between explorer and text");
        self.register("explorer-next", explorer_next, "Select the next explorer entry");
        self.register("explorer-previous", explorer_previous, "Select the previous explorer entry");
        self.register("explorer-activate", explorer_activate, "Open the selected file or expand the directory");
        self.register("explorer-collapse", explorer_collapse, "Collapse the selected directory");
        self.register("refresh-explorer", refresh_explorer, "Re-read the explorer tree from disk");

        // Misc
        self.register("redraw-display", redraw_display, "Redraw the screen");
        self.register("toggle-line-numbers", toggle_line_numbers, "Show or hide line numbers");
        self.register("toggle-syntax-highlighting", toggle_syntax_highlighting, "Turn highlighting on or off");
        self.register("execute-command", execute_command, "Run a command by name");
        self.register("keyboard-quit", keyboard_quit, "Cancel the current operation");
        self.register("quit", quit, "Exit the editor");
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Key binding table
pub struct KeyTable {
    bindings: HashMap<u32, &'static str>,
}

impl KeyTable {
    /// Create an empty key table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create key table with the text area bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Bindings that apply while the explorer has focus
    pub fn explorer_defaults() -> Self {
        let mut table = Self::new();
        table.bind(Key::special(special::DOWN), "explorer-next");
        table.bind(Key::ctrl('n'), "explorer-next");
        table.bind(Key::special(special::UP), "explorer-previous");
        table.bind(Key::ctrl('p'), "explorer-previous");
        table.bind(Key::ENTER, "explorer-activate");
        table.bind(Key::special(special::RIGHT), "explorer-activate");
        table.bind(Key::special(special::LEFT), "explorer-collapse");
        table.bind(Key::TAB, "other-pane");
        table.bind(Key::char('n'), "create-file");
        table.bind(Key::char('+'), "create-directory");
        table.bind(Key::char('r'), "rename-file");
        table.bind(Key::char('d'), "delete-file");
        table.bind(Key::special(special::DELETE), "delete-file");
        table.bind(Key::char('g'), "refresh-explorer");
        table
    }

    pub fn bind(&mut self, key: Key, name: &'static str) {
        self.bindings.insert(key.code(), name);
    }

    /// Look up the command name for a key
    pub fn lookup(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).copied()
    }

    /// The key shown for a command; the lowest key code wins when several
    /// keys run it
    pub fn key_for(&self, name: &str) -> Option<Key> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == name)
            .map(|(&code, _)| code)
            .min()
            .map(Key)
    }

    /// Get all bindings as (key, command_name) pairs, sorted by command
    pub fn all_bindings(&self) -> Vec<(Key, &'static str)> {
        let mut bindings: Vec<_> = self
            .bindings
            .iter()
            .map(|(&code, &name)| (Key(code), name))
            .collect();
        bindings.sort_by_key(|(key, name)| (*name, key.code()));
        bindings
    }

    fn setup_defaults(&mut self) {
        // Basic cursor movement
        self.bind(Key::ctrl('f'), "forward-char");
        self.bind(Key::ctrl('b'), "backward-char");
        self.bind(Key::ctrl('n'), "next-line");
        self.bind(Key::ctrl('p'), "previous-line");
        self.bind(Key::ctrl('a'), "beginning-of-line");
        self.bind(Key::ctrl('e'), "end-of-line");
        self.bind(Key::ctrl('v'), "scroll-down");
        self.bind(Key::meta('v'), "scroll-up");
        self.bind(Key::meta('<'), "beginning-of-buffer");
        self.bind(Key::meta('>'), "end-of-buffer");

        self.bind(Key::special(special::RIGHT), "forward-char");
        self.bind(Key::special(special::LEFT), "backward-char");
        self.bind(Key::special(special::DOWN), "next-line");
        self.bind(Key::special(special::UP), "previous-line");
        self.bind(Key::special(special::HOME), "beginning-of-line");
        self.bind(Key::special(special::END), "end-of-line");
        self.bind(Key::special(special::PAGE_DOWN), "scroll-down");
        self.bind(Key::special(special::PAGE_UP), "scroll-up");

        // Editing
        self.bind(Key::ENTER, "newline");
        self.bind(Key::TAB, "insert-tab");
        self.bind(Key::ctrl('d'), "delete-char");
        self.bind(Key::special(special::DELETE), "delete-char");
        self.bind(Key::BACKSPACE, "delete-backward-char");
        self.bind(Key::ctrl('h'), "delete-backward-char");

        // Files
        self.bind(Key::ctlx_ctrl('n'), "new-file");
        self.bind(Key::ctlx_ctrl('f'), "open-file");
        self.bind(Key::ctlx_ctrl('s'), "save-file");
        self.bind(Key::ctlx_ctrl('w'), "save-file-as");
        self.bind(Key::ctlx_ctrl('r'), "revert-file");
        self.bind(Key::ctlx('r'), "rename-file");
        self.bind(Key::ctlx('d'), "delete-file");
        self.bind(Key::ctlx('f'), "create-file");
        self.bind(Key::ctlx('+'), "create-directory");

        // Explorer
        self.bind(Key::ctlx('t'), "toggle-explorer");
        self.bind(Key::function(2), "toggle-explorer");
        self.bind(Key::ctlx('o'), "other-pane");
        self.bind(Key::function(5), "refresh-explorer");

        // Screen and misc
        self.bind(Key::ctrl('l'), "redraw-display");
        self.bind(Key::ctlx('#'), "toggle-line-numbers");
        self.bind(Key::ctlx('s'), "toggle-syntax-highlighting");
        self.bind(Key::meta('x'), "execute-command");
        self.bind(Key::ctrl('g'), "keyboard-quit");
        self.bind(Key::ctlx_ctrl('c'), "quit");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_binding_names_a_command() {
        let registry = CommandRegistry::with_defaults();
        for table in [KeyTable::with_defaults(), KeyTable::explorer_defaults()] {
            for (key, name) in table.all_bindings() {
                assert!(registry.get(name).is_some(), "{} is bound to unknown {}", key.display_name(), name);
            }
        }
    }

    #[test]
    fn test_menu_commands_are_bound() {
        let registry = CommandRegistry::with_defaults();
        let keys = KeyTable::with_defaults();
        for (label, name) in MENU {
            assert!(registry.get(name).is_some(), "{} has no command", label);
            assert!(keys.key_for(name).is_some(), "{} has no key", label);
        }
    }

    #[test]
    fn test_lookup() {
        let mut keys = KeyTable::with_defaults();
        assert_eq!(keys.lookup(Key::ctlx_ctrl('s')), Some("save-file"));
        assert_eq!(keys.lookup(Key::ctrl('z')), None);
        keys.bind(Key::ctrl('z'), "quit");
        assert_eq!(keys.lookup(Key::ctrl('z')), Some("quit"));
    }

    #[test]
    fn test_key_for_prefers_lowest_code() {
        let keys = KeyTable::with_defaults();
        // C-n and Down both run next-line; the control key has the lower code
        assert_eq!(keys.key_for("next-line"), Some(Key::ctrl('n')));
        assert_eq!(keys.key_for("no-such-command"), None);
    }

    #[test]
    fn test_registry_names_sorted() {
        let registry = CommandRegistry::with_defaults();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"create-directory"));
        assert_eq!(registry.help("quit"), Some("Exit the editor"));
    }
}
