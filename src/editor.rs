//! Editor state and main loop
//!
//! `EditorState` owns everything except the terminal, so commands and
//! prompt flows can be driven directly in tests.

use std::path::{Path, PathBuf};

use crate::buffer::Buffer;
use crate::command::{CommandRegistry, CommandStatus, KeyTable};
use crate::config::Config;
use crate::display::{text_height, Display, Frame};
use crate::error::{EditorError, Result};
use crate::explorer::Explorer;
use crate::fileops::FileOps;
use crate::input::{InputState, Key};
use crate::syntax::SyntaxManager;
use crate::terminal::Terminal;
use crate::window::Window;

/// Text rows before the first paint sizes the window
const INITIAL_HEIGHT: u16 = 20;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Text,
    Explorer,
}

/// What runs once a yes/no question is answered with `y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    NewFile,
    OpenFile(PathBuf),
    Revert(PathBuf),
    Delete(PathBuf),
    Quit,
}

/// What action to perform when prompt completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    None,
    OpenFile,
    SaveAs,
    RenameFile(PathBuf),
    CreateFile(PathBuf),
    CreateDirectory(PathBuf),
    ExecuteCommand,
    Confirm(Confirm),
}

impl Default for PromptAction {
    fn default() -> Self {
        PromptAction::None
    }
}

/// Minibuffer prompt state
#[derive(Debug, Clone, Default)]
pub struct PromptState {
    /// Whether prompt is active
    pub active: bool,
    /// The prompt string (e.g., "Open file")
    pub prompt: String,
    /// Current input
    pub input: String,
    /// What to do when complete
    pub action: PromptAction,
    /// Default value (used when the input is empty)
    pub default: Option<String>,
}

/// Main editor state
pub struct EditorState {
    /// The open file
    pub buffer: Buffer,
    /// Viewport onto the buffer
    pub window: Window,
    /// File tree panel
    pub explorer: Explorer,
    /// Pane receiving keys
    pub focus: Focus,
    pub display: Display,
    pub input: InputState,
    /// Text area key bindings
    pub keytab: KeyTable,
    /// Bindings consulted first while the explorer has focus
    pub explorer_keys: KeyTable,
    pub commands: CommandRegistry,
    pub syntax: SyntaxManager,
    /// Filesystem access
    pub fs: Box<dyn FileOps>,
    /// Minibuffer prompt state
    pub prompt: PromptState,
    pub config: Config,
    /// Whether editor is running
    pub running: bool,
}

impl EditorState {
    /// Create the editor with an empty buffer and the explorer rooted at `root`
    pub fn new(config: Config, syntax: SyntaxManager, fs: Box<dyn FileOps>, root: PathBuf) -> Self {
        let mut explorer = Explorer::new(root, config.show_explorer, config.explorer_width);
        if let Err(e) = explorer.refresh(fs.as_ref()) {
            log::warn!("cannot list {}: {}", explorer.root().display(), e);
        }

        let mut display = Display::new();
        display.show_line_numbers = config.show_line_numbers;

        Self {
            buffer: Buffer::new(),
            window: Window::new(INITIAL_HEIGHT),
            explorer,
            focus: Focus::Text,
            display,
            input: InputState::new(),
            keytab: KeyTable::with_defaults(),
            explorer_keys: KeyTable::explorer_defaults(),
            commands: CommandRegistry::with_defaults(),
            syntax,
            fs,
            prompt: PromptState::default(),
            config,
            running: true,
        }
    }

    /// Run the main editor loop
    pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        self.display.force_redraw();

        while self.running {
            self.window.set_height(text_height(terminal.rows()));
            self.display.render(
                terminal,
                &Frame {
                    buffer: &self.buffer,
                    window: &self.window,
                    explorer: &self.explorer,
                    focus: self.focus,
                    syntax: &self.syntax,
                    keytab: &self.keytab,
                    prompt_active: self.prompt.active,
                    tab_width: self.config.tab_width,
                },
            )?;

            let key_event = terminal.read_key()?;
            if terminal.take_resized() {
                self.display.force_redraw();
                continue;
            }

            if let Some(key) = self.input.translate_key(key_event) {
                self.handle_key(key)?;
            } else if self.input.is_ctlx_pending() {
                self.display.set_message("C-x -");
            } else if self.input.is_meta_pending() {
                self.display.set_message("ESC -");
            }

            if self.display.take_bell() {
                terminal.beep()?;
            }
        }

        Ok(())
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        if self.prompt.active {
            return self.handle_prompt_key(key);
        }

        self.display.clear_message();

        let name = match self.focus {
            Focus::Explorer => self
                .explorer_keys
                .lookup(key)
                .or_else(|| self.keytab.lookup(key)),
            Focus::Text => self.keytab.lookup(key),
        };

        if let Some(name) = name {
            if let Err(e) = self.execute(name) {
                self.fail(e);
            }
        } else if key.is_self_insert() && self.focus == Focus::Text {
            if let Some(ch) = key.base_char() {
                self.insert_char(ch);
            }
        } else {
            self.display.set_message(format!("{} is not bound", key.display_name()));
            self.display.bell();
        }

        Ok(())
    }

    /// Run a command by name
    pub fn execute(&mut self, name: &str) -> Result<CommandStatus> {
        let function = self
            .commands
            .get(name)
            .ok_or_else(|| EditorError::UnknownCommand(name.to_string()))?;

        let status = function(self)?;
        match status {
            CommandStatus::Success => {}
            CommandStatus::Failure => {
                log::debug!("{} failed", name);
                self.display.bell();
            }
            CommandStatus::Abort => {
                self.display.set_message("Quit");
                self.display.bell();
            }
        }
        Ok(status)
    }

    /// Report a failed operation in the message line
    pub fn fail(&mut self, err: EditorError) -> CommandStatus {
        log::warn!("{}", err);
        self.display.set_message(err.to_string());
        self.display.bell();
        CommandStatus::Failure
    }

    // --- cursor and editing ---

    fn tab_width(&self) -> usize {
        self.config.tab_width
    }

    fn current_line_len(&self) -> usize {
        self.buffer
            .line(self.window.cursor_line())
            .map(|l| l.len())
            .unwrap_or(0)
    }

    /// Remember the cursor's display column for vertical movement
    fn update_goal_col(&mut self) {
        let col = self
            .buffer
            .line(self.window.cursor_line())
            .map(|l| l.byte_to_col(self.window.cursor_col(), self.config.tab_width))
            .unwrap_or(0);
        self.window.set_goal_col(col);
    }

    /// Place the cursor on `line` at the goal column
    fn move_to_line(&mut self, line: usize) {
        let tab_width = self.tab_width();
        let col = self
            .buffer
            .line(line)
            .map(|l| l.col_to_byte(self.window.goal_col(), tab_width))
            .unwrap_or(0);
        self.window.set_cursor(line, col);
        self.window.ensure_cursor_visible();
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        let line = self.window.cursor_line();
        let col = self.window.cursor_col();
        self.buffer.insert_char(line, col, ch);
        self.window.set_cursor(line, col + ch.len_utf8());
        self.update_goal_col();
    }

    /// Insert `tab-width` spaces at cursor
    pub fn insert_tab(&mut self) {
        let line = self.window.cursor_line();
        let col = self.window.cursor_col();
        let spaces = " ".repeat(self.tab_width());
        self.buffer.insert_str(line, col, &spaces);
        self.window.set_cursor(line, col + spaces.len());
        self.update_goal_col();
    }

    /// Split the line at cursor
    pub fn insert_newline(&mut self) {
        let line = self.window.cursor_line();
        self.buffer.insert_newline(line, self.window.cursor_col());
        self.window.set_cursor(line + 1, 0);
        self.window.set_goal_col(0);
        self.window.ensure_cursor_visible();
    }

    /// Delete forward; false at the end of the buffer
    pub fn delete_forward(&mut self) -> bool {
        self.buffer
            .delete_char(self.window.cursor_line(), self.window.cursor_col())
    }

    /// Delete backward; false at the start of the buffer
    pub fn delete_backward(&mut self) -> bool {
        match self
            .buffer
            .delete_backward(self.window.cursor_line(), self.window.cursor_col())
        {
            Some((line, col)) => {
                self.window.set_cursor(line, col);
                self.window.ensure_cursor_visible();
                self.update_goal_col();
                true
            }
            None => false,
        }
    }

    /// Move cursor right, wrapping to the next line
    pub fn move_cursor_right(&mut self) -> bool {
        let line = self.window.cursor_line();
        let col = self.window.cursor_col();
        let next = self.buffer.line(line).and_then(|l| l.next_boundary(col));
        match next {
            Some(next) => self.window.set_cursor(line, next),
            None if line + 1 < self.buffer.line_count() => self.window.set_cursor(line + 1, 0),
            None => return false,
        }
        self.window.ensure_cursor_visible();
        self.update_goal_col();
        true
    }

    /// Move cursor left, wrapping to the end of the previous line
    pub fn move_cursor_left(&mut self) -> bool {
        let line = self.window.cursor_line();
        let col = self.window.cursor_col();
        let prev = self.buffer.line(line).and_then(|l| l.prev_boundary(col));
        match prev {
            Some(prev) => self.window.set_cursor(line, prev),
            None if line > 0 => {
                let len = self.buffer.line(line - 1).map(|l| l.len()).unwrap_or(0);
                self.window.set_cursor(line - 1, len);
            }
            None => return false,
        }
        self.window.ensure_cursor_visible();
        self.update_goal_col();
        true
    }

    pub fn move_cursor_down(&mut self) -> bool {
        let line = self.window.cursor_line();
        if line + 1 >= self.buffer.line_count() {
            return false;
        }
        self.move_to_line(line + 1);
        true
    }

    pub fn move_cursor_up(&mut self) -> bool {
        let line = self.window.cursor_line();
        if line == 0 {
            return false;
        }
        self.move_to_line(line - 1);
        true
    }

    pub fn move_to_bol(&mut self) {
        self.window.set_cursor(self.window.cursor_line(), 0);
        self.window.set_goal_col(0);
    }

    pub fn move_to_eol(&mut self) {
        let len = self.current_line_len();
        self.window.set_cursor(self.window.cursor_line(), len);
        self.update_goal_col();
    }

    pub fn page_down(&mut self) {
        let page = (self.window.height() as usize).saturating_sub(2).max(1);
        self.window.scroll_down(page, self.buffer.line_count());
        let top = self.window.top_line();
        self.move_to_line(top);
    }

    pub fn page_up(&mut self) {
        let page = (self.window.height() as usize).saturating_sub(2).max(1);
        self.window.scroll_up(page);
        let top = self.window.top_line();
        self.move_to_line(top);
    }

    pub fn move_to_buffer_start(&mut self) {
        self.window.set_cursor(0, 0);
        self.window.set_goal_col(0);
        self.window.ensure_cursor_visible();
    }

    pub fn move_to_buffer_end(&mut self) {
        let last = self.buffer.line_count().saturating_sub(1);
        let len = self.buffer.line(last).map(|l| l.len()).unwrap_or(0);
        self.window.set_cursor(last, len);
        self.window.ensure_cursor_visible();
        self.update_goal_col();
    }

    // --- prompts ---

    /// Start a minibuffer prompt
    pub fn start_prompt(&mut self, prompt: &str, action: PromptAction, default: Option<String>) {
        self.prompt = PromptState {
            active: true,
            prompt: prompt.to_string(),
            input: String::new(),
            action,
            default,
        };
        self.update_prompt_display();
    }

    /// Ask a yes/no question; `confirm` runs on `y`
    pub fn ask(&mut self, question: &str, confirm: Confirm) {
        self.start_prompt(question, PromptAction::Confirm(confirm), None);
    }

    fn update_prompt_display(&mut self) {
        let text = match (&self.prompt.action, &self.prompt.default) {
            (PromptAction::Confirm(_), _) => format!("{} (y or n) ", self.prompt.prompt),
            (_, Some(def)) if self.prompt.input.is_empty() => {
                format!("{} (default {}): ", self.prompt.prompt, def)
            }
            _ => format!("{}: {}", self.prompt.prompt, self.prompt.input),
        };
        self.display.set_message(text);
    }

    fn cancel_prompt(&mut self) {
        self.prompt = PromptState::default();
        self.display.set_message("Quit");
    }

    /// Handle key press during prompt mode
    fn handle_prompt_key(&mut self, key: Key) -> Result<()> {
        if key == Key::ctrl('g') {
            self.cancel_prompt();
            return Ok(());
        }

        if let PromptAction::Confirm(confirm) = self.prompt.action.clone() {
            let answer = if key.is_self_insert() { key.base_char() } else { None };
            match answer {
                Some('y') | Some('Y') => {
                    self.prompt = PromptState::default();
                    self.display.clear_message();
                    self.confirmed(confirm);
                }
                Some('n') | Some('N') => self.cancel_prompt(),
                _ => {
                    self.display.bell();
                    self.update_prompt_display();
                }
            }
            return Ok(());
        }

        if key == Key::ENTER {
            let input = if self.prompt.input.is_empty() {
                self.prompt.default.clone().unwrap_or_default()
            } else {
                self.prompt.input.clone()
            };
            let action = std::mem::take(&mut self.prompt.action);
            self.prompt = PromptState::default();
            self.display.clear_message();
            self.complete_prompt(action, input);
            return Ok(());
        }

        if key == Key::BACKSPACE || key == Key::ctrl('h') {
            self.prompt.input.pop();
            self.update_prompt_display();
            return Ok(());
        }

        if key.is_self_insert() {
            if let Some(ch) = key.base_char() {
                self.prompt.input.push(ch);
            }
        } else {
            self.display.bell();
        }
        self.update_prompt_display();
        Ok(())
    }

    /// Complete a prompt action
    fn complete_prompt(&mut self, action: PromptAction, input: String) {
        let input = input.trim();
        let needs_name = !matches!(action, PromptAction::None | PromptAction::Confirm(_));
        if needs_name && input.is_empty() {
            self.fail(EditorError::NoFileName);
            return;
        }

        match action {
            PromptAction::OpenFile => {
                let path = self.resolve_path(input);
                self.open_or_confirm(path);
            }
            PromptAction::SaveAs => {
                let path = self.resolve_path(input);
                self.save_to(path);
            }
            PromptAction::RenameFile(from) => {
                let dir = from.parent().map(Path::to_path_buf).unwrap_or_default();
                self.rename_path(&from, dir.join(input));
            }
            PromptAction::CreateFile(dir) => {
                self.create_file_in(dir.join(input));
            }
            PromptAction::CreateDirectory(dir) => {
                self.create_directory_in(dir.join(input));
            }
            PromptAction::ExecuteCommand => {
                if let Err(e) = self.execute(input) {
                    self.fail(e);
                }
            }
            PromptAction::Confirm(confirm) => self.confirmed(confirm),
            PromptAction::None => {}
        }
    }

    /// Run the action behind a `y` answer
    fn confirmed(&mut self, confirm: Confirm) {
        match confirm {
            Confirm::NewFile => self.new_buffer(),
            Confirm::OpenFile(path) | Confirm::Revert(path) => {
                self.open_path(&path);
            }
            Confirm::Delete(path) => {
                self.delete_path(&path);
            }
            Confirm::Quit => self.running = false,
        }
    }

    // --- file operations ---

    /// Relative paths resolve against the explorer root
    pub fn resolve_path(&self, input: impl AsRef<Path>) -> PathBuf {
        let path = input.as_ref().to_path_buf();
        if path.is_absolute() {
            path
        } else {
            self.explorer.root().join(path)
        }
    }

    /// The file a rename or delete applies to: the explorer selection while
    /// the explorer has focus, else the buffer's file
    pub fn file_target(&self) -> Option<PathBuf> {
        match self.focus {
            Focus::Explorer => self.explorer.selected().map(|e| e.path.clone()),
            Focus::Text => self.buffer.filename().map(Path::to_path_buf),
        }
    }

    pub fn refresh_explorer(&mut self) {
        if let Err(e) = self.explorer.refresh(self.fs.as_ref()) {
            self.fail(e);
        }
    }

    /// Replace the buffer with an empty untitled one
    pub fn new_buffer(&mut self) {
        self.buffer = Buffer::new();
        self.window.reset();
        self.focus = Focus::Text;
        self.display.force_redraw();
        self.display.set_message("New buffer");
    }

    /// Open `path`, asking first if the buffer has unsaved changes
    pub fn open_or_confirm(&mut self, path: PathBuf) -> CommandStatus {
        if !self.fs.exists(&path) {
            return self.fail(EditorError::FileNotFound(path));
        }
        if self.buffer.is_modified() {
            self.ask("Discard changes?", Confirm::OpenFile(path));
            CommandStatus::Success
        } else {
            self.open_path(&path)
        }
    }

    /// Replace the buffer with the contents of `path`
    pub fn open_path(&mut self, path: &Path) -> CommandStatus {
        // Explorer entries are absolute; the buffer's path must match them
        let path = &self.resolve_path(path);
        let text = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(e) => return self.fail(e),
        };

        let mut buffer = Buffer::from_text(&text);
        buffer.set_language(self.syntax.detect_language(path).map(str::to_string));
        buffer.set_filename(Some(path.to_path_buf()));
        self.buffer = buffer;
        self.window.reset();
        self.focus = Focus::Text;
        self.explorer.select_path(path);
        self.display.force_redraw();
        self.display.set_message(format!("Opened {}", path.display()));
        log::info!("opened {}", path.display());
        CommandStatus::Success
    }

    /// Write the buffer to `path` and adopt it as the buffer's file
    pub fn save_to(&mut self, path: PathBuf) -> CommandStatus {
        let path = self.resolve_path(path);
        if let Err(e) = self.fs.write(&path, &self.buffer.to_text()) {
            return self.fail(e);
        }

        let language = self.syntax.detect_language(&path).map(str::to_string);
        let lines = self.buffer.line_count();
        self.buffer.set_language(language);
        self.buffer.set_filename(Some(path.clone()));
        self.buffer.set_modified(false);
        self.refresh_explorer();
        self.display
            .set_message(format!("Wrote {} lines to {}", lines, path.display()));
        CommandStatus::Success
    }

    /// Rename `from` to `to`, following the buffer's file if it moved
    pub fn rename_path(&mut self, from: &Path, to: PathBuf) -> CommandStatus {
        if let Err(e) = self.fs.rename(from, &to) {
            return self.fail(e);
        }

        if let Some(current) = self.buffer.filename().map(Path::to_path_buf) {
            if let Ok(rest) = current.strip_prefix(from) {
                let renamed = if rest.as_os_str().is_empty() {
                    to.clone()
                } else {
                    to.join(rest)
                };
                let language = self.syntax.detect_language(&renamed).map(str::to_string);
                self.buffer.set_language(language);
                self.buffer.set_filename(Some(renamed));
            }
        }

        self.refresh_explorer();
        self.explorer.select_path(&to);
        self.display
            .set_message(format!("Renamed {} to {}", from.display(), to.display()));
        CommandStatus::Success
    }

    /// Delete `path`; a buffer showing it loses its file and counts as modified
    pub fn delete_path(&mut self, path: &Path) -> CommandStatus {
        if let Err(e) = self.fs.delete(path) {
            return self.fail(e);
        }

        if self.buffer.filename().is_some_and(|p| p.starts_with(path)) {
            self.buffer.set_filename(None);
            self.buffer.set_modified(true);
        }

        self.refresh_explorer();
        self.display.set_message(format!("Deleted {}", path.display()));
        CommandStatus::Success
    }

    /// Create an empty file and open it
    pub fn create_file_in(&mut self, path: PathBuf) -> CommandStatus {
        if let Err(e) = self.fs.create_file(&path) {
            return self.fail(e);
        }
        self.refresh_explorer();
        self.explorer.select_path(&path);
        self.open_or_confirm(path)
    }

    pub fn create_directory_in(&mut self, path: PathBuf) -> CommandStatus {
        if let Err(e) = self.fs.create_dir(&path) {
            return self.fail(e);
        }
        self.refresh_explorer();
        self.explorer.select_path(&path);
        self.display
            .set_message(format!("Created directory {}", path.display()));
        CommandStatus::Success
    }
}
