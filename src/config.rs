//! Configuration file support
//!
//! Loads settings from ~/.codepad.toml (or %USERPROFILE%\.codepad.toml on
//! Windows), or from the file given with `--config`.
//!
//! Example:
//! ```text
//! # codepad configuration
//! tab-width = 4
//! line-numbers = true
//! explorer-width = 30
//! log-file = "/tmp/codepad.log"
//!
//! [styles]
//! comment = "bright-black italic"
//! open-tag = "blue bold"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use toml::{Table, Value};

use crate::error::{EditorError, Result};
use crate::syntax::Theme;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Spaces inserted by the tab key
    pub tab_width: usize,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Whether syntax highlighting starts enabled
    pub syntax_highlighting: bool,
    /// Whether the explorer panel starts visible
    pub show_explorer: bool,
    /// Explorer panel width in columns
    pub explorer_width: u16,
    /// Where to write the log, if anywhere
    pub log_file: Option<PathBuf>,
    /// Most verbose level written to the log
    pub log_level: LevelFilter,
    /// Style overrides from the `[styles]` table
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            show_line_numbers: false,
            syntax_highlighting: true,
            show_explorer: true,
            explorer_width: 28,
            log_file: None,
            log_level: LevelFilter::Info,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".codepad.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".codepad.toml"))
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default file may be missing, in
    /// which case the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Config::default()),
            },
        };

        let contents = fs::read_to_string(&path).map_err(|e| {
            EditorError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) -> Result<()> {
        for (key, value) in table {
            match key.as_str() {
                "tab-width" => self.tab_width = int_setting(key, value)?.clamp(1, 16) as usize,
                "line-numbers" => self.show_line_numbers = bool_setting(key, value)?,
                "syntax-highlighting" => self.syntax_highlighting = bool_setting(key, value)?,
                "explorer" => self.show_explorer = bool_setting(key, value)?,
                "explorer-width" => self.explorer_width = int_setting(key, value)?.clamp(10, 80) as u16,
                "log-file" => self.log_file = Some(PathBuf::from(str_setting(key, value)?)),
                "log-level" => {
                    let level = str_setting(key, value)?;
                    self.log_level = level
                        .parse()
                        .map_err(|_| EditorError::Config(format!("invalid log-level `{}`", level)))?;
                }
                "styles" => {
                    let styles = value
                        .as_table()
                        .ok_or_else(|| EditorError::Config("`styles` must be a table".to_string()))?;
                    let mut entries = Vec::new();
                    for (name, desc) in styles {
                        entries.push((name.as_str(), str_setting(name, desc)?));
                    }
                    self.theme = Theme::from_entries(entries)?;
                }
                other => {
                    return Err(EditorError::Config(format!("unknown setting `{}`", other)));
                }
            }
        }
        Ok(())
    }
}

fn bool_setting(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| EditorError::Config(format!("`{}` must be true or false", key)))
}

fn int_setting(key: &str, value: &Value) -> Result<i64> {
    value
        .as_integer()
        .ok_or_else(|| EditorError::Config(format!("`{}` must be an integer", key)))
}

fn str_setting<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| EditorError::Config(format!("`{}` must be a string", key)))
}
