//! Error types for codepad

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for codepad operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("No file name")]
    NoFileName,

    #[error("Invalid pattern in rule `{rule}`: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("No such command: {0}")]
    UnknownCommand(String),

    #[error("{0}")]
    Message(String),
}
