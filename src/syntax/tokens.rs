//! Token types for syntax highlighting
//!
//! This module defines the lexical categories the builtin rule tables
//! recognize and their default visual styles.

use super::style::{Color, Style};

/// Lexical categories for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Character entity references (`&amp;`)
    Entity,
    /// Opening tags, including their attributes (`<div class="a">`)
    OpenTag,
    /// Closing tags (`</div>`)
    CloseTag,
    /// Attribute names followed by `=`
    Attribute,
    /// Quoted attribute values
    Value,
    /// Comments (`<!-- -->`, `# ...`)
    Comment,
    /// Language keywords
    Keyword,
    /// Builtin functions and types
    Builtin,
    /// String literals
    String,
    /// Numeric literals
    Number,
    /// Decorators (`@property`)
    Decorator,
    /// Plain text
    Default,
}

impl TokenType {
    /// All token types, in declaration order
    pub const ALL: [TokenType; 12] = [
        TokenType::Entity,
        TokenType::OpenTag,
        TokenType::CloseTag,
        TokenType::Attribute,
        TokenType::Value,
        TokenType::Comment,
        TokenType::Keyword,
        TokenType::Builtin,
        TokenType::String,
        TokenType::Number,
        TokenType::Decorator,
        TokenType::Default,
    ];

    /// Get the default style for this token type
    pub fn default_style(&self) -> Style {
        match self {
            TokenType::Entity => Style::fg(Color::Red).with_bold(),
            TokenType::OpenTag => Style::fg(Color::Magenta).with_bold(),
            TokenType::CloseTag => Style::fg(Color::Magenta).with_bold(),
            TokenType::Attribute => Style::fg(Color::Cyan),
            TokenType::Value => Style::fg(Color::Green),
            TokenType::Comment => Style::fg(Color::BrightBlack),
            TokenType::Keyword => Style::fg(Color::Blue).with_bold(),
            TokenType::Builtin => Style::fg(Color::Cyan),
            TokenType::String => Style::fg(Color::Green),
            TokenType::Number => Style::fg(Color::Yellow),
            TokenType::Decorator => Style::fg(Color::BrightMagenta),
            TokenType::Default => Style::default(),
        }
    }

    /// Name used in the `[styles]` table of the config file
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Entity => "entity",
            TokenType::OpenTag => "open-tag",
            TokenType::CloseTag => "close-tag",
            TokenType::Attribute => "attribute",
            TokenType::Value => "value",
            TokenType::Comment => "comment",
            TokenType::Keyword => "keyword",
            TokenType::Builtin => "builtin",
            TokenType::String => "string",
            TokenType::Number => "number",
            TokenType::Decorator => "decorator",
            TokenType::Default => "default",
        }
    }

    /// Parse a token type from its config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}
