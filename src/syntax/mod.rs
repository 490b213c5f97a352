//! Syntax and styling module
//!
//! This module provides the rule tables, the line formatter and the style
//! types the display uses to paint highlighted text.

mod style;
mod tokens;
mod theme;
mod rules;
mod formatter;
mod language;
mod manager;
mod builtin;

pub use style::{Color, Span, Style};
pub use tokens::TokenType;
pub use theme::Theme;
pub use manager::SyntaxManager;
