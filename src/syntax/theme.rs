//! Style overrides for token types
//!
//! A theme is built from the `[styles]` table of the config file and is
//! consulted once, when the rule tables are built.

use std::collections::HashMap;

use crate::error::{EditorError, Result};
use super::style::{Color, Style};
use super::tokens::TokenType;

/// Per-token style overrides on top of `TokenType::default_style`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    overrides: HashMap<TokenType, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the style of one token type
    pub fn set(&mut self, token: TokenType, style: Style) {
        self.overrides.insert(token, style);
    }

    /// Style to use for a token type
    pub fn style_for(&self, token: TokenType) -> Style {
        self.overrides
            .get(&token)
            .copied()
            .unwrap_or_else(|| token.default_style())
    }

    /// Build a theme from `(token name, style string)` pairs
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut theme = Self::new();
        for (name, desc) in entries {
            let token = TokenType::from_name(name)
                .ok_or_else(|| EditorError::Config(format!("unknown token type `{}`", name)))?;
            theme.set(token, parse_style(desc)?);
        }
        Ok(theme)
    }
}

/// Parse a style string such as `"magenta bold"` or `"white on blue underline"`.
///
/// The first color is the foreground; a color after `on` is the background.
pub fn parse_style(desc: &str) -> Result<Style> {
    let mut style = Style::default();
    let mut words = desc.split_whitespace();
    let mut seen_fg = false;

    while let Some(word) = words.next() {
        match word.to_ascii_lowercase().as_str() {
            "bold" => style = style.with_bold(),
            "italic" => style = style.with_italic(),
            "underline" => style = style.with_underline(),
            "reverse" => style.reverse = true,
            "on" => {
                let bg = words
                    .next()
                    .and_then(Color::from_name)
                    .ok_or_else(|| EditorError::Config(format!("expected a color after `on` in `{}`", desc)))?;
                style = style.with_bg(bg);
            }
            other => match Color::from_name(other) {
                Some(color) if !seen_fg => {
                    style.fg = color;
                    seen_fg = true;
                }
                Some(_) => {
                    return Err(EditorError::Config(format!("more than one foreground color in `{}`", desc)));
                }
                None => {
                    return Err(EditorError::Config(format!("unknown style attribute `{}`", word)));
                }
            },
        }
    }

    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style() {
        assert_eq!(parse_style("magenta bold").unwrap(), Style::fg(Color::Magenta).with_bold());
        assert_eq!(
            parse_style("white on blue underline").unwrap(),
            Style::fg(Color::White).with_bg(Color::Blue).with_underline()
        );
        assert!(parse_style("").unwrap().is_default());
    }

    #[test]
    fn test_parse_style_errors() {
        assert!(parse_style("sparkly").is_err());
        assert!(parse_style("red on").is_err());
        assert!(parse_style("red green").is_err());
    }

    #[test]
    fn test_theme_overrides() {
        let theme = Theme::from_entries([("comment", "yellow italic")]).unwrap();
        assert_eq!(theme.style_for(TokenType::Comment), Style::fg(Color::Yellow).with_italic());
        assert_eq!(theme.style_for(TokenType::Entity), TokenType::Entity.default_style());
    }

    #[test]
    fn test_theme_unknown_token() {
        assert!(Theme::from_entries([("tag", "red")]).is_err());
    }
}
