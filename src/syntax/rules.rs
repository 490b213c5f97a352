//! Pattern rules for syntax highlighting
//!
//! A rule pairs a compiled regex with the lexical category it detects and
//! the style its matches are painted with. Rules are immutable once built.

use regex::{Match, Regex};

use crate::error::{EditorError, Result};
use super::style::Style;
use super::theme::Theme;
use super::tokens::TokenType;

/// A single-line pattern rule
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    token: TokenType,
    style: Style,
}

impl Rule {
    /// Compile a rule, styling it from `theme`.
    ///
    /// Patterns are part of the program, so a compile error here is a
    /// defect that surfaces at startup when the rule table is built.
    pub fn new(name: &str, pattern: &str, token: TokenType, theme: &Theme) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| EditorError::InvalidPattern {
            rule: name.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            token,
            style: theme.style_for(token),
        })
    }

    pub fn token(&self) -> TokenType {
        self.token
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Find the leftmost match at or after `start`.
    ///
    /// The search sees the whole line, so `\b` and `^` behave as they would
    /// for a match starting at offset 0.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<Match<'t>> {
        if start > text.len() {
            return None;
        }
        self.pattern.find_at(text, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_rule() -> Rule {
        Rule::new("number", r"\d+", TokenType::Number, &Theme::default()).unwrap()
    }

    #[test]
    fn test_find_at() {
        let rule = number_rule();
        let m = rule.find_at("abc 123 def", 0).unwrap();
        assert_eq!((m.start(), m.end()), (4, 7));
        let m = rule.find_at("abc 123 def", 5).unwrap();
        assert_eq!((m.start(), m.end()), (5, 7));
        assert!(rule.find_at("no numbers", 0).is_none());
        assert!(rule.find_at("123", 4).is_none());
    }

    #[test]
    fn test_find_at_sees_word_boundary_context() {
        let rule = Rule::new("word", r"\bcd", TokenType::Keyword, &Theme::default()).unwrap();
        // "cd" at offset 2 is preceded by 'b', so it is not at a word boundary
        assert!(rule.find_at("abcd", 2).is_none());
        assert!(rule.find_at("ab cd", 2).is_some());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rule::new("broken", r"(unclosed", TokenType::Default, &Theme::default()).unwrap_err();
        assert!(matches!(err, EditorError::InvalidPattern { ref rule, .. } if rule == "broken"));
    }

    #[test]
    fn test_style_comes_from_theme() {
        let rule = number_rule();
        assert_eq!(rule.token(), TokenType::Number);
        assert_eq!(rule.style(), TokenType::Number.default_style());
    }
}
