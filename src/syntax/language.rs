//! Language definitions for syntax highlighting
//!
//! A language is a name, the file extensions it claims and its rule table.

use super::formatter::{format_line, resolve};
use super::rules::Rule;
use super::style::Span;

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name (e.g., "HTML", "Python")
    pub name: String,
    /// File extensions without the dot, lower case
    pub extensions: Vec<String>,
    /// Rule table, in application order
    rules: Vec<Rule>,
}

impl LanguageDefinition {
    pub fn new(name: &str, extensions: &[&str], rules: Vec<Rule>) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
            rules,
        }
    }

    /// Spans of one line in application order
    pub fn format(&self, line: &str) -> Vec<Span> {
        format_line(line, &self.rules)
    }

    /// Display-ready, non-overlapping runs of one line
    pub fn highlight_line(&self, line: &str) -> Vec<Span> {
        resolve(line.len(), &self.format(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::theme::Theme;
    use crate::syntax::tokens::TokenType;

    fn create_test_language() -> LanguageDefinition {
        let theme = Theme::default();
        let rules = vec![
            Rule::new("number", r"\b\d+\b", TokenType::Number, &theme).unwrap(),
            Rule::new("comment", r"#.*$", TokenType::Comment, &theme).unwrap(),
        ];
        LanguageDefinition::new("Test", &["TST"], rules)
    }

    #[test]
    fn test_extensions_are_lowercased() {
        let lang = create_test_language();
        assert_eq!(lang.extensions, vec!["tst".to_string()]);
        assert_eq!(lang.format("1 # 2").len(), 3);
    }

    #[test]
    fn test_simple_highlighting() {
        let lang = create_test_language();
        let runs = lang.highlight_line("x = 42");
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].start, runs[0].end()), (4, 6));
    }

    #[test]
    fn test_comment_overrides_number() {
        let lang = create_test_language();
        assert_eq!(lang.format("a # 7").len(), 2);
        let runs = lang.highlight_line("a # 7");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].token, TokenType::Comment);
        assert_eq!((runs[0].start, runs[0].length), (2, 3));
    }
}
