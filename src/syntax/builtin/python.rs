//! Python language definition

use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::Rule;
use crate::syntax::theme::Theme;
use crate::syntax::tokens::TokenType;

const KEYWORDS: &str = r"\b(False|None|True|and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b";

const BUILTINS: &str = r"\b(abs|all|any|bool|bytes|callable|chr|dict|dir|enumerate|filter|float|format|frozenset|getattr|hasattr|hash|id|input|int|isinstance|issubclass|iter|len|list|map|max|min|next|object|open|ord|print|range|repr|reversed|round|set|setattr|slice|sorted|str|sum|super|tuple|type|zip)\b";

/// Create the Python language definition.
///
/// Strings are applied after numbers and keywords so quoted text is painted
/// as a string; comments are applied last.
pub fn python_language(theme: &Theme) -> Result<LanguageDefinition> {
    let rules = vec![
        Rule::new("keyword", KEYWORDS, TokenType::Keyword, theme)?,
        Rule::new("builtin", BUILTINS, TokenType::Builtin, theme)?,
        Rule::new(
            "number",
            r"\b(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?[jJ]?)\b",
            TokenType::Number,
            theme,
        )?,
        Rule::new("decorator", r"^\s*@[\w.]+", TokenType::Decorator, theme)?,
        Rule::new("double_string", r#""(?:[^"\\]|\\.)*""#, TokenType::String, theme)?,
        Rule::new("single_string", r"'(?:[^'\\]|\\.)*'", TokenType::String, theme)?,
        Rule::new("comment", r"#.*$", TokenType::Comment, theme)?,
    ];

    Ok(LanguageDefinition::new("Python", &["py", "pyw", "pyi"], rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python() -> LanguageDefinition {
        python_language(&Theme::default()).unwrap()
    }

    #[test]
    fn test_python_keywords() {
        let runs = python().highlight_line("def f(x): return x");
        let keywords: Vec<_> = runs.iter().filter(|s| s.token == TokenType::Keyword).collect();
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].start, 0);
        assert_eq!(keywords[1].start, 10);
    }

    #[test]
    fn test_python_string_repaints_keyword() {
        let runs = python().highlight_line(r#"x = "if \"in\" else""#);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].token, TokenType::String);
        assert_eq!(runs[0].start, 4);
        assert_eq!(runs[0].end(), 20);
    }

    #[test]
    fn test_python_numbers() {
        let lang = python();
        for literal in ["42", "0xFF", "3.14", "1e10", "0b1010", "2j"] {
            let line = format!("x = {}", literal);
            let runs = lang.highlight_line(&line);
            assert_eq!(runs.len(), 1, "literal {}", literal);
            assert_eq!(runs[0].token, TokenType::Number);
            assert_eq!(runs[0].length, literal.len(), "literal {}", literal);
        }
    }

    #[test]
    fn test_python_comment() {
        let runs = python().highlight_line("    # return len(x)");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].token, TokenType::Comment);
        assert_eq!(runs[0].start, 4);
    }

    #[test]
    fn test_python_decorator() {
        let runs = python().highlight_line("    @functools.wraps(f)");
        assert_eq!(runs[0].token, TokenType::Decorator);
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[0].end(), 20);
    }

    #[test]
    fn test_identifier_containing_keyword() {
        assert!(python().format("classify = iffy").is_empty());
    }
}
