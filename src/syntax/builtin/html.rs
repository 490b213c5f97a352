//! HTML language definition

use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::Rule;
use crate::syntax::theme::Theme;
use crate::syntax::tokens::TokenType;

/// Create the HTML language definition.
///
/// Order matters: comments come last so they repaint anything an earlier
/// rule found inside `<!-- ... -->`.
pub fn html_language(theme: &Theme) -> Result<LanguageDefinition> {
    let rules = vec![
        Rule::new("entity", r"&[a-zA-Z0-9]+;", TokenType::Entity, theme)?,
        Rule::new(
            "open_tag",
            r#"<\s*\b[a-zA-Z0-9_]+\b(?:[^>"]*"[^"]*")*[^>]*\s*>"#,
            TokenType::OpenTag,
            theme,
        )?,
        Rule::new("close_tag", r"</\s*\b[a-zA-Z0-9_]+\b\s*>", TokenType::CloseTag, theme)?,
        Rule::new("attribute", r"\b[a-zA-Z0-9_]+\s*=", TokenType::Attribute, theme)?,
        Rule::new("double_quoted", r#"".*?""#, TokenType::Value, theme)?,
        Rule::new("single_quoted", r"'.*?'", TokenType::Value, theme)?,
        Rule::new("comment", r"<!--.*?-->", TokenType::Comment, theme)?,
    ];

    Ok(LanguageDefinition::new("HTML", &["html", "htm", "xhtml"], rules))
}
