//! Built-in language definitions

mod html;
mod python;

use crate::error::Result;
use super::language::LanguageDefinition;
use super::theme::Theme;

/// Build all built-in language definitions
pub fn all_languages(theme: &Theme) -> Result<Vec<LanguageDefinition>> {
    Ok(vec![html::html_language(theme)?, python::python_language(theme)?])
}
