//! Syntax highlighting manager
//!
//! Owns the language definitions, maps file names to languages and
//! formats lines on request. Nothing is cached: every call formats the exact
//! text it is given.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use super::builtin;
use super::language::LanguageDefinition;
use super::style::Span;
use super::theme::Theme;

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Loaded language definitions
    languages: Vec<LanguageDefinition>,
    /// Extension to index into `languages`
    extension_map: HashMap<String, usize>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a manager with the built-in languages styled by `theme`
    pub fn new(theme: &Theme) -> Result<Self> {
        let mut manager = Self {
            languages: Vec::new(),
            extension_map: HashMap::new(),
            enabled: true,
        };

        for lang in builtin::all_languages(theme)? {
            manager.add_language(lang);
        }

        Ok(manager)
    }

    /// Add a language definition, replacing one with the same name
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let idx = match self.languages.iter().position(|l| l.name == lang.name) {
            Some(idx) => {
                self.extension_map.retain(|_, v| *v != idx);
                self.languages[idx] = lang;
                idx
            }
            None => {
                self.languages.push(lang);
                self.languages.len() - 1
            }
        };
        for ext in &self.languages[idx].extensions {
            self.extension_map.insert(ext.clone(), idx);
        }
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map
            .get(&ext)
            .map(|&idx| self.languages[idx].name.as_str())
    }

    /// Get a language definition by name
    pub fn get_language(&self, name: &str) -> Option<&LanguageDefinition> {
        self.languages.iter().find(|l| l.name == name)
    }

    /// Resolved runs for one line.
    ///
    /// Empty when highlighting is off or the language is unknown.
    pub fn highlight_line(&self, language: Option<&str>, text: &str) -> Vec<Span> {
        if !self.enabled {
            return Vec::new();
        }
        match language.and_then(|name| self.get_language(name)) {
            Some(lang) => lang.highlight_line(text),
            None => Vec::new(),
        }
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.iter().map(|l| l.name.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::Rule;
    use crate::syntax::tokens::TokenType;

    fn manager() -> SyntaxManager {
        SyntaxManager::new(&Theme::default()).unwrap()
    }

    const SAMPLES: &[&str] = &[
        "",
        "plain words only",
        r#"<div class="a" id='b'>&nbsp;text</div> <!-- note -->"#,
        "<a href=\"x\"><b>&lt;&gt;</b></a>",
        "\u{0}\u{1}\u{7f} <p>\t\r</p>",
        "<span title=\"héllo wörld 😀\">&eacute;</span>",
        "def f(x='y', *args): return 0x1F # done",
        "<<<>>>\"\"\"'''&&&;;;",
        "@decorator\nnot a real line",
    ];

    #[test]
    fn test_detect_language() {
        let manager = manager();
        assert_eq!(manager.detect_language(Path::new("index.html")), Some("HTML"));
        assert_eq!(manager.detect_language(Path::new("INDEX.HTM")), Some("HTML"));
        assert_eq!(manager.detect_language(Path::new("main.py")), Some("Python"));
        assert_eq!(manager.detect_language(Path::new("notes.txt")), None);
        assert_eq!(manager.detect_language(Path::new("no_extension")), None);
    }

    #[test]
    fn test_list_languages() {
        assert_eq!(manager().list_languages(), vec!["HTML", "Python"]);
    }

    #[test]
    fn test_highlight_line() {
        let mut manager = manager();
        assert!(!manager.highlight_line(Some("HTML"), "<p>").is_empty());
        assert!(manager.highlight_line(None, "<p>").is_empty());
        assert!(manager.highlight_line(Some("Cobol"), "<p>").is_empty());

        manager.toggle();
        assert!(manager.highlight_line(Some("HTML"), "<p>").is_empty());
        manager.toggle();
        assert!(manager.enabled);
    }

    #[test]
    fn test_add_language_replaces_by_name() {
        let mut manager = manager();
        let rule = Rule::new("word", r"\w+", TokenType::Keyword, &Theme::default()).unwrap();
        manager.add_language(LanguageDefinition::new("HTML", &["tpl"], vec![rule]));

        assert_eq!(manager.list_languages().len(), 2);
        assert_eq!(manager.detect_language(Path::new("a.tpl")), Some("HTML"));
        assert_eq!(manager.detect_language(Path::new("a.html")), None);
    }

    #[test]
    fn test_spans_stay_within_line() {
        let manager = manager();
        for lang in ["HTML", "Python"] {
            let def = manager.get_language(lang).unwrap();
            for line in SAMPLES {
                for span in def.format(line).iter().chain(def.highlight_line(line).iter()) {
                    assert!(span.length > 0, "{:?} on {:?}", span, line);
                    assert!(span.end() <= line.len(), "{:?} on {:?}", span, line);
                    assert!(line.is_char_boundary(span.start));
                    assert!(line.is_char_boundary(span.end()));
                }
            }
        }
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let manager = manager();
        let html = manager.get_language("HTML").unwrap();
        for line in SAMPLES {
            assert_eq!(html.format(line), html.format(line));
        }
    }

    #[test]
    fn test_long_line() {
        let manager = manager();
        let line = "<td class=\"c\">&amp;</td>".repeat(2_000);
        let runs = manager.highlight_line(Some("HTML"), &line);
        assert!(!runs.is_empty());
        assert!(runs.last().unwrap().end() <= line.len());
    }

    #[test]
    fn test_manager_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyntaxManager>();

        let manager = manager();
        let lines = ["<p>&amp;</p>", "<!-- x -->", "plain"];
        let sequential: Vec<_> = lines.iter().map(|l| manager.highlight_line(Some("HTML"), l)).collect();
        let manager = &manager;
        let parallel: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = lines
                .iter()
                .map(|l| s.spawn(move || manager.highlight_line(Some("HTML"), l)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(sequential, parallel);
    }
}
