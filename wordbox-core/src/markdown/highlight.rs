//! Code syntax highlighting using syntect.
//!
//! The renderer only sees the [`Highlighter`] trait; it wraps whatever comes
//! back in its own `<pre><code>` markup.

use super::html_escape;
use std::sync::OnceLock;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Prefix for the CSS classes on highlighted spans (`hl-keyword`, ...)
pub const HIGHLIGHT_CLASS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: HIGHLIGHT_CLASS_PREFIX,
};

/// Theme used for the stylesheet when none is configured
pub const DEFAULT_THEME: &str = "InspiredGitHub";

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Turns a code string into HTML for the inside of a `<code>` element.
///
/// Implementations must never fail: unsupported languages and internal
/// errors come back as escaped plain text.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: &str) -> String;
}

/// Highlighter that only escapes
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> String {
        html_escape(code)
    }
}

/// Class-based highlighting with syntect's bundled grammars
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self
    }

    fn find_syntax(&self, language: &str) -> Option<&'static SyntaxReference> {
        let lang = language.trim().to_lowercase();
        if lang.is_empty() || lang == "text" || lang == "plain" {
            return None;
        }

        let token = match lang.as_str() {
            "javascript" => "js",
            "typescript" => "ts",
            "shell" | "zsh" => "sh",
            "c++" => "cpp",
            "csharp" => "cs",
            "objectivec" | "objc" => "m",
            "markdown" => "md",
            other => other,
        };

        let ss = syntax_set();
        ss.find_syntax_by_token(token)
            .or_else(|| ss.find_syntax_by_extension(token))
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> String {
        let Some(syntax) = self.find_syntax(language) else {
            tracing::debug!("No grammar for language `{}`, emitting plain code", language);
            return html_escape(code);
        };

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set(), CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting `{}` failed: {}", language, e);
                return html_escape(code);
            }
        }
        generator.finalize()
    }
}

/// CSS for the highlight classes in the named theme.
///
/// Falls back to [`DEFAULT_THEME`] when the name is unknown; `None` only if
/// syntect cannot produce the stylesheet at all.
pub fn stylesheet(theme_name: &str) -> Option<String> {
    let themes = &theme_set().themes;
    let theme = themes.get(theme_name).or_else(|| {
        tracing::warn!("Unknown theme `{}`, using {}", theme_name, DEFAULT_THEME);
        themes.get(DEFAULT_THEME)
    })?;
    css_for_theme_with_class_style(theme, CLASS_STYLE).ok()
}
