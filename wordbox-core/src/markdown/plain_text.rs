//! Markup stripping for the search index.
//!
//! Works on the raw markdown, not the rendered HTML. The passes are applied
//! in a fixed order: block delimiters first, then inline markers, then any
//! leftover tags, then whitespace.

use regex::Regex;
use std::sync::OnceLock;

struct Rule {
    pattern: &'static str,
    replacement: &'static str,
}

const RULES: &[Rule] = &[
    // code fences keep their contents
    Rule { pattern: r"```(\w+)?\n", replacement: "" },
    Rule { pattern: r"```", replacement: "" },
    // card blocks go entirely
    Rule { pattern: r"(?s):::(?:bookmark|article|magazine|dictionary)\n.*?:::", replacement: "" },
    Rule { pattern: r"(?m)^> \[![A-Za-z]+\][ \t]*$", replacement: "" },
    Rule { pattern: r"!\[([^\]]*)\]\([^)]*\)", replacement: "${1}" },
    Rule { pattern: r"\[([^\]]*)\]\([^)]*\)", replacement: "${1}" },
    Rule { pattern: r"(?m)^#{1,6}\s+", replacement: "" },
    Rule { pattern: r"\n[-*_]{3,}\n", replacement: "\n" },
    Rule { pattern: r"\*\*(.*?)\*\*", replacement: "${1}" },
    Rule { pattern: r"__(.*?)__", replacement: "${1}" },
    Rule { pattern: r"\*(.*?)\*", replacement: "${1}" },
    Rule { pattern: r"_(.*?)_", replacement: "${1}" },
    Rule { pattern: r"~~(.*?)~~", replacement: "${1}" },
    Rule { pattern: r"\+\+(.*?)\+\+", replacement: "${1}" },
    Rule { pattern: r"`([^`]+)`", replacement: "${1}" },
    Rule { pattern: r"(?m)^>\s+", replacement: "" },
    Rule { pattern: r"(?m)^[ \t-]*[-+*]\s+", replacement: "" },
    Rule { pattern: r"(?m)^\s*\d+\.\s+", replacement: "" },
    Rule { pattern: r"<[^>]*>", replacement: "" },
];

fn compiled_rules() -> &'static [(Regex, &'static str)] {
    static RULE_SET: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULE_SET.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| (Regex::new(rule.pattern).expect("valid regex"), rule.replacement))
            .collect()
    })
}

/// Human-readable text of a markdown body, whitespace-collapsed and trimmed
pub fn extract_plain_text(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    let stripped = compiled_rules()
        .iter()
        .fold(normalized, |text, (regex, replacement)| {
            regex.replace_all(&text, *replacement).into_owned()
        });
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
