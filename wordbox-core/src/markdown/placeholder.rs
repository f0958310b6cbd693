//! Out-of-band protection for fragments that are already HTML.
//!
//! Code blocks, cards, callouts and tables are rendered early and swapped for
//! an opaque token so that later text passes (emphasis, lists, paragraph
//! wrapping) cannot touch them. Tokens are delimited by Unicode
//! noncharacters, which are scrubbed from author input before rendering, so
//! a document can never spell a token by accident or on purpose.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

const OPEN: char = '\u{FDD0}';
const CLOSE: char = '\u{FDD1}';

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x{FDD0}(?P<scope>[^:\x{FDD0}\x{FDD1}]+):(?P<kind>[A-Z_]+):(?P<index>\d+)\x{FDD1}")
            .expect("valid regex")
    })
}

/// What a protected fragment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    CodeBlock,
    Bookmark,
    Article,
    Magazine,
    Dictionary,
    Callout,
    Table,
}

impl FragmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::CodeBlock => "CODE_BLOCK",
            FragmentKind::Bookmark => "BOOKMARK",
            FragmentKind::Article => "ARTICLE",
            FragmentKind::Magazine => "MAGAZINE",
            FragmentKind::Dictionary => "DICTIONARY",
            FragmentKind::Callout => "CALLOUT",
            FragmentKind::Table => "TABLE",
        }
    }
}

/// Fragments extracted during one pass, in extraction order.
///
/// Every pass gets its own scope so nested renders (callout bodies) never
/// restore each other's tokens.
#[derive(Debug)]
pub struct Fragments {
    scope: String,
    items: Vec<(FragmentKind, String)>,
}

impl Fragments {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            items: Vec::new(),
        }
    }

    /// Store `html` and return the token that stands in for it
    pub fn protect(&mut self, kind: FragmentKind, html: String) -> String {
        let index = self.items.len();
        self.items.push((kind, html));
        format!("{OPEN}{}:{}:{index}{CLOSE}", self.scope, kind.as_str())
    }

    /// Hand out a token now and supply its HTML later with [`Fragments::fill`]
    pub fn reserve(&mut self, kind: FragmentKind) -> String {
        self.protect(kind, String::new())
    }

    pub fn fill(&mut self, index: usize, html: String) {
        if let Some(item) = self.items.get_mut(index) {
            item.1 = html;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Substitute every token of this scope back with its fragment.
    ///
    /// A fragment may itself contain tokens extracted before it (a table row
    /// holding a code block); those are expanded too. Tokens from other
    /// scopes are left in place for their owner.
    pub fn restore(&self, text: &str) -> String {
        self.restore_below(text, self.items.len())
    }

    fn restore_below(&self, text: &str, limit: usize) -> String {
        token_regex()
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let whole = caps[0].to_string();
                if caps["scope"] != *self.scope {
                    return whole;
                }
                let Ok(index) = caps["index"].parse::<usize>() else {
                    return whole;
                };
                match self.items.get(index) {
                    Some((kind, html)) if index < limit && kind.as_str() == &caps["kind"] => {
                        self.restore_below(html, index)
                    }
                    _ => whole,
                }
            })
            .into_owned()
    }
}

/// Replace token delimiters in author text so they cannot be forged
pub fn sanitize(input: &str) -> Cow<'_, str> {
    if input.contains([OPEN, CLOSE]) {
        Cow::Owned(input.replace([OPEN, CLOSE], "\u{FFFD}"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Whether `text` is exactly one token (ignoring surrounding whitespace)
pub fn is_token(text: &str) -> bool {
    let trimmed = text.trim();
    token_regex()
        .find(trimmed)
        .is_some_and(|m| m.start() == 0 && m.end() == trimmed.len())
}

pub fn contains_token(text: &str) -> bool {
    token_regex().is_match(text)
}

/// A piece of a block that mixes tokens and prose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Token(&'a str),
    Text(&'a str),
}

/// Split `text` into alternating prose and token segments
pub fn split_tokens(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in token_regex().find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Text(&text[last..m.start()]));
        }
        segments.push(Segment::Token(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }
    segments
}
