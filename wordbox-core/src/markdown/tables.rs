//! Pipe tables with per-column alignment.
//!
//! A `|...|` row directly followed by a separator row (`|---|:-:|--:|`)
//! opens a table; consecutive `|...|` rows belong to it. Anything else stays
//! as ordinary text.

use super::inline;
use super::placeholder::{FragmentKind, Fragments};

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator(cell: &str) -> Self {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Alignment::Center,
            (_, true) => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

fn is_row(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= 3 && line.starts_with('|') && line.ends_with('|')
}

fn is_separator(line: &str) -> bool {
    let line = line.trim_end();
    is_row(line)
        && line[1..line.len() - 1]
            .chars()
            .all(|c| c.is_whitespace() || matches!(c, '-' | ':' | '|'))
}

/// Swap every table for a token holding its HTML
pub fn protect_tables(text: &str, fragments: &mut Fragments) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if is_row(lines[i]) && i + 1 < lines.len() && is_separator(lines[i + 1]) {
            let start = i;
            while i < lines.len() && is_row(lines[i]) {
                i += 1;
            }
            let table = render_table(&lines[start..i]);
            out.push(fragments.protect(FragmentKind::Table, table));
            continue;
        }
        out.push(lines[i].to_string());
        i += 1;
    }

    out.join("\n")
}

/// Split a row into trimmed cells; `\|` is a literal pipe, not a delimiter
pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim_end();
    let inner = line
        .strip_prefix('|')
        .and_then(|l| l.strip_suffix('|'))
        .unwrap_or(line);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

fn render_table(lines: &[&str]) -> String {
    let (header, separator, body) = match lines {
        [header, separator, body @ ..] => (header, separator, body),
        _ => return lines.join("\n"),
    };

    let alignments: Vec<Alignment> = split_cells(separator)
        .iter()
        .map(|cell| Alignment::from_separator(cell))
        .collect();
    let align = |idx: usize| alignments.get(idx).copied().unwrap_or(Alignment::Left);

    let mut html = String::from("<table>\n<thead>\n<tr>");
    for (idx, cell) in split_cells(header).iter().enumerate() {
        html.push_str(&format!(
            r#"<th style="text-align: {}">{}</th>"#,
            align(idx).as_str(),
            inline::format_cell(cell)
        ));
    }
    html.push_str("</tr>\n</thead>\n<tbody>");

    for row in body {
        html.push_str("\n<tr>");
        for (idx, cell) in split_cells(row).iter().enumerate() {
            html.push_str(&format!(
                r#"<td style="text-align: {}">{}</td>"#,
                align(idx).as_str(),
                inline::format_cell(cell)
            ));
        }
        html.push_str("</tr>");
    }

    html.push_str("\n</tbody>\n</table>");
    html
}
