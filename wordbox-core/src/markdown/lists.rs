//! Nested list reconstruction.
//!
//! Contiguous runs of `- item` / `N. item` lines become one nested list.
//! Nesting comes from indentation (two columns per level, a tab counts as
//! two). A stack of open lists tracks where each new item belongs.

/// One parsed list line
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListItem<'a> {
    level: usize,
    ordered: bool,
    number: u64,
    content: &'a str,
}

#[derive(Debug, Clone, Copy)]
struct OpenList {
    ordered: bool,
    level: usize,
}

impl OpenList {
    fn tag(&self) -> &'static str {
        if self.ordered {
            "ol"
        } else {
            "ul"
        }
    }
}

fn parse_item(line: &str) -> Option<ListItem<'_>> {
    let rest = line.trim_start();
    let indent = &line[..line.len() - rest.len()];
    let columns: usize = indent.chars().map(|c| if c == '\t' { 2 } else { 1 }).sum();
    let level = columns / 2;

    if let Some(content) = rest.strip_prefix("- ") {
        return (!content.is_empty()).then_some(ListItem {
            level,
            ordered: false,
            number: 0,
            content,
        });
    }

    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let content = rest[digits..].strip_prefix(". ")?;
    if content.is_empty() {
        return None;
    }
    let number = rest[..digits].parse().ok()?;
    Some(ListItem {
        level,
        ordered: true,
        number,
        content,
    })
}

/// Split off a leading task checkbox: `Some(checked)` plus the remaining text
fn parse_checkbox(content: &str) -> (Option<bool>, &str) {
    if let Some(rest) = content
        .strip_prefix("[x] ")
        .or_else(|| content.strip_prefix("[X] "))
    {
        (Some(true), rest)
    } else if let Some(rest) = content.strip_prefix("[ ] ") {
        (Some(false), rest)
    } else {
        (None, content)
    }
}

/// Replace every run of list lines with its HTML (on a single line)
pub fn render_lists(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let mut items = Vec::new();
        while let Some(item) = lines.get(i).and_then(|line| parse_item(line)) {
            items.push(item);
            i += 1;
        }

        if items.is_empty() {
            out.push(lines[i].to_string());
            i += 1;
        } else {
            out.push(build_list(&items));
        }
    }

    out.join("\n")
}

fn open_tag(item: &ListItem<'_>, class: Option<&str>) -> String {
    let tag = if item.ordered { "ol" } else { "ul" };
    let class = class
        .map(|c| format!(r#" class="{c}""#))
        .unwrap_or_default();
    let start = if item.ordered && item.number != 1 {
        format!(r#" start="{}""#, item.number)
    } else {
        String::new()
    };
    format!("<{tag}{class}{start}>")
}

fn build_list(items: &[ListItem<'_>]) -> String {
    let has_checkbox = items
        .iter()
        .any(|item| parse_checkbox(item.content).0.is_some());
    let mut first_list = true;

    let mut html = String::new();
    let mut stack: Vec<OpenList> = Vec::new();

    for item in items {
        let body = match parse_checkbox(item.content) {
            (Some(true), text) => format!(
                r#"<input type="checkbox" checked disabled> <span class="checkbox-checked">{text}</span>"#
            ),
            (Some(false), text) => {
                format!(r#"<input type="checkbox" disabled> <span>{text}</span>"#)
            }
            (None, text) => text.to_string(),
        };

        while let Some(top) = stack.last() {
            if top.level <= item.level {
                break;
            }
            html.push_str(&format!("</li></{}>", top.tag()));
            stack.pop();
        }

        match stack.last() {
            Some(top) if top.level == item.level => {
                html.push_str("</li><li>");
                html.push_str(&body);
            }
            _ => {
                let class = (has_checkbox && first_list).then_some("checkbox-list");
                first_list = false;
                html.push_str(&open_tag(item, class));
                html.push_str("<li>");
                html.push_str(&body);
                stack.push(OpenList {
                    ordered: item.ordered,
                    level: item.level,
                });
            }
        }
    }

    while let Some(top) = stack.pop() {
        html.push_str(&format!("</li></{}>", top.tag()));
    }

    html
}
