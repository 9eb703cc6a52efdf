//! Rich-text block model
//!
//! The content API delivers post bodies as ordered block arrays with
//! character-offset span annotations. `as_text` feeds the reading-time
//! estimator; `as_html` feeds the page templates.

use serde::{Deserialize, Serialize};

/// A single rich-text block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image blocks carry a URL instead of text
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// An inline annotation over a character range
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub span_type: String,
    #[serde(default)]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
}

/// Concatenate all block text, whitespace-joined
pub fn as_text(blocks: &[Block]) -> String {
    let parts: Vec<&str> = blocks
        .iter()
        .filter(|b| !b.text.is_empty())
        .map(|b| b.text.as_str())
        .collect();
    parts.join(" ")
}

/// Render blocks as HTML
pub fn as_html(blocks: &[Block]) -> String {
    let mut html = String::new();
    // "ul" or "ol" while a list is open
    let mut open_list: Option<&str> = None;

    for block in blocks {
        let list_tag = match block.block_type.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };
        if open_list != list_tag {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list_tag {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list_tag;
        }

        let inner = render_spans(&block.text, &block.spans);
        match block.block_type.as_str() {
            "heading1" => html.push_str(&format!("<h1>{}</h1>", inner)),
            "heading2" => html.push_str(&format!("<h2>{}</h2>", inner)),
            "heading3" => html.push_str(&format!("<h3>{}</h3>", inner)),
            "heading4" => html.push_str(&format!("<h4>{}</h4>", inner)),
            "heading5" => html.push_str(&format!("<h5>{}</h5>", inner)),
            "heading6" => html.push_str(&format!("<h6>{}</h6>", inner)),
            "paragraph" => html.push_str(&format!("<p>{}</p>", inner)),
            "preformatted" => html.push_str(&format!("<pre>{}</pre>", inner)),
            "list-item" | "o-list-item" => html.push_str(&format!("<li>{}</li>", inner)),
            "image" => {
                let src = escape_html(block.url.as_deref().unwrap_or_default());
                let alt = escape_html(block.alt.as_deref().unwrap_or_default());
                html.push_str(&format!(r#"<img src="{}" alt="{}">"#, src, alt));
            }
            _ => html.push_str(&format!("<p>{}</p>", inner)),
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

/// Apply span annotations to a block's text, escaping as we go
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    // Clamp offsets to the block's length so a span running past the end
    // still gets its close tag; degenerate spans are dropped entirely
    let spans: Vec<(usize, usize, &Span)> = spans
        .iter()
        .map(|s| (s.start.min(len), s.end.min(len), s))
        .filter(|(start, end, _)| start < end)
        .collect();

    let mut out = String::new();
    for pos in 0..=len {
        // Close before open so adjacent spans nest correctly; spans opened
        // later close first
        let mut closing: Vec<_> = spans.iter().filter(|(_, end, _)| *end == pos).collect();
        closing.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, _, span) in closing {
            out.push_str(close_tag(span));
        }

        let mut opening: Vec<_> = spans.iter().filter(|(start, _, _)| *start == pos).collect();
        opening.sort_by(|a, b| b.1.cmp(&a.1));
        for (_, _, span) in opening {
            out.push_str(&open_tag(span));
        }

        if let Some(c) = chars.get(pos) {
            push_escaped(&mut out, *c);
        }
    }

    out
}

fn open_tag(span: &Span) -> String {
    match span.span_type.as_str() {
        "strong" => "<strong>".to_string(),
        "em" => "<em>".to_string(),
        "hyperlink" => {
            let url = span
                .data
                .as_ref()
                .and_then(|d| d.url.as_deref())
                .unwrap_or_default();
            format!(r#"<a href="{}">"#, escape_html(url))
        }
        _ => String::new(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.span_type.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "",
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}
