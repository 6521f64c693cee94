//! Markdown rendering of record bodies.
//!
//! Bodies are CommonMark with footnotes (`Text[^1]` / `[^1]: Anmerkung`).
//! Rendering goes through pulldown-cmark; the helpers here derive the plain
//! text, the word-limited preview and the highlighted HTML from the same
//! event stream. Raw HTML in a body is never passed through: it is rendered
//! as escaped text.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, TagEnd, TextMergeStream};
use regex::Regex;

/// Suffix appended to truncated previews.
pub const ELLIPSIS: &str = " …";

fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts
}

/// Parser events with raw HTML demoted to text and adjacent text merged.
fn events(markdown: &str) -> impl Iterator<Item = Event<'_>> {
    let escaped = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    TextMergeStream::new(escaped)
}

/// Render Markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events(markdown));
    out
}

/// Render Markdown to HTML, wrapping every match of `pattern` found in text
/// nodes in `<mark class="highlight">`. Markup itself is never touched.
///
/// Text split by the parser at entities or escapes is merged first, so a
/// match may span them.
pub fn markdown_to_highlighted_html(markdown: &str, pattern: &Regex) -> String {
    let highlighted = events(markdown).map(|event| match event {
        Event::Text(text) => match highlight_text(&text, pattern) {
            Some(marked) => Event::InlineHtml(CowStr::from(marked)),
            None => Event::Text(text),
        },
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, highlighted);
    out
}

fn highlight_text(text: &str, pattern: &Regex) -> Option<String> {
    let mut out = String::new();
    let mut last = 0;
    for m in pattern.find_iter(text).filter(|m| !m.is_empty()) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<mark class=\"highlight\">");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    if last == 0 {
        return None;
    }
    out.push_str(&escape_html(&text[last..]));
    Some(out)
}

/// Text content of the rendered Markdown, whitespace collapsed.
///
/// Footnote references appear as `[label]`; block boundaries become spaces.
pub fn plain_text(markdown: &str) -> String {
    let mut buf = String::with_capacity(markdown.len());
    for event in events(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => buf.push_str(&t),
            Event::FootnoteReference(label) => {
                buf.push('[');
                buf.push_str(&label);
                buf.push(']');
            }
            Event::SoftBreak | Event::HardBreak | Event::Rule => buf.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::FootnoteDefinition
                | TagEnd::TableCell,
            ) => buf.push(' '),
            _ => {}
        }
    }
    buf.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first `max_words` words of `text`, with [`ELLIPSIS`] appended, or
/// `None` when the text already fits.
pub fn truncate_words(text: &str, max_words: usize) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return None;
    }
    Some(format!("{}{}", words[..max_words].join(" "), ELLIPSIS))
}

/// Plain-text preview of a body for terminal output.
pub fn preview_text(markdown: &str, max_words: usize) -> String {
    let text = plain_text(markdown);
    truncate_words(&text, max_words).unwrap_or(text)
}

/// HTML preview of a body: the full rendering when it fits the word budget,
/// otherwise the escaped, truncated text content.
pub fn preview_html(markdown: &str, max_words: usize) -> String {
    match truncate_words(&plain_text(markdown), max_words) {
        Some(short) => escape_html(&short),
        None => markdown_to_html(markdown),
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
