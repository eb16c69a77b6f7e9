//! Markdown outline: the first H1 and relative document links.
//!
//! The body is walked as `pulldown-cmark` events, so headings and links
//! inside code blocks, inline code and HTML are never picked up.

use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// What a document body contributes to the index.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Outline {
    /// Text of the first non-empty level-1 heading.
    pub title: Option<String>,
    /// Relative `.md`/`.mdx` link targets in document order, without
    /// `#fragment` or `?query`. Repeats are kept.
    pub links: Vec<String>,
}

/// Parse a markdown body (front matter already removed).
pub(crate) fn outline(body: &str) -> Outline {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;

    let mut outline = Outline::default();
    // Text of the H1 being captured.
    let mut heading: Option<String> = None;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if outline.title.is_none() => heading = Some(String::new()),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(text) = heading.take()
                    && !text.trim().is_empty()
                {
                    outline.title = Some(text.trim().to_owned());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = heading.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buf) = heading.as_mut() {
                    buf.push(' ');
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(target) = doc_link_target(&dest_url) {
                    outline.links.push(target.to_owned());
                }
            }
            _ => {}
        }
    }

    outline
}

/// The path part of `dest` if it points at a local markdown file.
fn doc_link_target(dest: &str) -> Option<&str> {
    if dest.contains("://") || dest.starts_with("mailto:") {
        return None;
    }
    let path = dest.split(['#', '?']).next().unwrap_or_default();
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext == "md" || ext == "mdx")
        .then_some(path)
}
