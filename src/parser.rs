//! Section parser: raw document markup into an ordered list of [`Section`]s.
//!
//! Only `<section>` elements sitting directly under `<body>` count. Each one is classified by
//! shape: a `.headline` descendant together with a `.problem-text` descendant makes a content
//! section; a section missing either is a title section. Everything else about the input is
//! tolerated: unknown top-level elements are skipped and missing ids read as empty strings.

use crate::error::ParseError;
use crate::markup;
use crate::section::{Section, SectionModel};
use markup5ever_rcdom::Handle;
use std::collections::HashSet;

/// Class marking a content section's headline element.
pub const HEADLINE_CLASS: &str = "headline";
/// Class marking a content section's body element.
pub const PROBLEM_TEXT_CLASS: &str = "problem-text";

/// Structural shape of one `<section>`, found before any markup is extracted.
enum SectionShape {
    /// No recognised headline/body pair.
    Bare,
    /// Both substructures present.
    HeadlineAndText { headline: Handle, text: Handle },
}

/// Parses raw file bytes.
///
/// # Errors
///
/// Returns [`ParseError::Encoding`] if the bytes are not UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<SectionModel, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(parse_document(text))
}

#[must_use]
/// Parses document text. HTML tree construction is error tolerant, so text always parses.
pub fn parse_document(text: &str) -> SectionModel {
    let dom = markup::parse_to_dom(text);
    let mut sections = Vec::new();
    let mut seen = HashSet::new();

    for node in markup::body_children(&dom) {
        if markup::tag_name(&node).as_deref() != Some("section") {
            continue;
        }
        let section = extract_section(&node);
        if !seen.insert(section.id().to_string()) {
            tracing::warn!(id = section.id(), "duplicate section id");
        }
        tracing::debug!(id = section.id(), kind = %section.kind(), "parsed section");
        sections.push(section);
    }

    tracing::info!(count = sections.len(), "parsed document");
    SectionModel::new(sections)
}

fn classify(node: &Handle) -> SectionShape {
    let headline = markup::find_descendant_with_class(node, HEADLINE_CLASS);
    let text = markup::find_descendant_with_class(node, PROBLEM_TEXT_CLASS);
    match (headline, text) {
        (Some(headline), Some(text)) => SectionShape::HeadlineAndText { headline, text },
        _ => SectionShape::Bare,
    }
}

fn extract_section(node: &Handle) -> Section {
    let id = markup::attr(node, "id").unwrap_or_default();
    match classify(node) {
        SectionShape::Bare => Section::Title {
            id,
            title: markup::inner_html(node),
        },
        SectionShape::HeadlineAndText { headline, text } => Section::Content {
            id,
            title: markup::inner_html(&headline),
            content: markup::inner_html(&text),
            content_id: markup::attr(&text, "id").unwrap_or_default(),
        },
    }
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
