//! Section representation for parsed problem-set documents.
//!
//! A section is one top-level `<section>` element of the document. Its variant is decided once,
//! by the parser, from the section's shape: a headline plus a problem text makes a content
//! section, anything else is a title section. Identifiers are threaded through untouched so the
//! exported document carries exactly the ids it was loaded with.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One structural unit of the document, in reading order.
pub enum Section {
    /// The document's top-level heading region.
    Title {
        /// Verbatim `id` attribute of the `<section>` (empty when absent).
        id: String,
        /// Inner markup of the whole section, wrappers included.
        title: String,
    },
    /// A headline and problem-text pair.
    Content {
        /// Verbatim `id` attribute of the `<section>` (empty when absent).
        id: String,
        /// Inner markup of the `.headline` element.
        title: String,
        /// Inner markup of the `.problem-text` element.
        content: String,
        /// Verbatim `id` attribute of the `.problem-text` element (empty when absent).
        content_id: String,
    },
}

impl Section {
    #[must_use]
    /// Identifier of the `<section>` element.
    pub fn id(&self) -> &str {
        match self {
            Self::Title { id, .. } | Self::Content { id, .. } => id,
        }
    }

    #[must_use]
    /// Headline markup: the whole inner markup for a title, the `.headline` markup otherwise.
    pub fn title(&self) -> &str {
        match self {
            Self::Title { title, .. } | Self::Content { title, .. } => title,
        }
    }

    #[must_use]
    /// Which variant this is, without the payload.
    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Title { .. } => SectionKind::Title,
            Self::Content { .. } => SectionKind::Content,
        }
    }

    #[must_use]
    /// Whether this section carries a body region as well as a headline.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Content { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Variant tag of a [`Section`].
pub enum SectionKind {
    /// A [`Section::Title`].
    Title,
    /// A [`Section::Content`].
    Content,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Content => f.write_str("problem"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// The ordered sections of one loaded document; the single source of truth for structure.
pub struct SectionModel {
    sections: Vec<Section>,
}

impl SectionModel {
    #[must_use]
    /// Wraps parsed sections, keeping their order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    #[must_use]
    /// Sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// Whether the document had no qualifying sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    /// Section at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    /// How many sections before `index` share its id.
    ///
    /// Documents are not required to have unique ids, so region keys pair the id with this
    /// count to stay distinct.
    pub fn occurrence(&self, index: usize) -> usize {
        let Some(section) = self.sections.get(index) else {
            return 0;
        };
        self.sections[..index]
            .iter()
            .filter(|s| s.id() == section.id())
            .count()
    }

    /// Iterates the sections in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }
}

impl<'a> IntoIterator for &'a SectionModel {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
