//! Session registry: one live controller per editable region of the loaded document.
//!
//! The section model owns structure and order; the registry is only an index from a
//! [`RegionKey`] to the controller editing that region. Controllers are created lazily the first
//! time a region is opened, and the whole registry is replaced whenever a new file is loaded.

use crate::error::ExportError;
use crate::richtext::{ContentBody, ContentHeadline, Region, RichTextController, TitleHeadline};
use crate::section::{Section, SectionModel};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Which half of a section a region is.
pub enum RegionSlot {
    /// The headline (the only region of a title section).
    Headline,
    /// The problem-text body of a content section.
    Content,
}

impl fmt::Display for RegionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Headline => f.write_str("headline"),
            Self::Content => f.write_str("content"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identity of an editable region within one loaded document.
pub struct RegionKey {
    /// The section's `id`, verbatim.
    pub section_id: String,
    /// Number of earlier sections carrying the same id.
    pub occurrence: usize,
    /// Headline or body.
    pub slot: RegionSlot,
}

impl RegionKey {
    #[must_use]
    /// Key for `slot` of the section at `index` in `model`.
    pub fn for_section(model: &SectionModel, index: usize, slot: RegionSlot) -> Option<Self> {
        let section = model.get(index)?;
        Some(Self {
            section_id: section.id().to_string(),
            occurrence: model.occurrence(index),
            slot,
        })
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section_id, self.slot)?;
        if self.occurrence > 0 {
            write!(f, "#{}", self.occurrence)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
/// Controllers for the regions opened so far in the current session.
pub struct SessionRegistry {
    regions: HashMap<RegionKey, Region>,
}

impl SessionRegistry {
    #[must_use]
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the controller for `key`, creating it from `initial` markup on first use.
    ///
    /// `make` picks the role; it is only called when the key is new, so an existing controller
    /// keeps its edits.
    pub fn ensure(
        &mut self,
        key: RegionKey,
        initial: &str,
        make: fn(&str) -> Region,
    ) -> &mut Region {
        self.regions.entry(key).or_insert_with_key(|key| {
            let region = make(initial);
            tracing::debug!(%key, role = %region.role(), "registered region");
            region
        })
    }

    /// Registers every region of the section at `index`, returning how many regions it has.
    pub fn open_section(&mut self, model: &SectionModel, index: usize) -> usize {
        let Some(section) = model.get(index) else {
            return 0;
        };
        let occurrence = model.occurrence(index);
        let key = |slot| RegionKey {
            section_id: section.id().to_string(),
            occurrence,
            slot,
        };
        match section {
            Section::Title { title, .. } => {
                self.ensure(key(RegionSlot::Headline), title, |html| {
                    Region::Title(RichTextController::<TitleHeadline>::new(html))
                });
                1
            }
            Section::Content { title, content, .. } => {
                self.ensure(key(RegionSlot::Headline), title, |html| {
                    Region::Headline(RichTextController::<ContentHeadline>::new(html))
                });
                self.ensure(key(RegionSlot::Content), content, |html| {
                    Region::Body(RichTextController::<ContentBody>::new(html))
                });
                2
            }
        }
    }

    /// Registers every region of every section in `model`.
    pub fn open_all(&mut self, model: &SectionModel) {
        for index in 0..model.len() {
            self.open_section(model, index);
        }
    }

    /// The controller for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnknownRegion`] if the region was never opened.
    pub fn get(&self, key: &RegionKey) -> Result<&Region, ExportError> {
        self.regions
            .get(key)
            .ok_or_else(|| ExportError::UnknownRegion(key.clone()))
    }

    /// The controller for `key`, mutably.
    pub fn get_mut(&mut self, key: &RegionKey) -> Option<&mut Region> {
        self.regions.get_mut(key)
    }

    #[must_use]
    /// Whether `key` has a controller.
    pub fn contains(&self, key: &RegionKey) -> bool {
        self.regions.contains_key(key)
    }

    #[must_use]
    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    /// Whether no region has been opened.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;
