//! Section serializer: the section model plus live controllers back into document markup.
//!
//! Structure and order come from the model; content comes from each region's current snapshot.
//! An export either covers every section or fails as a whole.

use crate::error::ExportError;
use crate::markup::escape_attr;
use crate::registry::{RegionKey, RegionSlot, SessionRegistry};
use crate::richtext::Region;
use crate::section::{Section, SectionModel};

/// Serializes every section of `model` in order, reading content from `registry`.
///
/// # Errors
///
/// Returns [`ExportError::UnknownRegion`] if any section's region was never opened; nothing is
/// produced in that case.
pub fn serialize(model: &SectionModel, registry: &SessionRegistry) -> Result<String, ExportError> {
    let mut out = String::new();
    for (index, section) in model.iter().enumerate() {
        let key = |slot| RegionKey {
            section_id: section.id().to_string(),
            occurrence: model.occurrence(index),
            slot,
        };
        match section {
            Section::Title { id, .. } => {
                let headline = registry.get(&key(RegionSlot::Headline))?;
                let inner = unwrapped_title(headline);
                out.push_str(&format!(
                    "<section id=\"{}\">{inner}</section>\n",
                    escape_attr(id)
                ));
            }
            Section::Content { id, content_id, .. } => {
                let headline = registry.get(&key(RegionSlot::Headline))?.to_html();
                let body = registry.get(&key(RegionSlot::Content))?.to_html();
                out.push_str(&format!(
                    "<section id=\"{}\"><div class=\"headline\">{headline}</div>\
                     <div id=\"{}\" class=\"problem-text\">{body}</div></section>\n",
                    escape_attr(id),
                    escape_attr(content_id),
                ));
            }
        }
    }
    Ok(out)
}

/// Title snapshot with its single heading element removed, or unchanged if it has another shape.
fn unwrapped_title(region: &Region) -> String {
    let unwrapped = match region {
        Region::Title(c) => c.heading_inner_html(),
        Region::Headline(c) => c.heading_inner_html(),
        Region::Body(c) => c.heading_inner_html(),
    };
    unwrapped.unwrap_or_else(|| {
        let snapshot = region.to_html();
        tracing::warn!(%snapshot, "title is not a single heading, exporting it unchanged");
        snapshot
    })
}

#[cfg(test)]
#[path = "tests/serializer.rs"]
mod tests;
