//! Rich text editing for section regions.
//!
//! [`RichTextController`] owns one region's document and selection. Its type parameter is the
//! region's role ([`TitleHeadline`], [`ContentHeadline`] or [`ContentBody`]), which fixes what the
//! document may hold and which toggles exist. [`Region`] erases the role for storage in the
//! session registry.

mod controller;
mod document;
mod load;
mod render;
mod schema;

pub use controller::{Motion, Region, RichTextController};
pub use document::{
    Block, BlockKind, Mark, Marks, Position, RichDocument, Selection, TextRun, Wrapper,
    WrapperKind,
};
pub use schema::{
    Capabilities, Command, ContentBody, ContentHeadline, RegionRole, Schema, TitleHeadline,
};
