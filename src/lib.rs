//! sectio: section-by-section rich text editing for problem-set HTML documents.
//!
//! A document is a sequence of `<section>` elements: a title section and any number of problem
//! sections, each pairing a `.headline` with a `.problem-text` body. sectio parses the sections,
//! gives every editable region its own role-gated rich text controller, and serialises the edited
//! regions back into the same section shape.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod markup;
pub mod parser;
pub mod registry;
pub mod richtext;
pub mod section;
pub mod serializer;
pub mod session;
pub mod ui;
