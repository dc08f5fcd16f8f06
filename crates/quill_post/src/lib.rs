//! Blog post generation for Quill.
//!
//! A [`PostGenerator`] formats the prompt for a topic, asks a completion
//! source for text and runs it through a [`FieldExtractor`], which splits the
//! response into its `TITLE:`, `EXCERPT:`, `CONTENT:`, `NEXT_PAGE:` and
//! `PREVIOUS_PAGE:` sections.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extractor;
mod generator;

pub use extractor::FieldExtractor;
pub use generator::{ChunkStream, PostGenerator, materialize};
