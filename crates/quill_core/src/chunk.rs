//! Partial results emitted while a post streams in.

use serde::{Deserialize, Serialize};

/// Metadata fields parsed from generated text.
///
/// Each field is written at most once per generation; later assignments are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    /// Post title
    pub title: Option<String>,
    /// Post excerpt
    pub excerpt: Option<String>,
    /// Title of the previous post
    pub previous_page: Option<String>,
    /// Title of the next post
    pub next_page: Option<String>,
}

impl PostMetadata {
    /// Set the title if it has not been set yet.
    pub fn set_title_once(&mut self, value: impl Into<String>) {
        set_once(&mut self.title, value);
    }

    /// Set the excerpt if it has not been set yet.
    pub fn set_excerpt_once(&mut self, value: impl Into<String>) {
        set_once(&mut self.excerpt, value);
    }

    /// Set the previous page if it has not been set yet.
    pub fn set_previous_page_once(&mut self, value: impl Into<String>) {
        set_once(&mut self.previous_page, value);
    }

    /// Set the next page if it has not been set yet.
    pub fn set_next_page_once(&mut self, value: impl Into<String>) {
        set_once(&mut self.next_page, value);
    }
}

fn set_once(slot: &mut Option<String>, value: impl Into<String>) {
    if slot.is_none() {
        *slot = Some(value.into());
    }
}

/// A snapshot of a generation in progress, or its final result.
///
/// Fields not yet extracted are empty strings. While `done` is false,
/// `content` holds the raw accumulated text including the section markers,
/// which suits live previews. The final chunk (`done == true`) carries only
/// the body text between `CONTENT:` and the page markers.
///
/// # Examples
///
/// ```
/// use quill_core::GenerationChunk;
///
/// let chunk = GenerationChunk::default();
/// assert!(!chunk.done);
/// assert!(!chunk.has_title());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationChunk {
    /// Post title
    pub title: String,
    /// Post excerpt
    pub excerpt: String,
    /// Accumulated text, or the final body when `done`
    pub content: String,
    /// Previous post title, set on the final chunk
    pub previous_page: String,
    /// Next post title, set on the final chunk
    pub next_page: String,
    /// Whether this is the last chunk of the sequence
    pub done: bool,
}

impl GenerationChunk {
    /// Combine metadata with content into a chunk.
    pub fn from_metadata(metadata: &PostMetadata, content: impl Into<String>, done: bool) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            title: field(&metadata.title),
            excerpt: field(&metadata.excerpt),
            content: content.into(),
            previous_page: field(&metadata.previous_page),
            next_page: field(&metadata.next_page),
            done,
        }
    }

    /// False when no title was extracted, the "not found" condition.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}
