//! Incremental section extraction.

use quill_core::{GenerationChunk, PostMetadata};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static TITLE: LazyLock<Regex> = LazyLock::new(|| section(r"TITLE:(.*?)EXCERPT:"));
static EXCERPT: LazyLock<Regex> = LazyLock::new(|| section(r"EXCERPT:(.*?)CONTENT:"));
static CONTENT: LazyLock<Regex> =
    LazyLock::new(|| section(r"CONTENT:(.*?)(?:NEXT_PAGE:|PREVIOUS_PAGE:)"));
static NEXT_PAGE: LazyLock<Regex> = LazyLock::new(|| section(r"NEXT_PAGE:(.*?)PREVIOUS_PAGE:"));
static PREVIOUS_PAGE: LazyLock<Regex> = LazyLock::new(|| section(r"PREVIOUS_PAGE:(.*)"));

/// Compile a section pattern where `.` also matches newlines.
fn section(pattern: &str) -> Regex {
    Regex::new(&format!("(?s){}", pattern)).expect("section patterns are valid")
}

fn capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Splits generated text into post sections as it streams in.
///
/// Each generation owns one extractor. [`push`](Self::push) advances it by
/// one fragment; [`finish`](Self::finish) runs the final pass over the whole
/// buffer.
///
/// # Examples
///
/// ```
/// use quill_post::FieldExtractor;
///
/// let mut extractor = FieldExtractor::new();
/// let chunk = extractor.push("TITLE: Hello\nEXCERPT: ");
/// assert_eq!(chunk.title, "Hello");
/// assert_eq!(chunk.content, "TITLE: Hello\nEXCERPT: ");
///
/// extractor.push("Short\nCONTENT: Body\nNEXT_PAGE: n\nPREVIOUS_PAGE: p");
/// let last = extractor.finish();
/// assert!(last.done);
/// assert_eq!(last.excerpt, "Short");
/// assert_eq!(last.content, "Body");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    buffer: String,
    metadata: PostMetadata,
}

impl FieldExtractor {
    /// Create an empty extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw text accumulated so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Metadata extracted so far.
    pub fn metadata(&self) -> &PostMetadata {
        &self.metadata
    }

    /// Append a fragment and return the in-progress chunk.
    ///
    /// Title and excerpt are captured the first time their closing marker
    /// appears and never change afterwards. The chunk's `content` is the
    /// entire raw buffer.
    pub fn push(&mut self, fragment: &str) -> GenerationChunk {
        self.buffer.push_str(fragment);

        if self.metadata.title.is_none() {
            if let Some(title) = capture(&TITLE, &self.buffer) {
                debug!(title_len = title.len(), "Extracted title");
                self.metadata.set_title_once(title);
            }
        }
        if self.metadata.excerpt.is_none() {
            if let Some(excerpt) = capture(&EXCERPT, &self.buffer) {
                debug!(excerpt_len = excerpt.len(), "Extracted excerpt");
                self.metadata.set_excerpt_once(excerpt);
            }
        }

        GenerationChunk::from_metadata(&self.metadata, self.buffer.as_str(), false)
    }

    /// Run the final pass and return the last chunk.
    ///
    /// Content runs from `CONTENT:` to whichever of `NEXT_PAGE:` or
    /// `PREVIOUS_PAGE:` comes first. The next page sits between `NEXT_PAGE:`
    /// and `PREVIOUS_PAGE:`; the previous page is everything after the first
    /// `PREVIOUS_PAGE:`. Missing sections are empty strings. Title and
    /// excerpt come from the incremental passes.
    pub fn finish(mut self) -> GenerationChunk {
        let content = capture(&CONTENT, &self.buffer).unwrap_or_default();
        if let Some(next) = capture(&NEXT_PAGE, &self.buffer) {
            self.metadata.set_next_page_once(next);
        }
        if let Some(previous) = capture(&PREVIOUS_PAGE, &self.buffer) {
            self.metadata.set_previous_page_once(previous);
        }

        let chunk = GenerationChunk::from_metadata(&self.metadata, content, true);
        for (name, value) in [
            ("title", &chunk.title),
            ("excerpt", &chunk.excerpt),
            ("content", &chunk.content),
            ("next_page", &chunk.next_page),
            ("previous_page", &chunk.previous_page),
        ] {
            if value.is_empty() {
                debug!(
                    section = name,
                    buffer_len = self.buffer.len(),
                    "Section missing from response"
                );
            }
        }
        chunk
    }
}
