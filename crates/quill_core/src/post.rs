//! Materialized blog post.

use crate::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully generated post ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Post title
    pub title: String,
    /// Post excerpt
    pub excerpt: String,
    /// Rendered HTML body
    pub content: String,
    /// Slug linking to the previous post
    pub previous_page_slug: Option<String>,
    /// Slug linking to the next post
    pub next_page_slug: Option<String>,
    /// Time the post finished generating
    pub generated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Assemble a post, turning page titles into slugs.
    ///
    /// Page titles that slugify to nothing are dropped.
    pub fn new(
        title: impl Into<String>,
        excerpt: impl Into<String>,
        content: impl Into<String>,
        previous_page: Option<&str>,
        next_page: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            content: content.into(),
            previous_page_slug: previous_page.map(slugify).filter(|s| !s.is_empty()),
            next_page_slug: next_page.map(slugify).filter(|s| !s.is_empty()),
            generated_at: Utc::now(),
        }
    }
}
