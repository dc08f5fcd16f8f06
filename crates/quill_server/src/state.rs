//! Shared request state.

use quill_core::QuillConfig;
use quill_error::QuillResult;
use quill_interface::StreamingSource;
use quill_post::PostGenerator;
use quill_render::{MarkdownRenderer, RenderOptions};
use std::sync::Arc;

/// State shared by every handler.
///
/// The completion source and renderer are shared read-only; each request
/// builds its own generation stream and extractor.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct AppState {
    /// Post generator over the injected source
    generator: PostGenerator<dyn StreamingSource>,
    /// Markdown renderer, loaded once
    renderer: Arc<MarkdownRenderer>,
    /// Topic served at `/blog`
    default_topic: String,
}

impl AppState {
    /// Assemble state from parts.
    pub fn new(
        generator: PostGenerator<dyn StreamingSource>,
        renderer: Arc<MarkdownRenderer>,
        default_topic: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            renderer,
            default_topic: default_topic.into(),
        }
    }

    /// Build state for `source` from the prompt, render and server settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the prompt template is unusable.
    pub fn from_config(source: Arc<dyn StreamingSource>, config: &QuillConfig) -> QuillResult<Self> {
        let generator = PostGenerator::from_config(source, config)?;
        let renderer = MarkdownRenderer::new(RenderOptions::from(&config.render));
        Ok(Self::new(
            generator,
            Arc::new(renderer),
            config.server.default_topic.as_str(),
        ))
    }
}
