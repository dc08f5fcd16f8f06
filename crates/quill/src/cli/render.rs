//! Markdown rendering command handler.

use anyhow::Context;
use quill::{MarkdownRenderer, QuillConfig, RenderOptions};
use std::path::Path;
use tracing::debug;

/// Render the Markdown file at `path` to HTML on stdout.
///
/// Only the `[render]` settings are used, so no API key is needed.
pub fn render_file(path: &Path) -> anyhow::Result<()> {
    let markdown = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), len = markdown.len(), "Rendering file");

    let config = QuillConfig::load()?;
    let renderer = MarkdownRenderer::new(RenderOptions::from(&config.render));
    print!("{}", renderer.render(&markdown));
    Ok(())
}
