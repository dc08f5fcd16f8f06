//! Post generation command handler.

use anyhow::{Context, bail};
use futures_util::StreamExt;
use quill::{
    AnthropicClient, GenerationChunk, MarkdownRenderer, PostGenerator, QuillConfig, RenderOptions,
    materialize,
};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Generate a post for `topic` and print it.
///
/// With `stream`, raw text is echoed to stderr as it arrives. The post goes
/// to stdout as JSON, or as the HTML body with `html`. Fails when the reply
/// has no title.
pub async fn generate(topic: &str, stream: bool, html: bool) -> anyhow::Result<()> {
    let config = QuillConfig::load()?;
    config.validate()?;

    let client = AnthropicClient::from_config(&config.anthropic, &config.retry)?;
    let generator = PostGenerator::from_config(Arc::new(client), &config)?;
    let renderer = MarkdownRenderer::new(RenderOptions::from(&config.render));

    let last = if stream {
        stream_to_stderr(&generator, topic).await?
    } else {
        generator.generate(topic).await?
    };

    let Some(post) = materialize(&last, &renderer) else {
        bail!("No post was generated for topic {:?}", topic);
    };
    info!(title = %post.title, "Generated post");

    if html {
        println!("{}", post.content);
    } else {
        let json = serde_json::to_string_pretty(&post).context("Failed to serialize post")?;
        println!("{}", json);
    }
    Ok(())
}

async fn stream_to_stderr(
    generator: &PostGenerator<AnthropicClient>,
    topic: &str,
) -> anyhow::Result<GenerationChunk> {
    let mut chunks = generator.stream(topic);
    let mut stderr = std::io::stderr();
    let mut printed = 0;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        if chunk.done {
            writeln!(stderr)?;
            return Ok(chunk);
        }
        // In-progress content is the whole buffer so far
        if let Some(fresh) = chunk.content.get(printed..) {
            write!(stderr, "{}", fresh)?;
            stderr.flush()?;
        }
        printed = chunk.content.len();
    }
    bail!("Generation ended without a final chunk")
}
