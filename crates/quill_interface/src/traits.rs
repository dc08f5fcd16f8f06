//! Completion source traits.

use async_trait::async_trait;
use futures_util::stream::Stream;
use quill_core::CompletionRequest;
use quill_error::QuillResult;
use std::pin::Pin;

/// Ordered text fragments from a streaming completion.
///
/// The stream ends after the final fragment. A failure mid-stream is yielded
/// as an `Err` item and no further items follow it. Dropping the stream
/// releases the underlying connection.
pub type FragmentStream = Pin<Box<dyn Stream<Item = QuillResult<String>> + Send>>;

/// Core trait every completion backend implements.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Request a complete response and return its concatenated text.
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String>;

    /// Provider name (e.g., "anthropic").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier (e.g., "claude-3-5-sonnet-20241022").
    fn model_name(&self) -> &str;
}

/// Trait for sources that support streaming responses.
#[async_trait]
pub trait StreamingSource: CompletionSource {
    /// Open a streaming completion.
    ///
    /// Errors establishing the stream are returned directly; errors after
    /// the first fragment arrive as stream items.
    async fn stream(&self, request: &CompletionRequest) -> QuillResult<FragmentStream>;
}
