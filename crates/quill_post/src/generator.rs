//! Topic to post generation.

use crate::FieldExtractor;
use futures_util::{Stream, StreamExt};
use quill_core::{BlogPost, GenerationChunk, GenerationRequest, PromptTemplate, QuillConfig};
use quill_error::QuillResult;
use quill_interface::StreamingSource;
use quill_render::MarkdownRenderer;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Chunks of one generation: in-progress chunks, then exactly one final
/// chunk. A failure ends the stream with an `Err` item instead.
pub type ChunkStream = Pin<Box<dyn Stream<Item = QuillResult<GenerationChunk>> + Send>>;

/// Generates posts from topics using an injected completion source.
///
/// The source is shared; every call builds its own request and extractor,
/// so concurrent generations never see each other's text.
pub struct PostGenerator<S: ?Sized> {
    source: Arc<S>,
    template: PromptTemplate,
    model: String,
    max_tokens: u32,
}

impl<S: ?Sized> Clone for PostGenerator<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            template: self.template.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for PostGenerator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostGenerator")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl<S> PostGenerator<S>
where
    S: StreamingSource + ?Sized + 'static,
{
    /// Create a generator.
    pub fn new(
        source: Arc<S>,
        template: PromptTemplate,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            source,
            template,
            model: model.into(),
            max_tokens,
        }
    }

    /// Create a generator from the prompt and model settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the prompt template is empty.
    pub fn from_config(source: Arc<S>, config: &QuillConfig) -> QuillResult<Self> {
        Ok(Self::new(
            source,
            config.prompt_template()?,
            config.anthropic.model.clone(),
            config.anthropic.max_tokens,
        ))
    }

    /// Build the request for `topic`, sanitizing it.
    pub fn request(&self, topic: &str) -> GenerationRequest {
        GenerationRequest::new(topic, self.template.as_str(), self.model.as_str(), self.max_tokens)
    }

    /// Generate a post in one round trip and return the final chunk.
    #[instrument(skip(self), fields(provider = self.source.provider_name()))]
    pub async fn generate(&self, topic: &str) -> QuillResult<GenerationChunk> {
        let request = self.request(topic).completion_request()?;
        let text = self.source.complete(&request).await?;
        debug!(response_len = text.len(), "Received batch response");

        let mut extractor = FieldExtractor::new();
        extractor.push(&text);
        Ok(extractor.finish())
    }

    /// Stream chunks for `topic` as the completion arrives.
    ///
    /// Nothing is requested until the stream is first polled.
    pub fn stream(&self, topic: &str) -> ChunkStream {
        let request = self.request(topic);
        let source = Arc::clone(&self.source);

        Box::pin(async_stream::stream! {
            let completion = match request.completion_request() {
                Ok(completion) => completion,
                Err(e) => {
                    warn!(error = %e, "Cannot build completion request");
                    yield Err(e);
                    return;
                }
            };

            info!(topic = %request.topic(), model = %request.model_id(), "Starting generation");
            let mut fragments = match source.stream(&completion).await {
                Ok(fragments) => fragments,
                Err(e) => {
                    warn!(error = %e, "Failed to open completion stream");
                    yield Err(e);
                    return;
                }
            };

            let mut extractor = FieldExtractor::new();
            while let Some(fragment) = fragments.next().await {
                match fragment {
                    Ok(text) => {
                        yield Ok(extractor.push(&text));
                    }
                    Err(e) => {
                        warn!(error = %e, "Completion stream failed");
                        yield Err(e);
                        return;
                    }
                }
            }

            let last = extractor.finish();
            info!(found = last.has_title(), content_len = last.content.len(), "Generation finished");
            yield Ok(last);
        })
    }

    /// Drive a full generation and materialize the post.
    ///
    /// Returns `Ok(None)` when no title was produced, the "not found"
    /// condition.
    #[instrument(skip(self, renderer))]
    pub async fn resolve(
        &self,
        topic: &str,
        renderer: &MarkdownRenderer,
    ) -> QuillResult<Option<BlogPost>> {
        let mut chunks = self.stream(topic);
        let mut last = None;
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            if chunk.done {
                last = Some(chunk);
            }
        }
        Ok(last.and_then(|chunk| materialize(&chunk, renderer)))
    }
}

/// Turn a final chunk into a post, rendering its Markdown body.
///
/// Returns `None` when the chunk has no title.
pub fn materialize(chunk: &GenerationChunk, renderer: &MarkdownRenderer) -> Option<BlogPost> {
    if !chunk.has_title() {
        debug!("No title extracted, treating as not found");
        return None;
    }
    Some(BlogPost::new(
        chunk.title.as_str(),
        chunk.excerpt.as_str(),
        renderer.render(&chunk.content),
        Some(chunk.previous_page.as_str()),
        Some(chunk.next_page.as_str()),
    ))
}
