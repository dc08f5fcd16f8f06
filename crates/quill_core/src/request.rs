//! Generation request types.

use crate::{CompletionRequest, Message, PromptTemplate, sanitize_topic};
use quill_error::{BuilderError, ConfigError, QuillError, QuillResult};

/// A request to generate one blog post.
///
/// The topic is sanitized on construction, so every accessor observes the
/// cleaned value.
///
/// # Examples
///
/// ```
/// use quill_core::GenerationRequest;
///
/// let request = GenerationRequest::new(
///     "Next.js\u{7}",
///     "Write about {{topic}}",
///     "claude-3-5-sonnet-20241022",
///     4000,
/// );
/// assert_eq!(request.topic(), "Next.js");
/// assert_eq!(request.formatted_prompt().unwrap(), "Write about Next.js");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GenerationRequest {
    /// Sanitized topic
    topic: String,
    /// Raw prompt template
    prompt_template: String,
    /// Model identifier
    model_id: String,
    /// Upper bound on generated tokens
    max_tokens: u32,
}

impl GenerationRequest {
    /// Build a request, sanitizing the topic.
    pub fn new(
        topic: &str,
        prompt_template: impl Into<String>,
        model_id: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            topic: sanitize_topic(topic),
            prompt_template: prompt_template.into(),
            model_id: model_id.into(),
            max_tokens,
        }
    }

    /// Render the prompt for this request's topic.
    #[track_caller]
    pub fn formatted_prompt(&self) -> Result<String, ConfigError> {
        Ok(PromptTemplate::new(self.prompt_template.as_str())?.format(&self.topic))
    }

    /// Build the single-message completion request for this topic.
    #[track_caller]
    pub fn completion_request(&self) -> QuillResult<CompletionRequest> {
        if self.model_id.trim().is_empty() {
            return Err(ConfigError::new("Model identifier is not configured").into());
        }
        let prompt = self.formatted_prompt()?;
        CompletionRequest::builder()
            .model(self.model_id.clone())
            .max_tokens(self.max_tokens)
            .messages(vec![Message::user(prompt)])
            .build()
            .map_err(|e| QuillError::from(BuilderError::from(e.to_string())))
    }
}
