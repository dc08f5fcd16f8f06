//! Provider-neutral completion request.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Request handed to a completion source.
///
/// Whether the response is streamed is decided by the source method that
/// receives it, not by a flag on the request.
///
/// # Examples
///
/// ```
/// use quill_core::{CompletionRequest, Message};
///
/// let request = CompletionRequest::builder()
///     .model("claude-3-5-sonnet-20241022")
///     .max_tokens(4000u32)
///     .messages(vec![Message::user("Hello")])
///     .build()
///     .unwrap();
///
/// assert_eq!(request.max_tokens(), &4000);
/// assert!(request.system().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Model identifier
    model: String,
    /// Upper bound on generated tokens
    max_tokens: u32,
    /// Role-tagged conversation
    messages: Vec<Message>,
    /// Optional system prompt
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

impl CompletionRequest {
    /// Creates a new completion request builder.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}
