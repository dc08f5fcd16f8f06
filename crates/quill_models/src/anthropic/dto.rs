//! Wire types for the Messages API.

use quill_core::{CompletionRequest, Message};
use serde::{Deserialize, Serialize};

/// A message in Anthropic's request format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// `user` or `assistant`
    pub role: String,
    /// Plain text content
    pub content: String,
}

impl From<&Message> for AnthropicMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// Upper bound on generated tokens
    max_tokens: u32,
    /// Conversation
    messages: Vec<AnthropicMessage>,
    /// Optional system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Ask for a server-sent event stream
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

impl AnthropicRequest {
    /// Convert a provider-neutral request.
    pub fn from_completion(request: &CompletionRequest, stream: bool) -> Self {
        Self {
            model: request.model().clone(),
            max_tokens: *request.max_tokens(),
            messages: request.messages().iter().map(AnthropicMessage::from).collect(),
            system: request.system().clone(),
            stream,
        }
    }
}

/// A content block in a non-streaming response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Text output
    Text {
        /// The text
        text: String,
    },
    /// Any block type Quill does not consume
    #[serde(other)]
    Other,
}

/// Non-streaming response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, derive_getters::Getters)]
pub struct AnthropicResponse {
    /// Message identifier
    id: String,
    /// Generated content blocks
    content: Vec<AnthropicContentBlock>,
    /// Why generation stopped
    #[serde(default)]
    stop_reason: Option<String>,
}

impl AnthropicResponse {
    /// Concatenate all text blocks in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect()
    }
}

/// Error payload used both in error responses and `error` stream events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnthropicErrorBody {
    /// Provider error type, e.g. `overloaded_error`
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human readable message
    pub message: String,
}

/// Envelope of a non-success HTTP response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AnthropicErrorResponse {
    pub error: AnthropicErrorBody,
}

/// Delta payload of a `content_block_delta` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicDelta {
    /// Incremental text
    TextDelta {
        /// The new text
        text: String,
    },
    /// Tool input or other non-text deltas
    #[serde(other)]
    Other,
}

/// Events carried in the `data:` field of the message stream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamEvent {
    /// Stream opened
    MessageStart,
    /// A content block began
    ContentBlockStart,
    /// Incremental content
    ContentBlockDelta {
        /// Index of the content block
        #[serde(default)]
        index: usize,
        /// The delta
        delta: AnthropicDelta,
    },
    /// A content block ended
    ContentBlockStop,
    /// Top-level message changes such as stop reason
    MessageDelta,
    /// Stream finished
    MessageStop,
    /// Keep-alive
    Ping,
    /// The service failed mid-stream
    Error {
        /// Error details
        error: AnthropicErrorBody,
    },
    /// Event types added after this client was written
    #[serde(other)]
    Unknown,
}
