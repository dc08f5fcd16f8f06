//! Completion service integrations for Quill.
//!
//! Currently a single provider is supported: the Anthropic Messages API,
//! used both for one-shot completions and for server-sent event streams.
//!
//! # Example
//!
//! ```no_run
//! use quill_core::{CompletionRequest, Message};
//! use quill_interface::CompletionSource;
//! use quill_models::AnthropicClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnthropicClient::new("sk-ant-...", "claude-3-5-sonnet-20241022")?;
//! let request = CompletionRequest::builder()
//!     .model("claude-3-5-sonnet-20241022")
//!     .max_tokens(4000u32)
//!     .messages(vec![Message::user("Write a haiku about Rust")])
//!     .build()?;
//! let text = client.complete(&request).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod retry;

pub use anthropic::{
    AnthropicClient, AnthropicContentBlock, AnthropicDelta, AnthropicErrorBody,
    AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicStreamEvent, SseDecoder,
    SseEvent,
};
pub use retry::RetryPolicy;
