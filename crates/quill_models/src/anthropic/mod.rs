//! Anthropic Messages API.

mod client;
mod dto;
mod sse;

pub use client::AnthropicClient;
pub use dto::{
    AnthropicContentBlock, AnthropicDelta, AnthropicErrorBody, AnthropicMessage,
    AnthropicRequest, AnthropicResponse, AnthropicStreamEvent,
};
pub use sse::{SseDecoder, SseEvent};
