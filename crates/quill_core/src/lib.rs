//! Core data types for the Quill blog generation service.
//!
//! This crate provides the foundation used across the workspace: the request
//! and chunk types flowing through generation, the topic sanitizer, the prompt
//! formatter, process configuration and tracing setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod completion;
mod config;
mod message;
mod post;
mod prompt;
mod request;
mod role;
mod telemetry;
mod topic;

pub use chunk::{GenerationChunk, PostMetadata};
pub use completion::{CompletionRequest, CompletionRequestBuilder};
pub use config::{
    AnthropicConfig, HttpConfig, PromptConfig, QuillConfig, RenderConfig, RetryConfig,
};
pub use message::Message;
pub use post::BlogPost;
pub use prompt::{PromptTemplate, TOPIC_PLACEHOLDER, format_prompt};
pub use request::GenerationRequest;
pub use role::Role;
pub use telemetry::init_tracing;
pub use topic::{NO_TOPIC, sanitize_topic, slugify};
