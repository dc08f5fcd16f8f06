//! Quill - blog posts generated on demand by an LLM.
//!
//! A topic goes in; Quill formats a prompt, asks the Anthropic Messages API
//! for a post (in one round trip or as a stream), pulls the delimited
//! sections out of the free-text reply and renders the body Markdown to
//! syntax-highlighted HTML.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use quill::{AnthropicClient, MarkdownRenderer, PostGenerator, QuillConfig, RenderOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = QuillConfig::load()?;
//!     config.validate()?;
//!
//!     let client = Arc::new(AnthropicClient::from_config(&config.anthropic, &config.retry)?);
//!     let generator = PostGenerator::from_config(client, &config)?;
//!     let renderer = MarkdownRenderer::new(RenderOptions::from(&config.render));
//!
//!     match generator.resolve("Rust ownership", &renderer).await? {
//!         Some(post) => println!("{}\n\n{}", post.title, post.content),
//!         None => eprintln!("No post was produced"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `quill_error` - Error types
//! - `quill_core` - Data model, prompt formatting, configuration
//! - `quill_interface` - Completion source traits
//! - `quill_models` - Anthropic client
//! - `quill_render` - Markdown and syntax highlighting
//! - `quill_post` - Section extraction and post generation
//! - `quill_server` - HTTP boundary
//!
//! This crate re-exports everything for convenience and ships the `quill`
//! binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use quill_error::{
    BuilderError, BuilderErrorKind, ConfigError, QuillError, QuillErrorKind, QuillResult,
    RemoteServiceError, RemoteServiceErrorKind, RetryableError, ServerError, ServerErrorKind,
};

pub use quill_core::{
    AnthropicConfig, BlogPost, CompletionRequest, CompletionRequestBuilder, GenerationChunk,
    GenerationRequest, HttpConfig, Message, NO_TOPIC, PostMetadata, PromptConfig, PromptTemplate,
    QuillConfig, RenderConfig, RetryConfig, Role, TOPIC_PLACEHOLDER, format_prompt,
    init_tracing, sanitize_topic, slugify,
};

pub use quill_interface::{CompletionSource, FragmentStream, StreamingSource};

pub use quill_models::{AnthropicClient, RetryPolicy};

pub use quill_render::{FenceMeta, Highlighter, MarkdownRenderer, RenderOptions};

pub use quill_post::{ChunkStream, FieldExtractor, PostGenerator, materialize};

pub use quill_server::{ApiError, AppState, router, serve};
