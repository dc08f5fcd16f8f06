//! Error types for the Quill blog generation service.
//!
//! This crate provides the foundation error types used throughout the Quill workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! A missing delimiter in a model response is not an error:
//! extraction degrades to empty fields instead.
//!
//! # Examples
//!
//! ```
//! use quill_error::{QuillResult, ConfigError};
//!
//! fn load_template() -> QuillResult<String> {
//!     Err(ConfigError::new("prompt template is empty"))?
//! }
//!
//! let err = load_template().unwrap_err();
//! assert!(err.is_config());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod remote;
mod server;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{QuillError, QuillErrorKind, QuillResult};
pub use remote::{RemoteServiceError, RemoteServiceErrorKind, RetryableError};
pub use server::{ServerError, ServerErrorKind};
