//! HTTP boundary for Quill.
//!
//! Serves generated posts over axum:
//!
//! | route                   | response                                   |
//! |-------------------------|--------------------------------------------|
//! | `GET /health`           | `{"status":"ok"}`                          |
//! | `GET /blog`             | post for the configured default topic      |
//! | `GET /blog/:slug`       | post JSON, or 404 when no title was made   |
//! | `GET /blog/:slug/stream`| `chunk` and `error` server-sent events     |
//!
//! Every request regenerates its post. Nothing is cached or stored.
//!
//! # Example
//!
//! ```no_run
//! use quill_core::QuillConfig;
//! use quill_interface::StreamingSource;
//! use quill_server::{AppState, serve};
//! use std::sync::Arc;
//!
//! # async fn example(source: Arc<dyn StreamingSource>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = QuillConfig::load()?;
//! let state = AppState::from_config(source, &config)?;
//! serve(&config.server, state).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use routes::router;
pub use server::{bind, serve, serve_listener};
pub use state::AppState;
