//! Markdown rendering for generated posts.
//!
//! Converts Markdown to HTML with GitHub-flavoured extensions, escapes raw
//! HTML, neutralises script-bearing links and highlights code with syntect.
//!
//! # Example
//!
//! ```
//! use quill_render::{MarkdownRenderer, RenderOptions};
//!
//! let renderer = MarkdownRenderer::new(RenderOptions::default());
//! let html = renderer.render("# Hello\n\n```rust\nfn main() {}\n```\n");
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains(r#"data-language="rust""#));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod escape;
mod highlight;
mod meta;
mod options;
mod renderer;

pub use highlight::Highlighter;
pub use meta::FenceMeta;
pub use options::{RenderOptions, RenderOptionsBuilder};
pub use renderer::MarkdownRenderer;
