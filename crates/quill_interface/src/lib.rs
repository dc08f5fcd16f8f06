//! Trait seams between generation and the completion service.
//!
//! A [`CompletionSource`] turns a [`quill_core::CompletionRequest`] into text.
//! Sources that can deliver text incrementally also implement
//! [`StreamingSource`], yielding fragments in the order the service emits
//! them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{CompletionSource, FragmentStream, StreamingSource};
