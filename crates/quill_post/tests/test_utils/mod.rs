//! Scripted completion sources for generator tests.

#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::stream;
use quill_core::CompletionRequest;
use quill_error::{QuillResult, RemoteServiceError, RemoteServiceErrorKind};
use quill_interface::{CompletionSource, FragmentStream, StreamingSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// The reference response used across extraction tests.
pub const REFERENCE_TEXT: &str =
    "TITLE: A\nEXCERPT: B\nCONTENT: C\nNEXT_PAGE: n\nPREVIOUS_PAGE: p";

/// Replays a fixed response, optionally failing partway.
pub struct ScriptedSource {
    fragments: Vec<String>,
    fail_after: Option<usize>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedSource {
    pub fn new(fragments: Vec<String>) -> Self {
        Self {
            fragments,
            fail_after: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// One fragment per character.
    pub fn char_by_char(text: &str) -> Self {
        Self::new(text.chars().map(String::from).collect())
    }

    /// Yield `count` fragments, then a network error.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionSource for ScriptedSource {
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.fragments.concat())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

#[async_trait]
impl StreamingSource for ScriptedSource {
    async fn stream(&self, request: &CompletionRequest) -> QuillResult<FragmentStream> {
        self.requests.lock().unwrap().push(request.clone());
        let mut items: Vec<QuillResult<String>> = self.fragments.iter().cloned().map(Ok).collect();
        if let Some(count) = self.fail_after {
            items.truncate(count);
            items.push(Err(RemoteServiceError::new(RemoteServiceErrorKind::Network(
                "connection reset".to_string(),
            ))
            .into()));
        }
        Ok(Box::pin(stream::iter(items)))
    }
}

/// Writes a post about whatever topic the prompt names, one character at a
/// time, yielding to the scheduler between characters.
pub struct TopicEchoSource;

impl TopicEchoSource {
    pub fn response_for(prompt: &str) -> String {
        format!(
            "TITLE: {p}\nEXCERPT: About {p}\nCONTENT: Body of {p}\nNEXT_PAGE: {p} next\nPREVIOUS_PAGE: {p} previous",
            p = prompt
        )
    }
}

fn prompt_of(request: &CompletionRequest) -> String {
    request
        .messages()
        .first()
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

#[async_trait]
impl CompletionSource for TopicEchoSource {
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String> {
        Ok(Self::response_for(&prompt_of(request)))
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-1"
    }
}

#[async_trait]
impl StreamingSource for TopicEchoSource {
    async fn stream(&self, request: &CompletionRequest) -> QuillResult<FragmentStream> {
        let text = Self::response_for(&prompt_of(request));
        Ok(Box::pin(async_stream::stream! {
            for c in text.chars() {
                tokio::task::yield_now().await;
                yield Ok(c.to_string());
            }
        }))
    }
}

/// Sets its flag when the fragment stream holding it is dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Repeats one fragment forever and records when its stream is released.
pub struct EndlessSource {
    released: Arc<AtomicBool>,
}

impl EndlessSource {
    pub fn new() -> Self {
        Self {
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionSource for EndlessSource {
    async fn complete(&self, _request: &CompletionRequest) -> QuillResult<String> {
        Ok("TITLE: Endless\nEXCERPT: ".to_string())
    }

    fn provider_name(&self) -> &'static str {
        "endless"
    }

    fn model_name(&self) -> &str {
        "endless-1"
    }
}

#[async_trait]
impl StreamingSource for EndlessSource {
    async fn stream(&self, _request: &CompletionRequest) -> QuillResult<FragmentStream> {
        let flag = DropFlag(Arc::clone(&self.released));
        Ok(Box::pin(stream::unfold(flag, |flag| async move {
            tokio::task::yield_now().await;
            Some((QuillResult::Ok("word ".to_string()), flag))
        })))
    }
}
