//! In-process server harness with a scripted completion source.

#![allow(dead_code)]

use async_trait::async_trait;
use futures_util::stream;
use quill_core::{CompletionRequest, QuillConfig};
use quill_error::{QuillResult, RemoteServiceError, RemoteServiceErrorKind};
use quill_interface::{CompletionSource, FragmentStream, StreamingSource};
use quill_server::{AppState, serve_listener};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const POST_TEXT: &str = "TITLE: Hello Rust\nEXCERPT: A short intro\nCONTENT: Some `code` and *emphasis*.\n\n```rust\nfn main() {}\n```\nNEXT_PAGE: Ownership Basics\nPREVIOUS_PAGE: Cargo Tour";

/// How the scripted source answers.
#[derive(Debug, Clone)]
pub enum Script {
    /// Stream this text in small fragments
    Text(&'static str),
    /// Fail the request outright
    Unavailable,
}

pub struct ScriptedSource {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, request: &CompletionRequest) {
        let prompt = request.messages()[0].content.clone();
        self.prompts.lock().unwrap().push(prompt);
    }

    fn unavailable() -> RemoteServiceError {
        RemoteServiceError::new(RemoteServiceErrorKind::Status {
            status: 529,
            message: "overloaded".to_string(),
        })
    }
}

#[async_trait]
impl CompletionSource for ScriptedSource {
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String> {
        self.record(request);
        match self.script {
            Script::Text(text) => Ok(text.to_string()),
            Script::Unavailable => Err(Self::unavailable().into()),
        }
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
        self.record(request);
        match self.script {
            Script::Text(text) => {
                let fragments: Vec<QuillResult<String>> = text
                    .as_bytes()
                    .chunks(16)
                    .map(|piece| Ok(String::from_utf8_lossy(piece).into_owned()))
                    .collect();
                Ok(Box::pin(stream::iter(fragments)))
            }
            Script::Unavailable => Err(Self::unavailable().into()),
        }
    }
}

pub struct TestServer {
    pub base_url: String,
    pub source: Arc<ScriptedSource>,
}

impl TestServer {
    /// Start a server on an ephemeral port.
    pub async fn start(script: Script) -> Self {
        let source = Arc::new(ScriptedSource::new(script));
        let mut config = QuillConfig::bundled().expect("bundled config");
        config.prompt.template = "Write about {{topic}}".to_string();
        config.server.default_topic = "Next.js".to_string();

        let state = AppState::from_config(source.clone(), &config).expect("state");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address: SocketAddr = listener.local_addr().expect("address");
        tokio::spawn(serve_listener(listener, state));

        Self {
            base_url: format!("http://{}", address),
            source,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
