//! In-process stand-in for the Anthropic Messages API.
//!
//! Replies are served in order; once exhausted the last reply repeats.

#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use quill_core::{AnthropicConfig, RetryConfig};
use serde_json::{Value, json};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Body of a scripted reply.
#[derive(Debug, Clone)]
pub enum MockBody {
    /// Sent in one piece
    Full(String),
    /// Sent as separate body chunks
    Chunks(Vec<Vec<u8>>),
    /// Text deltas repeated until the client goes away
    Endless(String),
}

/// One scripted HTTP reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: MockBody,
}

impl MockReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: MockBody::Full(body.to_string()),
        }
    }

    pub fn message(text: &str) -> Self {
        Self::json(
            200,
            json!({
                "id": "msg_test",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": text}],
                "stop_reason": "end_turn"
            }),
        )
    }

    pub fn api_error(status: u16, error_type: &str, message: &str) -> Self {
        Self::json(
            status,
            json!({"type": "error", "error": {"type": error_type, "message": message}}),
        )
    }

    pub fn sse(events: &[Value]) -> Self {
        Self {
            status: 200,
            content_type: "text/event-stream",
            body: MockBody::Full(encode_events(events)),
        }
    }

    pub fn sse_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: "text/event-stream",
            body: MockBody::Chunks(chunks),
        }
    }
}

impl MockReply {
    pub fn endless_sse(fragment: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/event-stream",
            body: MockBody::Endless(fragment.to_string()),
        }
    }
}

/// Counts response bodies the server dropped, i.e. connections that closed.
struct BodyGuard(Arc<AtomicUsize>);

impl Drop for BodyGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Encode events the way the Messages API frames them.
pub fn encode_events(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| {
            format!(
                "event: {}\ndata: {}\n\n",
                event["type"].as_str().unwrap_or("unknown"),
                event
            )
        })
        .collect()
}

/// A full text stream: start, one delta per fragment, stop.
pub fn text_stream_events(fragments: &[&str]) -> Vec<Value> {
    let mut events = vec![
        json!({"type": "message_start", "message": {"id": "msg_test", "content": []}}),
        json!({"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}}),
        json!({"type": "ping"}),
    ];
    events.extend(fragments.iter().map(|text| {
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": text}})
    }));
    events.push(json!({"type": "content_block_stop", "index": 0}));
    events.push(json!({"type": "message_delta", "delta": {"stop_reason": "end_turn"}}));
    events.push(json!({"type": "message_stop"}));
    events
}

/// A request as observed by the mock.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub api_key: Option<String>,
    pub version: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    replies: Arc<Vec<MockReply>>,
    hits: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    bodies_dropped: Arc<AtomicUsize>,
}

/// Running mock server.
pub struct MockAnthropic {
    pub url: String,
    state: MockState,
}

impl MockAnthropic {
    pub async fn start(replies: Vec<MockReply>) -> Self {
        let state = MockState {
            replies: Arc::new(replies),
            hits: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
            bodies_dropped: Arc::new(AtomicUsize::new(0)),
        };
        let app = Router::new()
            .route("/v1/messages", post(messages))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Number of endless bodies abandoned because the client disconnected.
    pub fn bodies_dropped(&self) -> usize {
        self.state.bodies_dropped.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn config(&self) -> AnthropicConfig {
        AnthropicConfig {
            api_key: "test-key".to_string(),
            model: "claude-test".to_string(),
            api_url: self.url.clone(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            ..AnthropicConfig::default()
        }
    }
}

/// Retry settings with millisecond backoff.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        enabled: true,
        max_retries: 3,
        initial_backoff_ms: 1,
        max_delay_secs: 1,
    }
}

async fn messages(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.seen.lock().unwrap().push(SeenRequest {
        api_key: header_value("x-api-key"),
        version: header_value("anthropic-version"),
        body,
    });

    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    let reply = state.replies[hit.min(state.replies.len() - 1)].clone();
    let status = StatusCode::from_u16(reply.status).unwrap();

    let body = match reply.body {
        MockBody::Full(text) => Body::from(text),
        MockBody::Chunks(chunks) => Body::from_stream(futures_util::stream::iter(
            chunks.into_iter().map(Ok::<_, std::io::Error>),
        )),
        MockBody::Endless(fragment) => {
            let guard = BodyGuard(Arc::clone(&state.bodies_dropped));
            let start = encode_events(&text_stream_events(&[])[..3]);
            let delta = encode_events(&[json!({
                "type": "content_block_delta",
                "index": 0,
                "delta": {"type": "text_delta", "text": fragment},
            })]);
            let head = futures_util::stream::once(async move { Ok(start.into_bytes()) });
            let tail = futures_util::stream::unfold(guard, move |guard| {
                let delta = delta.clone();
                async move {
                    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                    Some((Ok::<_, std::io::Error>(delta.into_bytes()), guard))
                }
            });
            Body::from_stream(futures_util::StreamExt::chain(head, tail))
        }
    };

    (status, [(header::CONTENT_TYPE, reply.content_type)], body).into_response()
}
