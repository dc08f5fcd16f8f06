mod test_utils;

use quill_core::HttpConfig;
use quill_error::QuillErrorKind;
use quill_server::bind;
use serde_json::Value;
use test_utils::{POST_TEXT, Script, TestServer};

#[tokio::test]
async fn test_health() {
    let server = TestServer::start(Script::Text(POST_TEXT)).await;
    let response = reqwest::get(server.url("/health")).await.expect("request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_post_is_rendered() {
    let server = TestServer::start(Script::Text(POST_TEXT)).await;
    let response = reqwest::get(server.url("/blog/rust")).await.expect("request");
    assert_eq!(response.status(), 200);

    let post: Value = response.json().await.expect("json");
    assert_eq!(post["title"], "Hello Rust");
    assert_eq!(post["excerpt"], "A short intro");
    assert_eq!(post["nextPageSlug"], "ownership-basics");
    assert_eq!(post["previousPageSlug"], "cargo-tour");
    let content = post["content"].as_str().expect("content");
    assert!(content.contains("<em>emphasis</em>"));
    assert!(content.contains(r#"data-language="rust""#));
    assert!(post["generatedAt"].is_string());

    assert_eq!(server.source.prompts(), vec!["Write about rust".to_string()]);
}

#[tokio::test]
async fn test_index_uses_default_topic() {
    let server = TestServer::start(Script::Text(POST_TEXT)).await;
    let response = reqwest::get(server.url("/blog")).await.expect("request");
    assert_eq!(response.status(), 200);
    assert_eq!(server.source.prompts(), vec!["Write about Next.js".to_string()]);
}

#[tokio::test]
async fn test_missing_title_is_404() {
    let server = TestServer::start(Script::Text("Sorry, I can't write about that.")).await;
    let response = reqwest::get(server.url("/blog/nothing")).await.expect("request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["topic"], "nothing");
}

#[tokio::test]
async fn test_remote_failure_is_502() {
    let server = TestServer::start(Script::Unavailable).await;
    let response = reqwest::get(server.url("/blog/rust")).await.expect("request");
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"], "upstream");
}

#[tokio::test]
async fn test_stream_emits_chunks_then_final() {
    let server = TestServer::start(Script::Text(POST_TEXT)).await;
    let response = reqwest::get(server.url("/blog/rust/stream")).await.expect("request");
    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let body = response.text().await.expect("body");
    let chunks: Vec<Value> = body
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|data| serde_json::from_str(data).expect("chunk json"))
        .collect();

    assert!(body.contains("event: chunk"));
    assert!(chunks.len() > 1);
    let (last, rest) = chunks.split_last().expect("chunks");
    assert_eq!(last["done"], true);
    assert_eq!(last["title"], "Hello Rust");
    assert_eq!(last["nextPage"], "Ownership Basics");
    assert!(rest.iter().all(|c| c["done"] == false));
}

#[tokio::test]
async fn test_stream_failure_emits_error_event() {
    let server = TestServer::start(Script::Unavailable).await;
    let body = reqwest::get(server.url("/blog/rust/stream"))
        .await
        .expect("request")
        .text()
        .await
        .expect("body");
    assert!(body.contains("event: error"));
    assert!(!body.contains("event: chunk"));
}

#[tokio::test]
async fn test_bind_conflict_is_server_error() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = taken.local_addr().expect("address").port();
    let config = HttpConfig {
        host: "127.0.0.1".to_string(),
        port,
        default_topic: "Next.js".to_string(),
    };

    let err = bind(&config).await.expect_err("port in use");
    assert!(matches!(err.kind(), QuillErrorKind::Server(_)));
}
