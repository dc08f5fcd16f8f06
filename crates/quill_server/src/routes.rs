//! Route handlers.

use crate::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use futures_util::{Stream, StreamExt};
use quill_core::BlogPost;
use serde_json::json;
use std::convert::Infallible;
use tracing::{info, instrument, warn};

/// Build the router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/blog", get(index))
        .route("/blog/:slug", get(post))
        .route("/blog/:slug/stream", get(post_stream))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn index(State(state): State<AppState>) -> Result<Json<BlogPost>, ApiError> {
    resolve(&state, state.default_topic()).await
}

async fn post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    resolve(&state, &slug).await
}

#[instrument(skip(state))]
async fn resolve(state: &AppState, topic: &str) -> Result<Json<BlogPost>, ApiError> {
    match state.generator().resolve(topic, state.renderer()).await? {
        Some(post) => {
            info!(title = %post.title, "Serving post");
            Ok(Json(post))
        }
        None => Err(ApiError::NotFound(topic.to_string())),
    }
}

/// Stream chunks as `chunk` events; a failure becomes one `error` event.
async fn post_stream(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(topic = %slug, "Streaming post");
    let events = state.generator().stream(&slug).map(|item| {
        let event = match item {
            Ok(chunk) => Event::default()
                .event("chunk")
                .json_data(&chunk)
                .unwrap_or_else(|e| Event::default().event("error").data(e.to_string())),
            Err(e) => {
                warn!(error = %e, "Generation stream failed");
                Event::default().event("error").data(e.kind().to_string())
            }
        };
        Ok(event)
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}
