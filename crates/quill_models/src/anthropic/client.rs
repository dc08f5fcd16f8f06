use super::dto::AnthropicErrorResponse;
use crate::{
    AnthropicDelta, AnthropicRequest, AnthropicResponse, AnthropicStreamEvent, RetryPolicy,
    SseDecoder, SseEvent,
};
use futures_util::StreamExt;
use quill_core::{AnthropicConfig, CompletionRequest, RetryConfig};
use quill_error::{
    ConfigError, QuillError, QuillResult, RemoteServiceError, RemoteServiceErrorKind,
};
use quill_interface::{CompletionSource, FragmentStream, StreamingSource};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/v1/messages";

/// Anthropic API client.
///
/// Wraps a pooled [`reqwest::Client`]; clone it or share it behind an `Arc`
/// rather than building one per request.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    messages_url: String,
    version: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("model", &self.model)
            .field("messages_url", &self.messages_url)
            .field("version", &self.version)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl AnthropicClient {
    /// Creates a new Anthropic client against the public API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-3-5-sonnet-20241022")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> QuillResult<Self> {
        let config = AnthropicConfig {
            api_key: api_key.into(),
            model: model.into(),
            api_url: ANTHROPIC_API_URL.to_string(),
            version: ANTHROPIC_VERSION.to_string(),
            ..AnthropicConfig::default()
        };
        Self::from_config(&config, &RetryConfig::default())
    }

    /// Creates a client from configuration sections.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the API key is empty or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &AnthropicConfig, retry: &RetryConfig) -> QuillResult<Self> {
        if config.api_key.trim().is_empty() {
            Err(ConfigError::new("Anthropic API key is empty"))?
        }

        debug!(api_url = %config.api_url, "Creating new Anthropic client");

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                QuillError::from(ConfigError::new(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            messages_url: format!("{}{}", config.api_url.trim_end_matches('/'), MESSAGES_PATH),
            version: config.version.clone(),
            retry: RetryPolicy::from(retry),
        })
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Send one request and check its status.
    async fn send_once(&self, body: &AnthropicRequest) -> Result<Response, RemoteServiceError> {
        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.version)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Anthropic API");
                transport_error(e)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<AnthropicErrorResponse>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or(text);
        error!(status = %status, message = %message, "Anthropic API returned error");
        Err(RemoteServiceError::new(RemoteServiceErrorKind::Status {
            status: status.as_u16(),
            message,
        }))
    }

    /// Send a request, retrying transient failures before any body is read.
    #[instrument(skip(self, body), fields(model = %body.model(), stream = body.stream()))]
    async fn send(&self, body: &AnthropicRequest) -> Result<Response, RemoteServiceError> {
        debug!("Sending request to Anthropic API");
        self.retry.run(|| self.send_once(body)).await
    }
}

fn transport_error(e: reqwest::Error) -> RemoteServiceError {
    if e.is_timeout() {
        RemoteServiceError::new(RemoteServiceErrorKind::Timeout(e.to_string()))
    } else {
        RemoteServiceError::new(RemoteServiceErrorKind::Network(e.to_string()))
    }
}

/// What a decoded stream event means for the fragment sequence.
#[derive(Debug, PartialEq, Eq)]
enum StreamStep {
    Fragment(String),
    Skip,
    Stop,
}

fn interpret(event: &SseEvent) -> Result<StreamStep, RemoteServiceError> {
    let parsed: AnthropicStreamEvent = serde_json::from_str(&event.data).map_err(|e| {
        RemoteServiceError::new(RemoteServiceErrorKind::Malformed(format!(
            "Failed to parse stream event {:?}: {}",
            event.event, e
        )))
    })?;

    match parsed {
        AnthropicStreamEvent::ContentBlockDelta {
            delta: AnthropicDelta::TextDelta { text },
            ..
        } => Ok(StreamStep::Fragment(text)),
        AnthropicStreamEvent::MessageStop => Ok(StreamStep::Stop),
        AnthropicStreamEvent::Error { error } => {
            Err(RemoteServiceError::new(RemoteServiceErrorKind::StreamEvent {
                error_type: error.error_type,
                message: error.message,
            }))
        }
        _ => Ok(StreamStep::Skip),
    }
}

/// Turn an open event-stream response into text fragments.
///
/// The response is moved into the stream, so dropping the stream closes the
/// connection.
fn fragment_stream(response: Response) -> FragmentStream {
    Box::pin(async_stream::stream! {
        let mut bytes = Box::pin(response.bytes_stream());
        let mut decoder = SseDecoder::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    error!(error = ?e, "Event stream interrupted");
                    yield Err(QuillError::from(transport_error(e)));
                    return;
                }
            };

            let events = match decoder.push(&chunk) {
                Ok(events) => events,
                Err(e) => {
                    yield Err(QuillError::from(e));
                    return;
                }
            };

            for event in events {
                match interpret(&event) {
                    Ok(StreamStep::Fragment(text)) => {
                        yield Ok(text);
                    }
                    Ok(StreamStep::Skip) => {}
                    Ok(StreamStep::Stop) => {
                        debug!("Event stream finished");
                        return;
                    }
                    Err(e) => {
                        error!(error = %e, "Event stream reported failure");
                        yield Err(QuillError::from(e));
                        return;
                    }
                }
            }
        }

        // The body may end without the blank line after its last event
        match decoder.finish() {
            Ok(Some(event)) => match interpret(&event) {
                Ok(StreamStep::Fragment(text)) => {
                    yield Ok(text);
                }
                Ok(StreamStep::Skip) => {}
                Ok(StreamStep::Stop) => {
                    debug!("Event stream finished without trailing delimiter");
                    return;
                }
                Err(e) => {
                    error!(error = %e, "Event stream reported failure");
                    yield Err(QuillError::from(e));
                    return;
                }
            },
            Ok(None) => {}
            Err(e) => {
                yield Err(QuillError::from(e));
                return;
            }
        }

        warn!("Event stream closed before message_stop");
        yield Err(QuillError::from(RemoteServiceError::new(
            RemoteServiceErrorKind::Network("connection closed before message_stop".to_string()),
        )));
    })
}

#[async_trait::async_trait]
impl CompletionSource for AnthropicClient {
    #[instrument(skip(self, request), fields(model = %request.model()))]
    async fn complete(&self, request: &CompletionRequest) -> QuillResult<String> {
        debug!("Requesting completion from Anthropic");

        let body = AnthropicRequest::from_completion(request, false);
        let response = self.send(&body).await?;

        let anthropic_response: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            RemoteServiceError::new(RemoteServiceErrorKind::Malformed(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(
            response_id = %anthropic_response.id(),
            stop_reason = ?anthropic_response.stop_reason(),
            "Received response from Anthropic"
        );
        Ok(anthropic_response.text())
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl StreamingSource for AnthropicClient {
    #[instrument(skip(self, request), fields(model = %request.model()))]
    async fn stream(&self, request: &CompletionRequest) -> QuillResult<FragmentStream> {
        debug!("Opening Anthropic event stream");

        let body = AnthropicRequest::from_completion(request, true);
        let response = self.send(&body).await?;
        Ok(fragment_stream(response))
    }
}
