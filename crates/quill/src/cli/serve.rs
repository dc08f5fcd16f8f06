//! HTTP server command handler.

use quill::{AnthropicClient, AppState, QuillConfig};
use std::sync::Arc;
use tracing::info;

/// Serve posts until Ctrl-C, with optional address overrides.
pub async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = QuillConfig::load()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let client = AnthropicClient::from_config(&config.anthropic, &config.retry)?;
    info!(model = %config.anthropic.model, "Completion client ready");

    let state = AppState::from_config(Arc::new(client), &config)?;
    quill::serve(&config.server, state).await?;
    Ok(())
}
