//! Listener setup and the serve loop.

use crate::{AppState, router};
use quill_core::HttpConfig;
use quill_error::{QuillResult, ServerError, ServerErrorKind};
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Bind the configured address.
///
/// # Errors
///
/// Returns a server error when the address cannot be bound.
#[instrument(skip_all, fields(host = %config.host, port = config.port))]
pub async fn bind(config: &HttpConfig) -> QuillResult<TcpListener> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: address.clone(),
            message: e.to_string(),
        })
    })?;
    Ok(listener)
}

/// Serve on an already bound listener until Ctrl-C.
pub async fn serve_listener(listener: TcpListener, state: AppState) -> QuillResult<()> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "Quill server listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;
    info!("Quill server stopped");
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &HttpConfig, state: AppState) -> QuillResult<()> {
    let listener = bind(config).await?;
    serve_listener(listener, state).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the task is dropped.
        std::future::pending::<()>().await;
    }
}
