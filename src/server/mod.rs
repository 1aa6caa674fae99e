//! HTTP server for PrivChat.
//!
//! This module exposes the gateway over HTTP:
//!
//! - `POST /process` - redact a prompt, forward it to the model, return
//!   entities, highlighted markup, and the model reply
//! - `GET /health` - liveness probe reporting the active model
//!
//! The server holds one shared [`handlers::AppState`] (an `Arc` around the
//! prompt processor); request handling is stateless beyond that.

pub mod handlers;
pub mod models;

pub use handlers::AppState;
pub use models::{EntityView, HealthResponse, ProcessRequest, ProcessResponse};

use crate::config::ServerConfig;
use crate::domain::{PrivChatError, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(handlers::process_prompt))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Bind the listener and serve until the shutdown signal fires
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server loop
/// fails.
pub async fn serve(
    config: &ServerConfig,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr = config.bind_address();

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        PrivChatError::Configuration(format!("Failed to bind {addr}: {e}"))
    })?;

    tracing::info!(addr = %addr, "PrivChat gateway listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
            tracing::info!("Shutdown signal received, draining connections");
        })
        .await?;

    Ok(())
}
