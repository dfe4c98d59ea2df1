//! HTTP service exposing the repository queries as JSON endpoints.

pub mod api;

use axum::{routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::github::{DateQualifier, GitHubClient};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Shared by every request; holds nothing mutable.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: GitHubClient,
    pub date_qualifier: DateQualifier,
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<(), ServerError> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/pull-requests/:count", get(api::recent_pull_requests))
        .route("/pull-requests-by-date", get(api::pull_requests_by_date))
        .route("/contributors", get(api::contributors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
