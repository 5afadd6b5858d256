//! HTTP API for saving, searching and asking about memories
//!
//! Every route is scoped to a user id taken from the path; the server keeps
//! no notion of a current user.

pub mod handlers;

use axum::{
    Json, Router,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Mutex as TokioMutex;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{PickleError, Result};
use crate::oracle::HybridAnswerer;
use crate::storage::JsonStore;

/// Shared application state for all handlers
pub struct AppState {
    /// Storage backend for memories
    pub store: Arc<TokioMutex<JsonStore>>,
    /// Remote-first answerer with local fallback
    pub answerer: Arc<HybridAnswerer>,
}

/// The HTTP API server
pub struct ApiServer {
    config: ServerConfig,
    store: Arc<TokioMutex<JsonStore>>,
    answerer: Arc<HybridAnswerer>,
}

impl ApiServer {
    pub fn new(
        config: ServerConfig,
        store: Arc<TokioMutex<JsonStore>>,
        answerer: Arc<HybridAnswerer>,
    ) -> Self {
        Self {
            config,
            store,
            answerer,
        }
    }

    /// Start the server and listen until Ctrl+C or SIGTERM
    pub async fn serve(&self) -> Result<()> {
        let state = Arc::new(AppState {
            store: self.store.clone(),
            answerer: self.answerer.clone(),
        });

        let app = create_router(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(self.config.timeout_secs))),
        );

        let addr: SocketAddr = self
            .config
            .listen_addr
            .parse()
            .map_err(|e| PickleError::Config(format!("Invalid listen address: {e}")))?;

        if self.answerer.has_remote() {
            tracing::info!("Remote answering enabled, local engine as fallback");
        } else {
            tracing::info!("Remote answering unavailable, using local engine only");
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| PickleError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!("Listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| PickleError::Server(format!("Server error: {e}")))?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/users/{user_id}/memories",
            get(handlers::list_memories_handler).post(handlers::create_memory_handler),
        )
        .route(
            "/users/{user_id}/memories/{memory_id}",
            delete(handlers::delete_memory_handler),
        )
        .route("/users/{user_id}/ask", post(handlers::ask_handler))
        .with_state(state)
}

/// Health check endpoint - returns JSON status
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Error returned by API handlers, rendered as a JSON error body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error_type: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(error_type: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error_type,
            message: message.into(),
        }
    }

    pub fn not_found(error_type: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error_type,
            message: message.into(),
        }
    }
}

impl From<PickleError> for ApiError {
    fn from(e: PickleError) -> Self {
        match e {
            PickleError::Memory(message) => Self::bad_request("invalid_memory", message),
            other => {
                tracing::error!("Request failed: {other}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error_type: "internal_error",
                    message: other.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        create_error_response(self.status, self.error_type, &self.message)
    }
}

fn create_error_response(status: StatusCode, error_type: &str, message: &str) -> Response<Body> {
    let body = serde_json::json!({
        "error": {
            "type": error_type,
            "message": message,
        }
    });

    (status, Json(body)).into_response()
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
