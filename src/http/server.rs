//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, metrics, database gate)
//! - Bind the server to a listener with graceful shutdown

use std::sync::Arc;

use axum::middleware;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::db::DataSource;
use crate::http::middleware::db_gate::{db_gate, GateState};
use crate::http::middleware::track::track_requests;
use crate::http::todos;

/// HTTP server for the todo service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// database source.
    pub fn new(config: &ServiceConfig, source: Arc<dyn DataSource>) -> Self {
        let gate = GateState {
            source,
            config: config.gate.clone(),
        };
        Self {
            router: build_router(gate),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the router with all middleware layers.
///
/// Layer order (outermost first): trace, metrics, gate. The metrics layer
/// therefore observes gate aborts, and the gate span nests under the HTTP
/// request span.
pub fn build_router(gate: GateState) -> Router {
    Router::new()
        .route("/", post(todos::create_todo).get(todos::list_todos))
        .route("/{id}", post(todos::update_todo))
        .layer(middleware::from_fn_with_state(gate, db_gate))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
