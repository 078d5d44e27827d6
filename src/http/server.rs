//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the rss and healthcheck handlers
//! - Wire up middleware (request ID, timeout, tracing)
//! - Select the outbound request decorator for this deployment
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EdgeConfig;
use crate::http::handlers;
use crate::middletier::MiddletierClient;
use crate::observability::{NoopDecorator, RequestDecorator, RequestIdPropagator};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub middletier: MiddletierClient,
}

/// HTTP server for the edge service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Self {
        let decorator: Arc<dyn RequestDecorator> = if config.observability.propagate_request_id {
            Arc::new(RequestIdPropagator)
        } else {
            Arc::new(NoopDecorator)
        };

        let middletier = MiddletierClient::new(config.middletier.address.clone(), decorator);
        let state = AppState { middletier };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/jsp/rss.jsp", get(handlers::rss))
            .route("/healthcheck", get(handlers::healthcheck))
            .with_state(state)
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
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

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
