//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router for the dashboard API
//! - Wire up middleware (request ID, tracing, timeout, CORS)
//! - Serve until the shutdown signal fires

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ListenerConfig;
use crate::http::handlers;
use crate::lifecycle::ShutdownSignal;
use crate::workflow::WorkflowOrchestrator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<WorkflowOrchestrator>,
}

/// Build the API router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/state", get(handlers::get_state))
        .route("/api/chain/refresh", post(handlers::refresh_chain))
        .route("/api/transactions/pending", put(handlers::edit_pending))
        .route("/api/transactions", post(handlers::submit_transaction))
        .route("/api/mine", post(handlers::mine))
        .route("/api/contracts/deploy", post(handlers::deploy_contract))
        .route("/api/contracts/selected", put(handlers::select_contract))
        .route("/api/contracts/execute", post(handlers::execute_contract))
        .route("/api/contracts/state", post(handlers::read_contract_state))
        .route("/api/error", delete(handlers::dismiss_error))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CorsLayer::permissive())
}

/// HTTP server for the dashboard API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(orchestrator: Arc<WorkflowOrchestrator>, config: &ListenerConfig) -> Self {
        let state = AppState { orchestrator };
        let router = build_router(state, Duration::from_secs(config.request_timeout_secs));
        Self { router }
    }

    /// The router, for serving elsewhere or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
