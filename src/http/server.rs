//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the shim handler
//! - Wire up middleware (tracing, request ID, in-flight limit)
//! - Bind server to listener
//! - Dispatch requests: pre-flight, route lookup, forwarding

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ShimConfig;
use crate::http::cors::{CorsHeaders, InvalidCorsValue};
use crate::http::forward::Forwarder;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::routing::{RouteError, RouteTable};

/// Error raised while assembling the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Cors(#[from] InvalidCorsValue),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
    pub cors: Arc<CorsHeaders>,
}

/// HTTP server for the forwarding shim.
pub struct HttpServer {
    router: Router,
    config: ShimConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ShimConfig) -> Result<Self, ServerError> {
        let state = AppState {
            routes: Arc::new(RouteTable::from_config(&config.routes)?),
            forwarder: Forwarder::new(&config.upstream)?,
            cors: Arc::new(CorsHeaders::from_config(&config.cors)?),
        };

        for route in state.routes.routes() {
            tracing::info!(
                route = route.name(),
                prefix = route.prefix(),
                upstream = route.origin(),
                "Route installed"
            );
        }

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ShimConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(shim_handler))
            .route("/", any(shim_handler))
            .with_state(state)
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_in_flight))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for driving the shim without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_in_flight = self.config.listener.max_in_flight,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn is_forwardable(method: &Method) -> bool {
    [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
    ]
    .contains(method)
}

/// Main shim handler.
/// Answers pre-flight, looks up the route (404 on no match whatever the
/// method), rejects methods it cannot forward, and forwards the request.
async fn shim_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::OPTIONS {
        tracing::debug!(request_id = %request_id, path = %path, "Answering pre-flight");
        return state.cors.preflight();
    }

    let Some(target) = state.routes.resolve(request.uri()) else {
        tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    if !is_forwardable(&method) {
        tracing::warn!(request_id = %request_id, method = %method, "Unsupported method");
        return (
            StatusCode::NOT_IMPLEMENTED,
            format!("Unsupported method ({method})"),
        )
            .into_response();
    }

    match state.forwarder.forward(&target, &state.cors, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                url = %target.url,
                error = %e,
                "Forwarding failed"
            );
            e.into_response()
        }
    }
}
