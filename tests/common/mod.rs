//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use cors_shim::config::{RouteConfig, ShimConfig};

/// What the mock upstream answers with.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: &'static str,
    /// Lowercase header names.
    pub headers: Vec<(&'static str, &'static str)>,
    pub delay: Option<Duration>,
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            status: 200,
            body: r#"{"success":true}"#,
            headers: vec![("content-type", "application/json")],
            delay: None,
        }
    }
}

/// A request as the upstream saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct MockState {
    reply: Reply,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Mock upstream on an ephemeral port that records every request.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new().fallback(record).with_state(MockState {
            reply,
            requests: requests.clone(),
        });
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, requests }
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(State(mock): State<MockState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    mock.requests.lock().unwrap().push(Recorded {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    });

    if let Some(delay) = mock.reply.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = Response::new(Body::from(mock.reply.body));
    *response.status_mut() = StatusCode::from_u16(mock.reply.status).unwrap();
    for (name, value) in &mock.reply.headers {
        response
            .headers_mut()
            .append(*name, HeaderValue::from_static(value));
    }
    response
}

/// Shim configuration with one `/api/mingdao` route pointed at `upstream`.
pub fn shim_config(upstream: &str) -> ShimConfig {
    let mut config = ShimConfig::with_default_route();
    config.routes = vec![RouteConfig {
        upstream: upstream.to_string(),
        ..RouteConfig::default()
    }];
    config.upstream.use_system_proxy = false;
    config
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
