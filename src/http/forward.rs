//! Upstream forwarding.
//!
//! # Responsibilities
//! - Read the caller body when a positive `content-length` is announced
//! - Build the outbound request (method, rewritten URL, filtered headers)
//! - Send it over HTTP/1.1 and hand the response to `response.rs`

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_LENGTH;
use axum::http::{HeaderMap, Request};
use axum::response::Response;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::ShimError;
use crate::http::cors::CorsHeaders;
use crate::http::headers::outbound_headers;
use crate::http::request::RequestIdExt;
use crate::http::response;
use crate::routing::Target;

/// Bytes of the body echoed to the log.
const BODY_PREVIEW_BYTES: usize = 100;

/// Sends rewritten requests upstream.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    max_body_bytes: usize,
    relay_error_body: bool,
}

impl Forwarder {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().http1_only();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            max_body_bytes: config.max_body_bytes,
            relay_error_body: config.relay_error_body,
        })
    }

    /// Forward `request` to `target` and build the caller's response.
    pub async fn forward(
        &self,
        target: &Target<'_>,
        cors: &CorsHeaders,
        request: Request<Body>,
    ) -> Result<Response, ShimError> {
        let request_id = request.request_id().to_string();
        let (parts, body) = request.into_parts();

        let content_length = announced_length(&parts.headers);
        let body = if content_length > 0 {
            Some(
                axum::body::to_bytes(body, self.max_body_bytes)
                    .await
                    .map_err(ShimError::Body)?,
            )
        } else {
            None
        };

        let url = Url::parse(&target.url).map_err(|source| ShimError::Target {
            url: target.url.clone(),
            source,
        })?;

        tracing::info!(
            request_id = %request_id,
            route = target.route.name(),
            method = %parts.method,
            url = %url,
            content_length,
            "Forwarding request"
        );
        match &body {
            Some(bytes) => tracing::debug!(
                request_id = %request_id,
                preview = %body_preview(bytes),
                "Request body"
            ),
            None => tracing::warn!(request_id = %request_id, "Request body is empty"),
        }

        let headers = outbound_headers(&parts.headers, target.route.host());
        let mut outbound = self
            .client
            .request(parts.method.clone(), url)
            .headers(headers);
        if let Some(bytes) = body {
            outbound = outbound.body(bytes);
        }

        let upstream = outbound.send().await?;
        let status = upstream.status();
        tracing::info!(request_id = %request_id, status = %status, "Upstream responded");

        if status.is_client_error() || status.is_server_error() {
            let body = if self.relay_error_body {
                upstream.bytes().await?
            } else {
                Bytes::new()
            };
            return Ok(response::upstream_error(status, body, cors));
        }

        let headers = upstream.headers().clone();
        let body = upstream.bytes().await?;
        Ok(response::relay(status, &headers, body, cors))
    }
}

/// Parsed `content-length`; absent or malformed counts as zero.
fn announced_length(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn body_preview(body: &[u8]) -> String {
    let end = body.len().min(BODY_PREVIEW_BYTES);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
