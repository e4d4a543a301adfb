//! Per-request failures.
//!
//! None of these are fatal: each becomes a 500 whose body is the error text,
//! so the browser sees what went wrong upstream.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    /// Connection refused, DNS failure, timeout, malformed response.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Caller body could not be read (disconnect or over the size limit).
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("invalid upstream url `{url}`: {source}")]
    Target {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl IntoResponse for ShimError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
