//! Authentication header probe against the remote worksheet API.
//!
//! Sends one POST per [`ProbeCase`] and reports status plus the start of the
//! response body. No retries: a failed case is reported and the next one
//! still runs.

pub mod cases;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;

pub use cases::{
    standard_cases, AuthPlacement, Credentials, ProbeCase, ProbeTarget, RowUpdate,
    DEFAULT_API_BASE,
};

/// Characters of the response body kept in a report.
pub const BODY_PREVIEW_CHARS: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("`{0}` is not a valid header name")]
    HeaderName(&'static str),

    #[error("credential for `{0}` is not a valid header value")]
    Credential(&'static str),
}

#[derive(Debug)]
pub struct ProbeOutcome {
    pub status: StatusCode,
    pub body: String,
}

impl ProbeOutcome {
    /// The body cut to [`BODY_PREVIEW_CHARS`] characters.
    pub fn preview(&self) -> &str {
        truncate_chars(&self.body, BODY_PREVIEW_CHARS)
    }
}

/// Longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Request headers for a case: JSON content type, plus credentials when
/// they travel as headers.
pub fn case_headers(case: &ProbeCase, credentials: &Credentials) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if case.placement == AuthPlacement::Header {
        for (name, raw) in [
            (case.app_key_name, &credentials.app_key),
            (cases::SIGN, &credentials.sign),
        ] {
            // The http crate stores names lowercased; the casing is lost here.
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ProbeError::HeaderName(name))?;
            let value = HeaderValue::from_str(raw).map_err(|_| ProbeError::Credential(name))?;
            headers.insert(header, value);
        }
    }
    Ok(headers)
}

/// Run one case.
pub async fn run_case(
    client: &reqwest::Client,
    case: &ProbeCase,
    credentials: &Credentials,
    payload: &RowUpdate,
) -> Result<ProbeOutcome, ProbeError> {
    let response = client
        .post(case.request_url(credentials))
        .headers(case_headers(case, credentials)?)
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    Ok(ProbeOutcome { status, body })
}
