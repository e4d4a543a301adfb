//! Header filtering in both directions.
//!
//! # Responsibilities
//! - Strip caller headers that would leak the browser origin upstream
//! - Pin `host` and `content-type` on the outbound request
//! - Strip hop-by-hop headers (the client and server own framing)
//! - Drop the upstream's own `access-control-allow-origin`

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, HOST, ORIGIN,
    PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, REFERER, TE, TRAILER, TRANSFER_ENCODING, UPGRADE,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Caller headers never copied to the upstream request.
fn is_browser_scoped(name: &HeaderName) -> bool {
    [HOST, ORIGIN, REFERER, CONTENT_LENGTH].contains(name)
}

/// Connection-scoped headers (RFC 9110 §7.6.1 plus the legacy names).
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    [
        CONNECTION,
        TRANSFER_ENCODING,
        TE,
        TRAILER,
        UPGRADE,
        PROXY_AUTHENTICATE,
        PROXY_AUTHORIZATION,
    ]
    .contains(name)
        || matches!(name.as_str(), "keep-alive" | "proxy-connection")
}

/// Headers for the upstream request.
///
/// Every caller header is copied except `host`, `origin`, `referer`,
/// `content-length` and hop-by-hop headers; then `host` is set to the
/// upstream authority and `content-type` forced to JSON.
pub fn outbound_headers(incoming: &HeaderMap, upstream_host: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(incoming.len() + 2);
    for (name, value) in incoming {
        if is_browser_scoped(name) || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers.insert(HOST, upstream_host.clone());
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Upstream response headers that are passed back to the caller.
///
/// `content-length` is left out because the relayed body is re-framed by
/// the server.
pub fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 3);
    for (name, value) in upstream {
        if name == ACCESS_CONTROL_ALLOW_ORIGIN || name == CONTENT_LENGTH || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incoming() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("localhost:3000"));
        headers.insert("origin", HeaderValue::from_static("http://localhost:3000"));
        headers.insert("referer", HeaderValue::from_static("http://localhost:3000/app"));
        headers.insert("content-length", HeaderValue::from_static("17"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("hap-appkey", HeaderValue::from_static("key"));
        headers.append("accept", HeaderValue::from_static("application/json"));
        headers.append("accept", HeaderValue::from_static("text/plain"));
        headers
    }

    #[test]
    fn test_outbound_drops_browser_headers() {
        let host = HeaderValue::from_static("api.mingdao.com");
        let out = outbound_headers(&incoming(), &host);

        assert!(out.get(ORIGIN).is_none());
        assert!(out.get(REFERER).is_none());
        assert!(out.get(CONTENT_LENGTH).is_none());
        assert!(out.get(CONNECTION).is_none());
        assert_eq!(out.get(HOST).unwrap(), "api.mingdao.com");
        assert_eq!(out.get_all(HOST).iter().count(), 1);
    }

    #[test]
    fn test_outbound_forces_json_and_keeps_the_rest() {
        let host = HeaderValue::from_static("api.mingdao.com");
        let out = outbound_headers(&incoming(), &host);

        assert_eq!(out.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(out.get("hap-appkey").unwrap(), "key");
        assert_eq!(out.get_all("accept").iter().count(), 2);
    }

    #[test]
    fn test_relayed_drops_upstream_allow_origin() {
        let mut upstream = HeaderMap::new();
        upstream.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://www.mingdao.com"),
        );
        upstream.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        upstream.insert(CONTENT_LENGTH, HeaderValue::from_static("2"));
        upstream.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        upstream.append("set-cookie", HeaderValue::from_static("a=1"));
        upstream.append("set-cookie", HeaderValue::from_static("b=2"));

        let relayed = relayed_headers(&upstream);
        assert!(relayed.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert!(relayed.get(CONTENT_LENGTH).is_none());
        assert!(relayed.get(TRANSFER_ENCODING).is_none());
        assert_eq!(relayed.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(relayed.get_all("set-cookie").iter().count(), 2);
    }

    #[test]
    fn test_hop_by_hop_names() {
        assert!(is_hop_by_hop(&CONNECTION));
        assert!(is_hop_by_hop(&HeaderName::from_static("keep-alive")));
        assert!(!is_hop_by_hop(&CONTENT_TYPE));
    }
}
