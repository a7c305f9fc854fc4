//! Reverse proxy for backend-owned paths.
//!
//! SYSTEM CONTEXT
//! ==============
//! The edge owns no API logic. Requests under `/api` and `/health` are
//! replayed against the configured upstream origin with the body streamed
//! through untouched. `Host` is rewritten to the upstream authority and the
//! original client metadata travels in `X-Forwarded-*` headers.
//!
//! ERROR HANDLING
//! ==============
//! Upstream failures never escape as panics or hung connections. Connect
//! failures surface as `502`, a missing response within the configured ceiling
//! surfaces as `504`. The same ceiling bounds the streamed response body; a
//! body still incomplete at the deadline is cut off and the connection closed.

use std::net::IpAddr;

use axum::body::{Body, HttpBody};
use axum::extract::Request;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};

use crate::config::{EdgeConfig, UpstreamTimeouts};

/// Path prefixes owned by the backend.
pub const PROXY_PREFIXES: [&str; 2] = ["/api", "/health"];

const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
const X_FORWARDED_PORT: HeaderName = HeaderName::from_static("x-forwarded-port");

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No response headers arrived within the request ceiling.
    #[error("upstream timed out")]
    Timeout,

    /// The upstream refused or could not be reached.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The exchange started but failed mid-flight.
    #[error("upstream exchange failed: {0}")]
    Upstream(String),

    #[error("invalid upstream uri: {0}")]
    InvalidUri(String),

    #[error("http client build failed: {0}")]
    ClientBuild(String),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Unreachable(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidUri(_) => StatusCode::BAD_REQUEST,
            Self::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUri(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// True for `/api`, `/api/...`, `/health` and `/health/...`.
#[must_use]
pub fn is_proxied_path(path: &str) -> bool {
    PROXY_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// HTTP client bound to one upstream origin.
#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    target: String,
    host: HeaderValue,
    listen_port: u16,
    timeouts: UpstreamTimeouts,
}

impl Upstream {
    /// Build the upstream client from edge config.
    ///
    /// # Errors
    ///
    /// Returns an error if the target has no usable authority or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &EdgeConfig) -> Result<Self, ProxyError> {
        let uri: Uri = config
            .api_target
            .parse()
            .map_err(|_| ProxyError::InvalidUri(config.api_target.clone()))?;
        let authority = uri
            .authority()
            .ok_or_else(|| ProxyError::InvalidUri(config.api_target.clone()))?;
        let host = HeaderValue::from_str(authority.as_str()).map_err(|e| ProxyError::InvalidUri(e.to_string()))?;

        // Redirects belong to the browser; the OAuth callback answers with a 302.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(config.timeouts.connect)
            .timeout(config.timeouts.request)
            .build()
            .map_err(|e| ProxyError::ClientBuild(e.to_string()))?;

        Ok(Self { client, target: config.api_target.clone(), host, listen_port: config.port, timeouts: config.timeouts })
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Upstream URL for an inbound request URI: same path and query on the target origin.
    #[must_use]
    pub fn url_for(&self, uri: &Uri) -> String {
        let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
        format!("{}{path_and_query}", self.target)
    }

    /// Replay `req` against the upstream and stream the answer back.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Timeout`] when no response arrives in time and
    /// [`ProxyError::Unreachable`] when the upstream cannot be reached.
    pub async fn forward(&self, req: Request, peer: Option<IpAddr>) -> Result<Response, ProxyError> {
        let (parts, body) = req.into_parts();
        let url = self.url_for(&parts.uri);
        let headers = upstream_request_headers(&parts.headers, &self.host, peer, self.listen_port);

        let mut outbound = self.client.request(parts.method.clone(), &url).headers(headers);
        if body.size_hint().exact() != Some(0) {
            outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = match tokio::time::timeout(self.timeouts.request, outbound.send()).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return Err(ProxyError::from_reqwest(e)),
            Err(_) => return Err(ProxyError::Timeout),
        };

        tracing::debug!(method = %parts.method, %url, status = upstream.status().as_u16(), "proxied");

        let mut response = Response::builder().status(upstream.status());
        if let Some(out) = response.headers_mut() {
            copy_end_to_end(upstream.headers(), out);
        }
        response
            // Chunks keep reading under the client's total timeout.
            .body(Body::from_stream(upstream.bytes_stream()))
            .map_err(|e| ProxyError::Upstream(e.to_string()))
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name.as_str())
}

fn copy_end_to_end(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if !is_hop_by_hop(name) {
            to.append(name.clone(), value.clone());
        }
    }
}

/// Headers sent upstream: inbound end-to-end headers, `Host` rewritten, forwarding metadata added.
pub(crate) fn upstream_request_headers(
    inbound: &HeaderMap,
    upstream_host: &HeaderValue,
    peer: Option<IpAddr>,
    listen_port: u16,
) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len() + 4);
    copy_end_to_end(inbound, &mut headers);

    let original_host = inbound.get(header::HOST).cloned();
    headers.insert(header::HOST, upstream_host.clone());

    if let Some(ip) = peer {
        let forwarded_for = match inbound.get(&X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
            Some(existing) if !existing.trim().is_empty() => format!("{existing}, {ip}"),
            _ => ip.to_string(),
        };
        if let Ok(value) = HeaderValue::from_str(&forwarded_for) {
            headers.insert(X_FORWARDED_FOR, value);
        }
    }
    if let Some(host) = original_host {
        headers.insert(X_FORWARDED_HOST, host);
    }
    headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("http"));
    headers.insert(X_FORWARDED_PORT, HeaderValue::from(listen_port));

    headers
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
