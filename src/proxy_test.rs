use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use super::*;
use crate::config::LogFormat;

fn test_config(target: &str) -> EdgeConfig {
    EdgeConfig {
        port: 3000,
        api_target: target.to_owned(),
        static_dir: PathBuf::from("dist"),
        timeouts: UpstreamTimeouts { request: Duration::from_secs(1), connect: Duration::from_secs(1) },
        log_format: LogFormat::Text,
    }
}

// =============================================================================
// is_proxied_path
// =============================================================================

#[test]
fn api_and_health_prefixes_are_proxied() {
    for path in ["/api", "/api/", "/api/v1/google-login", "/health", "/health/ready"] {
        assert!(is_proxied_path(path), "expected {path} to be proxied");
    }
}

#[test]
fn lookalike_paths_are_not_proxied() {
    for path in ["/", "/apix", "/apis/v1", "/healthy", "/dashboard", "/login", "/static/api", "/Api"] {
        assert!(!is_proxied_path(path), "expected {path} to stay local");
    }
}

// =============================================================================
// upstream_request_headers
// =============================================================================

#[test]
fn host_is_rewritten_and_original_kept_as_forwarded_host() {
    let mut inbound = HeaderMap::new();
    inbound.insert(header::HOST, HeaderValue::from_static("trego.example:3000"));
    inbound.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    let upstream_host = HeaderValue::from_static("trego-backend:8080");
    let out = upstream_request_headers(&inbound, &upstream_host, None, 3000);

    assert_eq!(out.get(header::HOST).unwrap(), "trego-backend:8080");
    assert_eq!(out.get("x-forwarded-host").unwrap(), "trego.example:3000");
    assert_eq!(out.get("x-forwarded-proto").unwrap(), "http");
    assert_eq!(out.get("x-forwarded-port").unwrap(), "3000");
    assert_eq!(out.get(header::ACCEPT).unwrap(), "application/json");
    assert!(out.get("x-forwarded-for").is_none());
}

#[test]
fn forwarded_for_appends_peer_to_existing_chain() {
    let mut inbound = HeaderMap::new();
    inbound.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));

    let peer = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));
    let out = upstream_request_headers(&inbound, &HeaderValue::from_static("api:8080"), Some(peer), 3000);

    assert_eq!(out.get("x-forwarded-for").unwrap(), "203.0.113.9, 10.0.0.7");
}

#[test]
fn forwarded_for_starts_chain_when_absent() {
    let peer = IpAddr::V4(Ipv4Addr::LOCALHOST);
    let out = upstream_request_headers(&HeaderMap::new(), &HeaderValue::from_static("api:8080"), Some(peer), 3000);
    assert_eq!(out.get("x-forwarded-for").unwrap(), "127.0.0.1");
}

#[test]
fn hop_by_hop_headers_are_stripped() {
    let mut inbound = HeaderMap::new();
    inbound.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    inbound.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
    inbound.insert(header::UPGRADE, HeaderValue::from_static("websocket"));
    inbound.insert(header::COOKIE, HeaderValue::from_static("session=abc"));

    let out = upstream_request_headers(&inbound, &HeaderValue::from_static("api:8080"), None, 3000);

    assert!(out.get(header::CONNECTION).is_none());
    assert!(out.get(header::TRANSFER_ENCODING).is_none());
    assert!(out.get(header::UPGRADE).is_none());
    assert_eq!(out.get(header::COOKIE).unwrap(), "session=abc");
}

#[test]
fn repeated_headers_survive_in_order() {
    let mut inbound = HeaderMap::new();
    inbound.append(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
    inbound.append(header::ACCEPT_LANGUAGE, HeaderValue::from_static("fr"));

    let out = upstream_request_headers(&inbound, &HeaderValue::from_static("api:8080"), None, 3000);
    let values: Vec<_> = out.get_all(header::ACCEPT_LANGUAGE).iter().collect();
    assert_eq!(values, vec!["en", "fr"]);
}

// =============================================================================
// Upstream
// =============================================================================

#[test]
fn url_for_keeps_path_and_query() {
    let upstream = Upstream::new(&test_config("http://trego-backend:8080")).unwrap();
    let uri: Uri = "/api/v1/ping?x=1&y=two".parse().unwrap();
    assert_eq!(upstream.url_for(&uri), "http://trego-backend:8080/api/v1/ping?x=1&y=two");
    assert_eq!(upstream.target(), "http://trego-backend:8080");
}

#[test]
fn upstream_host_is_target_authority() {
    let upstream = Upstream::new(&test_config("https://api.trego.test:8443")).unwrap();
    assert_eq!(upstream.host, "api.trego.test:8443");
}

#[test]
fn upstream_rejects_target_without_authority() {
    assert!(matches!(Upstream::new(&test_config("not a uri")), Err(ProxyError::InvalidUri(_))));
}

// =============================================================================
// ProxyError
// =============================================================================

#[test]
fn proxy_errors_map_to_gateway_statuses() {
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::Unreachable("refused".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::Upstream("reset".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::InvalidUri("x".into()).status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn proxy_error_response_carries_json_message() {
    let response = ProxyError::Timeout.into_response();
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "upstream timed out");
}
