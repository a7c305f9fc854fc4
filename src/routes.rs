//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The edge answers every path with one of three rules, tried in order:
//!
//! 1. a file under the static root (`GET`/`HEAD` only),
//! 2. the reverse proxy for `/api` and `/health`,
//! 3. the SPA entry document, so client-side routes survive deep links.
//!
//! `ServeDir` owns rule 1 and hands misses to a single fallback handler that
//! decides between rules 2 and 3 by path prefix alone.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::{ConnectInfo, Request, State};
use axum::handler::Handler;
use axum::http::{StatusCode, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::proxy;
use crate::state::AppState;
use crate::trace_id;

/// Full edge router: static assets, proxy, SPA fallback.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let misses = edge_fallback.with_state(state);

    let assets = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .call_fallback_on_method_not_allowed(true)
        .fallback(misses);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        tracing::info_span!(
            "request",
            method = %req.method(),
            path = %req.uri().path(),
            trace_id = %trace_id::trace_id_of(req),
        )
    });

    Router::new()
        .fallback_service(assets)
        .layer(CatchPanicLayer::new())
        .layer(trace)
        .layer(middleware::from_fn(trace_id::assign_trace_id))
}

/// Rules 2 and 3 for requests that did not match a static file.
async fn edge_fallback(State(state): State<AppState>, req: Request) -> Response {
    if !proxy::is_proxied_path(req.uri().path()) {
        return spa_entry(&state).await;
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match state.upstream.forward(req, peer).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, target = state.upstream.target(), "upstream request failed");
            e.into_response()
        }
    }
}

/// Serve `index.html` from the static root with a 200.
async fn spa_entry(state: &AppState) -> Response {
    let path = state.config.index_path();
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "SPA entry document unavailable");
            (StatusCode::INTERNAL_SERVER_ERROR, "SPA entry document unavailable").into_response()
        }
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
