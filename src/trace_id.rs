//! Per-request trace id propagation.
//!
//! Every request carries `X-Trace-Id` past the edge: a client-supplied value
//! is kept, otherwise a UUID v4 is minted. The id is forwarded upstream with
//! the request and echoed on the response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// Axum middleware assigning and echoing the trace id.
pub async fn assign_trace_id(mut req: Request, next: Next) -> Response {
    let trace_id = req
        .headers()
        .get(&TRACE_ID_HEADER)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(new_trace_id);
    req.headers_mut().insert(TRACE_ID_HEADER, trace_id.clone());

    let mut response = next.run(req).await;
    response.headers_mut().insert(TRACE_ID_HEADER, trace_id);
    response
}

/// Trace id of a request that already passed [`assign_trace_id`].
#[must_use]
pub fn trace_id_of(req: &Request) -> &str {
    req.headers()
        .get(&TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

fn new_trace_id() -> HeaderValue {
    let id = Uuid::new_v4().to_string();
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("-"))
}
