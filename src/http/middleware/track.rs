//! Request-level metrics middleware.
//!
//! Records one counter increment and one duration observation for every
//! request, labeled by method, matched route pattern and status code.
//! Sits outside the database gate so gate aborts are recorded too.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::observability::metrics;

pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;

    metrics::record_request(
        &method,
        &route,
        response.status().as_u16(),
        start.elapsed(),
    );
    response
}
