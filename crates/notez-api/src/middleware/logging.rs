//! Access log: one event per request after the response is produced.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Emits method, path, status, and latency. Health checks log at debug.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    if response.status().is_server_error() {
        warn!(%method, %path, status, elapsed_ms, "Request failed");
    } else if path == "/health" {
        debug!(%method, %path, status, elapsed_ms, "Request served");
    } else {
        info!(%method, %path, status, elapsed_ms, "Request served");
    }

    response
}
