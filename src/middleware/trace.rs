//! Per-request tracing.

use std::time::Duration;

use http::StatusCode;
use tracing::{Span, error, info, info_span};

/// Span that wraps the whole handling of one request.
pub(crate) fn request_span(method: &http::Method, path: &str) -> Span {
    info_span!("request", method = %method, path = %path)
}

/// Logs the outcome of a request inside its span. Server errors are logged
/// at `error`, everything else at `info`.
pub(crate) fn on_response(status: StatusCode, elapsed: Duration) {
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    if status.is_server_error() {
        error!(status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        info!(status = status.as_u16(), elapsed_ms, "request completed");
    }
}
