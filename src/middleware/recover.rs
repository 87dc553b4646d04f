//! Panic recovery.

use tracing::error;

use crate::api::ApiError;
use crate::handler::BoxFuture;
use crate::response::{IntoResponse, Response};

/// Runs a handler future on its own task so that a panic inside it is
/// contained and reported as a `500`.
pub(crate) async fn catch_panic(fut: BoxFuture) -> Response {
    match tokio::spawn(fut).await {
        Ok(res) => res,
        Err(e) if e.is_panic() => {
            error!("handler panicked");
            ApiError::Internal.into_response()
        }
        Err(e) => {
            error!(error = %e, "handler task failed");
            ApiError::Internal.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    async fn explode() -> Response {
        panic!("boom")
    }

    #[tokio::test]
    async fn panic_becomes_internal_error() {
        let fut: BoxFuture = Box::pin(explode());
        let res = catch_panic(fut).await;
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body(), br#"{"error":"Internal server error"}"#);
    }

    #[tokio::test]
    async fn normal_response_passes_through() {
        let fut: BoxFuture = Box::pin(async { Response::text("ok") });
        let res = catch_panic(fut).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"ok");
    }
}
