//! HTTP status codes the service answers with, as a typed enum.
//!
//! ```rust
//! use storefront::{Response, Status};
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/users/42")
//!     .json(&serde_json::json!({ "id": 42 }));
//! ```

use http::StatusCode;

/// The status codes produced by the router, the handlers, and the middleware.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    Created,              // 201

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    ContentTooLarge,      // 413
    UnsupportedMediaType, // 415

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Ok                   => StatusCode::OK,
            Status::Created              => StatusCode::CREATED,
            Status::BadRequest           => StatusCode::BAD_REQUEST,
            Status::NotFound             => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed     => StatusCode::METHOD_NOT_ALLOWED,
            Status::ContentTooLarge      => StatusCode::PAYLOAD_TOO_LARGE,
            Status::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Status::InternalServerError  => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
