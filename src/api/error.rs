//! Client-facing error type.
//!
//! Every variant renders as `{"error": "<message>"}` with its status code.

use thiserror::Error;
use tracing::error;

use crate::method::Method;
use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body or unparseable path identifier.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Carries the methods registered for the requested path.
    #[error("Method not allowed")]
    MethodNotAllowed(Vec<Method>),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Unsupported media type; expected application/json")]
    UnsupportedMediaType,

    /// Details stay in the logs.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn invalid_payload() -> Self {
        Self::BadRequest("Invalid request payload".to_owned())
    }

    /// `kind` is the capitalised record noun, e.g. `"User"`.
    pub fn invalid_id(kind: &str) -> Self {
        Self::BadRequest(format!("Invalid {} ID", kind.to_lowercase()))
    }

    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest(_)        => Status::BadRequest,
            Self::NotFound(_)          => Status::NotFound,
            Self::MethodNotAllowed(_)  => Status::MethodNotAllowed,
            Self::PayloadTooLarge      => Status::ContentTooLarge,
            Self::UnsupportedMediaType => Status::UnsupportedMediaType,
            Self::Internal             => Status::InternalServerError,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound(e.to_string()),
            StoreError::IdsExhausted { .. } => {
                error!(error = %e, "cannot create record");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut builder = Response::builder().status(self.status());

        if let Self::MethodNotAllowed(allowed) = &self {
            let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
            builder = builder.header("allow", &allow);
        }
        if let Self::Internal = self {
            error!("responding with internal server error");
        }

        builder.json(&serde_json::json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    fn body(res: &Response) -> serde_json::Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn not_found_from_store() {
        let res = ApiError::from(StoreError::NotFound { kind: "User" }).into_response();
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body(&res), serde_json::json!({ "error": "User not found" }));
    }

    #[test]
    fn exhausted_ids_are_an_internal_error() {
        let res = ApiError::from(StoreError::IdsExhausted { kind: "Product" }).into_response();
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(&res), serde_json::json!({ "error": "Internal server error" }));
    }

    #[test]
    fn oversized_body_is_413() {
        let res = ApiError::PayloadTooLarge.into_response();
        assert_eq!(res.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body(&res), serde_json::json!({ "error": "Request body too large" }));
    }

    #[test]
    fn invalid_id_names_the_record() {
        assert_eq!(ApiError::invalid_id("Product").to_string(), "Invalid product ID");
    }

    #[test]
    fn method_not_allowed_sets_allow_header() {
        let res = ApiError::MethodNotAllowed(vec![Method::Get, Method::Post]).into_response();
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()["allow"], "GET, POST");
    }
}
