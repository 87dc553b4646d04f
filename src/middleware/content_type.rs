//! `application/json` enforcement for request bodies.

use http::HeaderMap;
use http::header::CONTENT_TYPE;

use crate::api::ApiError;

const JSON: &str = "application/json";

/// Accepts requests without a body unconditionally. A request with a body
/// must carry a `content-type` whose media type is `application/json`
/// (parameters such as `charset` are ignored).
pub(crate) fn require_json(headers: &HeaderMap, body: &[u8]) -> Result<(), ApiError> {
    if body.is_empty() {
        return Ok(());
    }

    let media_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim);

    match media_type {
        Some(mt) if mt.eq_ignore_ascii_case(JSON) => Ok(()),
        _ => Err(ApiError::UnsupportedMediaType),
    }
}
