//! Middleware layer.
//!
//! Cross-cutting concerns applied by the server to every request, in this
//! order:
//!
//! 1. [`trace`]: a `request` span with method and path, closed by one log line
//!    carrying status and latency.
//! 2. [`content_type`]: a request that carries a body must declare
//!    `application/json`, otherwise `415`.
//! 3. [`recover`]: a panicking handler becomes a `500` JSON error instead of a
//!    dropped connection.

pub(crate) mod content_type;
pub(crate) mod recover;
pub(crate) mod trace;
