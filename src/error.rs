//! Unified infrastructure error type.

use thiserror::Error;

use crate::config::ConfigError;

/// The error type returned by the service's fallible startup operations.
///
/// Application-level errors (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values through [`ApiError`](crate::api::ApiError),
/// not as `Error`s. This type surfaces infrastructure failures: reading the
/// configuration or binding the listener.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
