//! HTTP method as a typed enum.
//!
//! Covers the RFC 9110 standard methods. Anything else (WebDAV verbs,
//! `PURGE`, custom tokens) never reaches a handler: the server answers it
//! with `405 Method Not Allowed`.

use std::fmt;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
}

impl Method {
    /// Every known method, in the order used for `allow` headers.
    pub const ALL: [Method; 9] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Options,
        Self::Connect,
        Self::Trace,
    ];

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete  => "DELETE",
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch   => "PATCH",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Trace   => "TRACE",
        }
    }

    /// Maps a parsed [`http::Method`]; `None` for extension methods.
    pub fn from_http(method: &http::Method) -> Option<Self> {
        Some(match *method {
            http::Method::CONNECT => Self::Connect,
            http::Method::DELETE  => Self::Delete,
            http::Method::GET     => Self::Get,
            http::Method::HEAD    => Self::Head,
            http::Method::OPTIONS => Self::Options,
            http::Method::PATCH   => Self::Patch,
            http::Method::POST    => Self::Post,
            http::Method::PUT     => Self::Put,
            http::Method::TRACE   => Self::Trace,
            _                     => return None,
        })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_standard_methods() {
        assert_eq!(Method::from_http(&http::Method::PUT), Some(Method::Put));
        assert_eq!(Method::from_http(&http::Method::DELETE), Some(Method::Delete));
    }

    #[test]
    fn rejects_extension_methods() {
        let purge = http::Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(Method::from_http(&purge), None);
    }
}
