//! Process configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_HOST` | `0.0.0.0` |
//! | `STOREFRONT_PORT` | `3000` |
//!
//! Log filtering is configured separately through `RUST_LOG`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const HOST_VAR: &str = "STOREFRONT_HOST";
pub const PORT_VAR: &str = "STOREFRONT_PORT";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid IP address")]
    InvalidHost { var: &'static str, value: String },

    #[error("{var}={value:?} is not a valid port")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT) }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset or empty
    /// variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|v: &String| !v.trim().is_empty());

        let host = match get(HOST_VAR) {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost { var: HOST_VAR, value })?,
            None => defaults.addr.ip(),
        };

        let port = match get(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { var: PORT_VAR, value })?,
            None => defaults.addr.port(),
        };

        Ok(Self { addr: SocketAddr::new(host, port) })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_to_port_3000_on_all_interfaces() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_host_and_port() {
        let cfg = load(&[(HOST_VAR, "127.0.0.1"), (PORT_VAR, " 8080 ")]).unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn empty_values_use_defaults() {
        let cfg = load(&[(PORT_VAR, "")]).unwrap();
        assert_eq!(cfg.addr.port(), 3000);
    }

    #[test]
    fn rejects_bad_port() {
        let err = load(&[(PORT_VAR, "70000")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort { var: PORT_VAR, value: "70000".to_owned() });
    }

    #[test]
    fn rejects_bad_host() {
        assert!(matches!(load(&[(HOST_VAR, "localhost")]), Err(ConfigError::InvalidHost { .. })));
    }
}
