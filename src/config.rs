use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8085;
pub const DEFAULT_SOURCE: &str = "pricelist.csv";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Server settings, read from `PRICELIST_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Delimited price list re-read on every request.
    pub source: PathBuf,
    /// Root for static files served on every non-API path.
    pub static_dir: PathBuf,
    /// Append-only request log file; `None` logs requests through `log`.
    pub request_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            source: PathBuf::from(DEFAULT_SOURCE),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            request_log: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("PRICELIST_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PRICELIST_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PRICELIST_PORT must be a port number, got {port:?}"))?;
        }
        if let Some(source) = lookup("PRICELIST_SOURCE") {
            config.source = PathBuf::from(source);
        }
        if let Some(dir) = lookup("PRICELIST_STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config.request_log = lookup("PRICELIST_REQUEST_LOG")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().unwrap().port(), 8085);
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PRICELIST_HOST", "127.0.0.1"),
            ("PRICELIST_PORT", "9000"),
            ("PRICELIST_SOURCE", "/data/prices.csv"),
            ("PRICELIST_STATIC_DIR", "/srv/www"),
            ("PRICELIST_REQUEST_LOG", "Web.log"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.source, PathBuf::from("/data/prices.csv"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.request_log, Some(PathBuf::from("Web.log")));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PRICELIST_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PRICELIST_PORT"));
    }
}
