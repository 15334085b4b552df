//! Runtime configuration from environment variables
//!
//! `.env` is honored when present (loaded by the binaries via `dotenv`).

use crate::error::ResponderError;
use crate::Result;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/financials.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = get("FINANCIAL_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let host = match get("HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| {
                ResponderError::Config(format!("Invalid HOST '{}': {}", raw, e))
            })?,
            None => DEFAULT_HOST.parse().map_err(|e| {
                ResponderError::Config(format!("Invalid default host: {}", e))
            })?,
        };

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ResponderError::Config(format!("Invalid PORT '{}': {}", raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            data_path,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FINANCIAL_DATA_PATH", "/tmp/t1.csv"),
            ("HOST", "127.0.0.1"),
            ("API_PORT", "9090"),
        ])
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/t1.csv"));
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_port_takes_precedence_over_api_port() {
        let config = config_from(&[("PORT", "8080"), ("API_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ResponderError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("HOST", "not-an-ip")]),
            Err(ResponderError::Config(_))
        ));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("PORT", "  "), ("FINANCIAL_DATA_PATH", "")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }
}
