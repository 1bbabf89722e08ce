//! Service configuration read from the environment.
//!
//! - `FLEETQUERY_DATA_PATH`: JSON dataset to load (default: `/data/vehicles.json`)
//! - `SERVICE_PORT`: HTTP port (default: 8080)

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the vehicle dataset inside the container image.
pub const DEFAULT_DATA_PATH: &str = "/data/vehicles.json";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// An unparseable `SERVICE_PORT` falls back to the default.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("FLEETQUERY_DATA_PATH").ok(),
            std::env::var("SERVICE_PORT").ok(),
        )
    }

    fn from_values(data_path: Option<String>, port: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_path: data_path.map(PathBuf::from).unwrap_or(defaults.data_path),
            port: port.and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
        }
    }

    /// Address to bind: all interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_values(None, None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_addr().port(), 8080);
    }

    #[test]
    fn test_values_override_defaults() {
        let config =
            ServiceConfig::from_values(Some("/tmp/v.json".to_string()), Some("9000".to_string()));
        assert_eq!(config.data_path, PathBuf::from("/tmp/v.json"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServiceConfig::from_values(None, Some("http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
