//! Configuration types.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind the REST server to.
    pub bind: String,
    /// REST server port.
    pub port: u16,
    /// Path of the libSQL database file holding persisted profiles.
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            db_path: PathBuf::from("./data/matrimony-profile.db"),
        }
    }
}

impl ServerConfig {
    /// Build from `MATRIMONY_PROFILE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("MATRIMONY_PROFILE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "MATRIMONY_PROFILE_PORT".to_string(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => defaults.port,
        };

        let bind = lookup("MATRIMONY_PROFILE_BIND")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.bind);

        let db_path = lookup("MATRIMONY_PROFILE_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        Ok(Self {
            bind,
            port,
            db_path,
        })
    }

    /// Socket address the server listens on. `bind` is a bare IPv4 or IPv6
    /// address, without brackets or port.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind.parse().map_err(|e| ConfigError::InvalidValue {
            key: "MATRIMONY_PROFILE_BIND".to_string(),
            message: format!("{:?}: {e}", self.bind),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
