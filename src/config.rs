//! Runtime configuration read from the environment
//!
//! A `.env` file, if present, is loaded by `main` before [`Config::from_env`]
//! runs.
//!
//! - `HOST` - Interface to bind (default: "0.0.0.0")
//! - `PORT` - Server port number (default: 8080)
//! - `SESSION_SECRET` - At least 64 bytes used to sign session cookies. When
//!   unset a random key is generated and sessions end with the process.

use std::env;

use axum_extra::extract::cookie::Key;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Minimum length of `SESSION_SECRET`, dictated by the cookie signing key
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes long")]
    SessionSecretTooShort,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    session_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };
        let session_secret = lookup("SESSION_SECRET").filter(|secret| !secret.is_empty());

        Ok(Self {
            host,
            port,
            session_secret,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Key signing the session cookie.
    pub fn cookie_key(&self) -> Result<Key, ConfigError> {
        match &self.session_secret {
            Some(secret) => {
                Key::try_from(secret.as_bytes()).map_err(|_| ConfigError::SessionSecretTooShort)
            }
            None => {
                tracing::warn!("SESSION_SECRET is not set; sessions will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.cookie_key().is_ok());
    }

    #[test]
    fn test_port_override() {
        let config = config(&[("PORT", "3000"), ("HOST", "127.0.0.1")]).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort(port)) if port == "eighty"
        ));
    }

    #[test]
    fn test_session_secret_length() {
        let short = config(&[("SESSION_SECRET", "too short")]).unwrap();
        assert!(matches!(short.cookie_key(), Err(ConfigError::SessionSecretTooShort)));

        let secret = "x".repeat(MIN_SECRET_LEN);
        let long = config(&[("SESSION_SECRET", secret.as_str())]).unwrap();
        assert!(long.cookie_key().is_ok());
    }
}
