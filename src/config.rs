//! Relay configuration
//!
//! Loaded from an optional TOML file; every field falls back to a default so
//! an empty document (or no file at all) yields a working setup.

use std::fs;

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_MAX_LINE_LENGTH: usize = 1024;
const DEFAULT_OUTBOUND_BUFFER: usize = 32;
const DEFAULT_WELCOME: &str = "[SERVER] Welcome to the chat relay";
const DEFAULT_LOG_FILTER: &str = "room_relay=info";

/// Runtime settings for the relay
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Longest accepted input line in bytes, excluding the newline
    pub max_line_length: usize,
    /// Lines that may queue for one slow client before new ones are dropped
    pub outbound_buffer: usize,
    /// First line every client receives
    pub welcome_message: String,
    /// `tracing` filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            welcome_message: DEFAULT_WELCOME.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read and validate a TOML config file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port cannot be 0".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host cannot be empty".to_string()));
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::Invalid(
                "max_line_length cannot be 0".to_string(),
            ));
        }
        if self.outbound_buffer == 0 {
            return Err(ConfigError::Invalid(
                "outbound_buffer cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:5001");
        assert_eq!(config.max_line_length, 1024);
        assert_eq!(config.welcome_message, "[SERVER] Welcome to the chat relay");
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            host = "0.0.0.0"
            port = 6000
            welcome_message = "hi"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:6000");
        assert_eq!(config.welcome_message, "hi");
        assert_eq!(config.outbound_buffer, 32);
    }

    #[test]
    fn test_rejects_zero_port() {
        let err = Config::from_toml_str("port = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_limits() {
        assert!(Config::from_toml_str("max_line_length = 0").is_err());
        assert!(Config::from_toml_str("outbound_buffer = 0").is_err());
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = Config::from_toml_str("port = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
