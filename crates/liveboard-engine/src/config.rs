//! Configuration loading and typed config structures for Liveboard.
//!
//! The canonical configuration lives in `liveboard.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads the file. Every
//! field has a default, so a missing file or a partial file both work.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configured listen host is not a valid IP address.
    #[error("invalid listen host {host:?}: {source}")]
    Host {
        /// The offending host string.
        host: String,
        /// The underlying parse error.
        source: std::net::AddrParseError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Liveboard configuration.
///
/// Mirrors the structure of `liveboard.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LiveboardConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl LiveboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `HOST` and `PORT` environment variables override the YAML
    /// server settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }
}

/// HTTP server configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSection {
    /// Resolve the configured host and port into a listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Host`] when the host is not a literal IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host: IpAddr = self.host.parse().map_err(|source| ConfigError::Host {
            host: self.host.clone(),
            source,
        })?;
        Ok(SocketAddr::new(host, self.port))
    }

    /// Apply `HOST` and `PORT` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.port = port;
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default log filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON-formatted log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = LiveboardConfig::parse("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn partial_sections_keep_defaults_for_the_rest() {
        let yaml = "server:\n  port: 9000\n";
        let config = LiveboardConfig::parse(yaml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn full_config_round_trips() {
        let yaml = concat!(
            "server:\n",
            "  host: 127.0.0.1\n",
            "  port: 3000\n",
            "logging:\n",
            "  filter: debug\n",
            "  json: true\n",
        );
        let config = LiveboardConfig::parse(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn listen_address_resolves_from_the_server_section() {
        let config = LiveboardConfig::parse("server:\n  host: 127.0.0.1\n  port: 3000\n").unwrap();
        let addr = config.server.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn non_ip_host_is_rejected() {
        let config = LiveboardConfig::parse("server:\n  host: liveboard.example\n").unwrap();
        assert!(matches!(
            config.server.socket_addr(),
            Err(ConfigError::Host { .. })
        ));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            LiveboardConfig::parse("server: ["),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
