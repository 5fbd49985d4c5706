//! Client configuration with TOML file support.

use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use xrpl_types::{NetworkId, XrpAmount};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid base fee: {0}")]
    BaseFee(#[from] xrpl_types::TypesError),
}

/// Settings applied to every transaction a client builds.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network the client submits to. Networks above id 1024 require the
    /// `NetworkID` field on every transaction.
    #[serde(default = "default_network_id")]
    pub network_id: NetworkId,

    /// Reference transaction cost in drops.
    #[serde(default = "default_base_fee_drops")]
    pub base_fee_drops: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_network_id() -> NetworkId {
    NetworkId::MAINNET
}

fn default_base_fee_drops() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.base_fee()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Install the global subscriber with this config's format and level.
    pub fn init_logging(&self) {
        crate::logging::init_logging(self.log_format, &self.log_level);
    }

    /// The configured base fee, checked against the supply cap.
    pub fn base_fee(&self) -> Result<XrpAmount, ConfigError> {
        Ok(XrpAmount::of_drops(self.base_fee_drops)?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network_id: default_network_id(),
            base_fee_drops: default_base_fee_drops(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = ClientConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network_id, NetworkId::MAINNET);
        assert_eq!(config.base_fee_drops, 10);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network_id = 21338
            log_format = "json"
        "#;
        let config = ClientConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network_id, NetworkId(21338));
        assert!(config.network_id.requires_network_id_field());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.base_fee_drops, 10); // default
    }

    #[test]
    fn oversized_base_fee_is_rejected() {
        let err = ClientConfig::from_toml_str("base_fee_drops = 100000000000000001").unwrap_err();
        assert!(matches!(err, ConfigError::BaseFee(_)));
    }

    #[test]
    fn unknown_log_format_is_a_parse_error() {
        let err = ClientConfig::from_toml_str(r#"log_format = "xml""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network_id = 1").unwrap();
        let config = ClientConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.network_id, NetworkId::TESTNET);
    }

    #[test]
    fn missing_file_returns_io_error() {
        let err = ClientConfig::from_toml_file("/nonexistent/xrpl.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
