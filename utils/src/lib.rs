//! Ambient plumbing shared by every consumer of the data model: logging
//! initialisation and the TOML client configuration.

pub mod config;
pub mod logging;

pub use config::{ClientConfig, ConfigError};
pub use logging::{init_logging, LogFormat};
