//! Shared pieces of the moira checker master: slot and exit types,
//! the TOML configuration and the log sinks used by master and workers.

pub mod config;
pub mod logs;
pub mod types;

pub use config::{CheckerConfig, ConfigError};
pub use types::*;
