// cfgload library
// Environment-driven startup configuration plus the logging and HTTP
// server setup that consume it.

pub mod config;
pub mod server;
pub mod telemetry;

pub use config::{Config, ConfigError, LoadErrors, LogConfig, ServerConfig};

// Re-export commonly used types
pub use anyhow::{Context, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD_TIME: &str = include_str!(concat!(env!("OUT_DIR"), "/build_time.txt"));
pub const GIT_HASH: &str = env!("GIT_HASH");
