// BSD 3-Clause License
// Copyright (c) 2025, cfgload contributors
//
//! Configuration type definitions
//! The immutable snapshot handed to the rest of the application, plus the
//! environment keys and defaults that describe each field.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use super::validation::{describe_allowed, match_one_of};

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_LOG_OUTPUT: &str = "LOG_OUTPUT";

pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";
pub const ENV_SERVER_READ_TIMEOUT: &str = "SERVER_READ_TIMEOUT";
pub const ENV_SERVER_READ_HEADER_TIMEOUT: &str = "SERVER_READ_HEADER_TIMEOUT";
pub const ENV_SERVER_WRITE_TIMEOUT: &str = "SERVER_WRITE_TIMEOUT";
pub const ENV_SERVER_IDLE_TIMEOUT: &str = "SERVER_IDLE_TIMEOUT";
pub const ENV_SERVER_SHUTDOWN_TIMEOUT: &str = "SERVER_SHUTDOWN_TIMEOUT";

pub const DEFAULT_SERVER_ADDRESS: &str = "localhost:8080";
pub const DEFAULT_SERVER_READ_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SERVER_READ_HEADER_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_SERVER_WRITE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SERVER_IDLE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_SERVER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(15);

/// Implements the string plumbing shared by the closed-set enums: canonical
/// names, `Display`, and case-insensitive `FromStr`.
macro_rules! closed_set {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match_one_of(s.trim(), Self::ALL).ok_or_else(|| {
                    format!(
                        "Unknown {}: {} (allowed: {})",
                        stringify!($name),
                        s,
                        describe_allowed(Self::ALL)
                    )
                })
            }
        }
    };
}

/// Severity threshold for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

closed_set!(LogLevel {
    Debug => "debug",
    Info => "info",
    Warn => "warn",
    Error => "error",
});

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Encoding of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

closed_set!(LogFormat {
    Text => "text",
    Json => "json",
});

/// Destination stream of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
}

closed_set!(LogOutput {
    Stdout => "stdout",
    Stderr => "stderr",
});

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
pub const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Text;
pub const DEFAULT_LOG_OUTPUT: LogOutput = LogOutput::Stdout;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    log: LogConfig,
    server: ServerConfig,
}

impl Config {
    pub(crate) fn new(log: LogConfig, server: ServerConfig) -> Self {
        Self { log, server }
    }

    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(LogConfig::default(), ServerConfig::default())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogConfig {
    level: LogLevel,
    format: LogFormat,
    output: LogOutput,
}

impl LogConfig {
    pub(crate) fn new(level: LogLevel, format: LogFormat, output: LogOutput) -> Self {
        Self {
            level,
            format,
            output,
        }
    }

    /// `LOG_LEVEL`, default `info`.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// `LOG_FORMAT`, default `text`.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// `LOG_OUTPUT`, default `stdout`.
    pub fn output(&self) -> LogOutput {
        self.output
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL, DEFAULT_LOG_FORMAT, DEFAULT_LOG_OUTPUT)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    address: String,
    read_timeout: Duration,
    read_header_timeout: Duration,
    write_timeout: Duration,
    idle_timeout: Duration,
    shutdown_timeout: Duration,
}

impl ServerConfig {
    pub(crate) fn new(
        address: String,
        read_timeout: Duration,
        read_header_timeout: Duration,
        write_timeout: Duration,
        idle_timeout: Duration,
        shutdown_timeout: Duration,
    ) -> Self {
        Self {
            address,
            read_timeout,
            read_header_timeout,
            write_timeout,
            idle_timeout,
            shutdown_timeout,
        }
    }

    /// TCP address to listen on, `host:port`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Maximum time to read an entire request, body included.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Time allowed to read request headers.
    pub fn read_header_timeout(&self) -> Duration {
        self.read_header_timeout
    }

    /// Maximum time before a response write times out.
    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// How long a keep-alive connection may wait for its next request.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Grace period for in-flight requests during shutdown. May be zero.
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SERVER_ADDRESS.to_string(),
            DEFAULT_SERVER_READ_TIMEOUT,
            DEFAULT_SERVER_READ_HEADER_TIMEOUT,
            DEFAULT_SERVER_WRITE_TIMEOUT,
            DEFAULT_SERVER_IDLE_TIMEOUT,
            DEFAULT_SERVER_SHUTDOWN_TIMEOUT,
        )
    }
}
