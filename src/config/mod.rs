// BSD 3-Clause License
// Copyright (c) 2025, cfgload contributors
//
//! Startup configuration
//! All values are read once from environment variables, validated, and
//! frozen into an immutable [`Config`]. Every problem found during the pass
//! is reported together as [`LoadErrors`].

mod duration;
mod error;
mod loader;
mod source;
mod types;
mod validation;

pub use duration::{parse_duration, DurationError};
pub use error::{ConfigError, ErrorKind, LoadErrors};
pub use loader::Loader;
pub use source::{ProcessEnv, Source};
pub use types::*;
pub use validation::{match_one_of, parse_bool, validate_host_port};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" Error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_closed_set_display() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogOutput::Stderr.to_string(), "stderr");
    }

    #[test]
    fn test_unknown_format_lists_allowed() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("text, json"), "{err}");
    }

    #[test]
    fn test_level_into_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
    }

    #[test]
    fn test_snapshot_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
