// BSD 3-Clause License
// Copyright (c) 2025, cfgload contributors
//! Configuration loading from environment variables
//!
//! A [`Loader`] resolves one field per call: an absent key yields the
//! fallback silently, an invalid value records an error and yields the
//! fallback, a valid value is returned parsed. Nothing short-circuits, so a
//! single pass reports every problem at once through [`Loader::finish`].

use std::env::VarError;
use std::time::Duration;

use tracing::debug;

use super::duration::parse_duration;
use super::error::{ConfigError, LoadErrors};
use super::source::{ProcessEnv, Source};
use super::types::*;
use super::validation::{describe_allowed, match_one_of, parse_bool, validate_host_port};

impl Config {
    /// Assemble a snapshot from `source`.
    ///
    /// Always returns a complete config; fields that failed validation hold
    /// their defaults and every failure is reported in the second element.
    pub fn load<S: Source + ?Sized>(source: &S) -> (Self, Option<LoadErrors>) {
        let mut loader = Loader::new(source);

        let log = LogConfig::new(
            loader.one_of(ENV_LOG_LEVEL, DEFAULT_LOG_LEVEL, LogLevel::ALL),
            loader.one_of(ENV_LOG_FORMAT, DEFAULT_LOG_FORMAT, LogFormat::ALL),
            loader.one_of(ENV_LOG_OUTPUT, DEFAULT_LOG_OUTPUT, LogOutput::ALL),
        );

        let server = ServerConfig::new(
            loader.host_port(ENV_SERVER_ADDRESS, DEFAULT_SERVER_ADDRESS),
            loader.positive_duration(ENV_SERVER_READ_TIMEOUT, DEFAULT_SERVER_READ_TIMEOUT),
            loader.positive_duration(
                ENV_SERVER_READ_HEADER_TIMEOUT,
                DEFAULT_SERVER_READ_HEADER_TIMEOUT,
            ),
            loader.positive_duration(ENV_SERVER_WRITE_TIMEOUT, DEFAULT_SERVER_WRITE_TIMEOUT),
            loader.positive_duration(ENV_SERVER_IDLE_TIMEOUT, DEFAULT_SERVER_IDLE_TIMEOUT),
            loader.non_negative_duration(
                ENV_SERVER_SHUTDOWN_TIMEOUT,
                DEFAULT_SERVER_SHUTDOWN_TIMEOUT,
            ),
        );

        (Config::new(log, server), loader.finish())
    }

    /// Assemble a snapshot from the process environment.
    pub fn from_env() -> (Self, Option<LoadErrors>) {
        Self::load(&ProcessEnv)
    }

    /// Like [`Config::load`], but any problem rejects the whole snapshot.
    pub fn load_strict<S: Source + ?Sized>(source: &S) -> Result<Self, LoadErrors> {
        match Self::load(source) {
            (config, None) => Ok(config),
            (_, Some(errors)) => Err(errors),
        }
    }
}

/// Single-use reader that aggregates every field-level error of one pass.
pub struct Loader<'a, S: Source + ?Sized> {
    source: &'a S,
    errors: Vec<ConfigError>,
}

impl<'a, S: Source + ?Sized> Loader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            errors: Vec::new(),
        }
    }

    /// Trimmed value for `key`; blank values count as absent.
    ///
    /// A value that is set but not valid unicode is recorded as a parse
    /// error and treated as absent, so the caller falls back to its default.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if key.is_empty() {
            self.record(ConfigError::EmptyKey);
            return None;
        }
        match self.source.lookup(key) {
            Ok(value) => {
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(raw)) => {
                let value = raw.to_string_lossy().into_owned();
                let reason = "value is not valid unicode".to_string();
                self.record_parse(key, value, "valid unicode text", reason);
                None
            }
        }
    }

    pub fn string(&mut self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or_else(|| fallback.to_string())
    }

    /// Value that has no acceptable default. Yields an empty string when missing.
    pub fn required_string(&mut self, key: &str) -> String {
        let before = self.error_count();
        match self.get(key) {
            Some(value) => value,
            None => {
                // An empty key or undecodable value was already recorded.
                if self.error_count() == before {
                    self.record(ConfigError::MissingRequired {
                        key: key.to_string(),
                    });
                }
                String::new()
            }
        }
    }

    pub fn int(&mut self, key: &str, fallback: i64) -> i64 {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        match raw.parse::<i64>() {
            Ok(value) => value,
            Err(e) => {
                self.record_parse(key, raw, "a signed integer", e.to_string());
                fallback
            }
        }
    }

    pub fn bool(&mut self, key: &str, fallback: bool) -> bool {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        match parse_bool(&raw) {
            Ok(value) => value,
            Err(reason) => {
                self.record_parse(key, raw, "a boolean (true/false/1/0)", reason);
                fallback
            }
        }
    }

    /// Signed span such as `"5s"` or `"-250ms"`.
    pub fn duration(&mut self, key: &str, fallback: chrono::Duration) -> chrono::Duration {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        self.parse_span(key, raw).unwrap_or(fallback)
    }

    /// Span strictly greater than zero.
    pub fn positive_duration(&mut self, key: &str, fallback: Duration) -> Duration {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        let Some(span) = self.parse_span(key, raw.clone()) else {
            return fallback;
        };
        match span.to_std() {
            Ok(value) if !value.is_zero() => value,
            _ => {
                self.record(ConfigError::NotPositive {
                    key: key.to_string(),
                    value: raw,
                });
                fallback
            }
        }
    }

    /// Span greater than or equal to zero.
    pub fn non_negative_duration(&mut self, key: &str, fallback: Duration) -> Duration {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        let Some(span) = self.parse_span(key, raw.clone()) else {
            return fallback;
        };
        match span.to_std() {
            Ok(value) => value,
            Err(_) => {
                self.record(ConfigError::Negative {
                    key: key.to_string(),
                    value: raw,
                });
                fallback
            }
        }
    }

    /// Listen address in `host:port` form.
    pub fn host_port(&mut self, key: &str, fallback: &str) -> String {
        let Some(raw) = self.get(key) else {
            return fallback.to_string();
        };
        match validate_host_port(&raw) {
            Ok(()) => raw,
            Err(reason) => {
                self.record_parse(key, raw, "an address in host:port form", reason);
                fallback.to_string()
            }
        }
    }

    /// Case-insensitive pick from a closed set, returning the canonical member.
    pub fn one_of<T>(&mut self, key: &str, fallback: T, allowed: &[T]) -> T
    where
        T: Copy + AsRef<str>,
    {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        match match_one_of(&raw, allowed) {
            Some(value) => value,
            None => {
                self.record(ConfigError::NotAllowed {
                    key: key.to_string(),
                    value: raw,
                    allowed: describe_allowed(allowed),
                });
                fallback
            }
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// End the pass. `None` when every field loaded cleanly.
    pub fn finish(self) -> Option<LoadErrors> {
        LoadErrors::from_vec(self.errors)
    }

    fn parse_span(&mut self, key: &str, raw: String) -> Option<chrono::Duration> {
        match parse_duration(&raw) {
            Ok(span) => Some(span),
            Err(e) => {
                let expected = "a duration such as \"5s\" or \"250ms\"";
                self.record_parse(key, raw, expected, e.to_string());
                None
            }
        }
    }

    fn record_parse(&mut self, key: &str, value: String, expected: &'static str, reason: String) {
        self.record(ConfigError::Parse {
            key: key.to_string(),
            value,
            expected,
            reason,
        });
    }

    fn record(&mut self, error: ConfigError) {
        debug!(key = error.key().unwrap_or(""), "Configuration problem: {}", error);
        self.errors.push(error);
    }
}
