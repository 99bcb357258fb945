// BSD 3-Clause License
// Copyright (c) 2025, cfgload contributors
//! Configuration error types

use std::fmt;

/// A single field-level configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}")]
    MissingRequired { key: String },

    #[error("Invalid value for {key}: {value:?} - expected {expected}: {reason}")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
        reason: String,
    },

    #[error("Invalid value for {key}: {value:?} - duration must be positive")]
    NotPositive { key: String, value: String },

    #[error("Invalid value for {key}: {value:?} - duration must be non-negative")]
    Negative { key: String, value: String },

    #[error("Invalid value for {key}: {value:?} - allowed values: {allowed}")]
    NotAllowed {
        key: String,
        value: String,
        allowed: String,
    },

    #[error("Configuration lookup requested with an empty key")]
    EmptyKey,
}

/// Broad classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field without an acceptable default was not provided.
    Missing,
    /// The raw value does not match the field's syntax.
    Parse,
    /// The value parsed but breaks a sign or membership rule.
    Constraint,
    /// The loader was called incorrectly.
    Programming,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::MissingRequired { .. } => ErrorKind::Missing,
            ConfigError::Parse { .. } => ErrorKind::Parse,
            ConfigError::NotPositive { .. }
            | ConfigError::Negative { .. }
            | ConfigError::NotAllowed { .. } => ErrorKind::Constraint,
            ConfigError::EmptyKey => ErrorKind::Programming,
        }
    }

    /// Environment key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MissingRequired { key }
            | ConfigError::Parse { key, .. }
            | ConfigError::NotPositive { key, .. }
            | ConfigError::Negative { key, .. }
            | ConfigError::NotAllowed { key, .. } => Some(key),
            ConfigError::EmptyKey => None,
        }
    }
}

/// Every problem found during one load pass, in encounter order.
///
/// Only ever constructed non-empty; a clean pass yields `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", JoinedMessages(.0))]
pub struct LoadErrors(Vec<ConfigError>);

impl LoadErrors {
    pub(crate) fn from_vec(errors: Vec<ConfigError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(LoadErrors(errors))
        }
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigError> {
        self.0.iter()
    }
}

impl IntoIterator for LoadErrors {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LoadErrors {
    type Item = &'a ConfigError;
    type IntoIter = std::slice::Iter<'a, ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct JoinedMessages<'a>(&'a [ConfigError]);

impl fmt::Display for JoinedMessages<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}
