// BSD 3-Clause License
// Copyright (c) 2025, cfgload contributors
//! Raw key/value sources the loader reads from

use std::collections::{BTreeMap, HashMap};
use std::env::{self, VarError};

/// Lookup capability mapping a key to a raw value.
///
/// Mirrors [`std::env::var`]: `NotPresent` for unset keys, `NotUnicode` for
/// values that are set but cannot be decoded. The loader only ever reads
/// through this trait, so tests can hand it an in-memory map instead of the
/// process environment.
pub trait Source {
    fn lookup(&self, key: &str) -> Result<String, VarError>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn lookup(&self, key: &str) -> Result<String, VarError> {
        env::var(key)
    }
}

impl Source for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Result<String, VarError> {
        self.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Result<String, VarError> {
        self.get(key).cloned().ok_or(VarError::NotPresent)
    }
}

impl Source for [(&str, &str)] {
    fn lookup(&self, key: &str) -> Result<String, VarError> {
        self.iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .ok_or(VarError::NotPresent)
    }
}

impl<const N: usize> Source for [(&str, &str); N] {
    fn lookup(&self, key: &str) -> Result<String, VarError> {
        self.as_slice().lookup(key)
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn lookup(&self, key: &str) -> Result<String, VarError> {
        (**self).lookup(key)
    }
}
