// BSD 3-Clause License
// Copyright (c) 2025, cfgload contributors
//
//! Configuration validation helpers shared by the loader and the value types

/// Find the member of `allowed` equal to `raw` ignoring case.
///
/// Returns the canonical member so callers never see the input casing.
pub fn match_one_of<T>(raw: &str, allowed: &[T]) -> Option<T>
where
    T: Copy + AsRef<str>,
{
    allowed
        .iter()
        .find(|candidate| candidate.as_ref().eq_ignore_ascii_case(raw))
        .copied()
}

/// Render an allowed set as `"a, b, c"` for error messages.
pub fn describe_allowed<T: AsRef<str>>(allowed: &[T]) -> String {
    allowed
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse one of the canonical boolean tokens.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("{:?} is not a boolean token", raw)),
    }
}

/// Check a listen address of the form `host:port`.
///
/// The host may be empty (`":8080"`) or a bracketed IPv6 literal.
pub fn validate_host_port(raw: &str) -> Result<(), String> {
    let (host, port) = raw
        .rsplit_once(':')
        .ok_or_else(|| "missing ':' separator".to_string())?;

    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return Err("IPv6 hosts must be enclosed in brackets".to_string());
    }
    if host.chars().any(char::is_whitespace) {
        return Err("host contains whitespace".to_string());
    }

    match port.parse::<u16>() {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("invalid port {:?}: {}", port, e)),
    }
}
