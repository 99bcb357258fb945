//! Loading the full configuration from in-memory environments.

use std::collections::HashMap;
use std::time::Duration;

use cfgload::config::{
    Config, ConfigError, ErrorKind, LogFormat, LogLevel, LogOutput, DEFAULT_SERVER_ADDRESS,
};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_all_keys_absent_yields_defaults() {
    let (config, errors) = Config::load(&env(&[]));

    assert!(errors.is_none());
    assert_eq!(config, Config::default());
    assert_eq!(config.log().level(), LogLevel::Info);
    assert_eq!(config.log().format(), LogFormat::Text);
    assert_eq!(config.log().output(), LogOutput::Stdout);
    assert_eq!(config.server().address(), DEFAULT_SERVER_ADDRESS);
    assert_eq!(config.server().read_timeout(), Duration::from_secs(5));
    assert_eq!(config.server().read_header_timeout(), Duration::from_secs(2));
    assert_eq!(config.server().write_timeout(), Duration::from_secs(10));
    assert_eq!(config.server().idle_timeout(), Duration::from_secs(60));
    assert_eq!(config.server().shutdown_timeout(), Duration::from_secs(15));
}

#[test]
fn test_blank_values_count_as_absent() {
    let (config, errors) = Config::load(&env(&[("LOG_LEVEL", "  "), ("SERVER_ADDRESS", "")]));
    assert!(errors.is_none());
    assert_eq!(config, Config::default());
}

#[test]
fn test_enum_values_are_canonicalized() {
    for (raw, expected) in [
        ("debug", LogLevel::Debug),
        ("DEBUG", LogLevel::Debug),
        ("Info", LogLevel::Info),
        ("wArN", LogLevel::Warn),
        ("ERROR", LogLevel::Error),
    ] {
        let (config, errors) = Config::load(&env(&[("LOG_LEVEL", raw)]));
        assert!(errors.is_none(), "{raw}");
        assert_eq!(config.log().level(), expected);
    }

    let (config, errors) =
        Config::load(&env(&[("LOG_FORMAT", "JSON"), ("LOG_OUTPUT", " Stderr ")]));
    assert!(errors.is_none());
    assert_eq!(config.log().format(), LogFormat::Json);
    assert_eq!(config.log().output(), LogOutput::Stderr);
}

#[test]
fn test_unknown_enum_values_fall_back_with_one_error_each() {
    let cases = [
        ("LOG_LEVEL", "verbose", "debug, info, warn, error"),
        ("LOG_FORMAT", "xml", "text, json"),
        ("LOG_OUTPUT", "/var/log/app.log", "stdout, stderr"),
    ];

    for (key, raw, allowed) in cases {
        let (config, errors) = Config::load(&env(&[(key, raw)]));
        assert_eq!(config, Config::default());

        let errors = errors.expect("invalid enum must be reported");
        assert_eq!(errors.len(), 1);
        let message = errors.to_string();
        assert!(message.contains(key), "{message}");
        assert!(message.contains(raw), "{message}");
        assert!(message.contains(allowed), "{message}");
    }
}

#[test]
fn test_scenario_level_canonicalized_and_format_rejected() {
    let (config, errors) = Config::load(&env(&[("LOG_LEVEL", "DEBUG"), ("LOG_FORMAT", "xml")]));

    assert_eq!(config.log().level(), LogLevel::Debug);
    assert_eq!(config.log().format(), LogFormat::Text);

    let errors = errors.unwrap();
    assert_eq!(
        errors.errors(),
        &[ConfigError::NotAllowed {
            key: "LOG_FORMAT".to_string(),
            value: "xml".to_string(),
            allowed: "text, json".to_string(),
        }]
    );
}

#[test]
fn test_scenario_negative_read_timeout() {
    let (config, errors) = Config::load(&env(&[("SERVER_READ_TIMEOUT", "-5s")]));

    assert_eq!(config.server().read_timeout(), Duration::from_secs(5));
    let message = errors.unwrap().to_string();
    assert!(message.contains("SERVER_READ_TIMEOUT"));
    assert!(message.contains("must be positive"));
}

#[test]
fn test_positive_timeouts_reject_zero() {
    for key in [
        "SERVER_READ_TIMEOUT",
        "SERVER_READ_HEADER_TIMEOUT",
        "SERVER_WRITE_TIMEOUT",
        "SERVER_IDLE_TIMEOUT",
    ] {
        let (config, errors) = Config::load(&env(&[(key, "0s")]));
        assert_eq!(config, Config::default(), "{key}");
        let errors = errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].kind(), ErrorKind::Constraint);
    }
}

#[test]
fn test_shutdown_timeout_accepts_zero_rejects_negative() {
    let (config, errors) = Config::load(&env(&[("SERVER_SHUTDOWN_TIMEOUT", "0s")]));
    assert!(errors.is_none());
    assert_eq!(config.server().shutdown_timeout(), Duration::ZERO);

    let (config, errors) = Config::load(&env(&[("SERVER_SHUTDOWN_TIMEOUT", "-1s")]));
    assert_eq!(config.server().shutdown_timeout(), Duration::from_secs(15));
    assert!(errors.unwrap().to_string().contains("must be non-negative"));
}

#[test]
fn test_valid_overrides() {
    let (config, errors) = Config::load(&env(&[
        ("SERVER_ADDRESS", ":3030"),
        ("SERVER_READ_TIMEOUT", "1m"),
        ("SERVER_READ_HEADER_TIMEOUT", "250ms"),
        ("SERVER_WRITE_TIMEOUT", "1m30s"),
        ("SERVER_IDLE_TIMEOUT", "2h"),
        ("SERVER_SHUTDOWN_TIMEOUT", "1.5s"),
    ]));

    assert!(errors.is_none());
    let server = config.server();
    assert_eq!(server.address(), ":3030");
    assert_eq!(server.read_timeout(), Duration::from_secs(60));
    assert_eq!(server.read_header_timeout(), Duration::from_millis(250));
    assert_eq!(server.write_timeout(), Duration::from_secs(90));
    assert_eq!(server.idle_timeout(), Duration::from_secs(7200));
    assert_eq!(server.shutdown_timeout(), Duration::from_millis(1500));
}

#[test]
fn test_malformed_address_falls_back() {
    let (config, errors) = Config::load(&env(&[("SERVER_ADDRESS", "localhost")]));
    assert_eq!(config.server().address(), DEFAULT_SERVER_ADDRESS);
    let errors = errors.unwrap();
    assert_eq!(errors.errors()[0].kind(), ErrorKind::Parse);
    assert!(errors.to_string().contains("host:port"));
}

#[test]
fn test_every_problem_is_reported_in_load_order() {
    let (config, errors) = Config::load(&env(&[
        ("LOG_FORMAT", "xml"),
        ("SERVER_WRITE_TIMEOUT", "soon"),
        ("SERVER_IDLE_TIMEOUT", "-1s"),
    ]));

    assert_eq!(config, Config::default());

    let errors = errors.unwrap();
    assert_eq!(errors.len(), 3);
    let keys: Vec<_> = errors.iter().filter_map(ConfigError::key).collect();
    assert_eq!(
        keys,
        vec!["LOG_FORMAT", "SERVER_WRITE_TIMEOUT", "SERVER_IDLE_TIMEOUT"]
    );

    let joined = errors.to_string();
    assert_eq!(joined.lines().count(), 3);
    for err in &errors {
        assert!(joined.contains(&err.to_string()));
    }
}

#[test]
fn test_loading_is_idempotent() {
    let source = env(&[
        ("LOG_LEVEL", "warn"),
        ("LOG_OUTPUT", "nowhere"),
        ("SERVER_READ_TIMEOUT", "3s"),
    ]);

    let (first, first_errors) = Config::load(&source);
    let (second, second_errors) = Config::load(&source);

    assert_eq!(first, second);
    assert_eq!(first_errors, second_errors);
    assert_eq!(
        first_errors.map(|e| e.to_string()),
        second_errors.map(|e| e.to_string())
    );
}

#[test]
fn test_load_strict() {
    assert_eq!(Config::load_strict(&env(&[])).unwrap(), Config::default());
    assert!(Config::load_strict(&env(&[("LOG_LEVEL", "loud")])).is_err());
}

#[test]
fn test_out_of_range_timeout_is_reported_not_accepted() {
    let (config, errors) = Config::load(&env(&[(
        "SERVER_READ_TIMEOUT",
        "340282366920938463463374607431768211.999us",
    )]));

    assert_eq!(config.server().read_timeout(), Duration::from_secs(5));
    let errors = errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].kind(), ErrorKind::Parse);
    assert!(errors.to_string().contains("out of range"));
}
