//! Logging setup driven by [`LogConfig`]

use anyhow::Result;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat, LogOutput};

const TARGETS: &[&str] = &["cfgload", "cfgload_server", "tower_http"];

/// Filter directive enabling our targets and the HTTP tracing layer at `config`'s level.
pub fn filter_directive(config: &LogConfig) -> String {
    let level = config.level();
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn writer(output: LogOutput) -> BoxMakeWriter {
    match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(config))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer(config.output()))
        .with_target(false)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true);

    match config.format() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
