use std::sync::Arc;

use anyhow::Result;
use cfgload::{config::Config, server, telemetry};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let (config, errors) = Config::from_env();

    // Logging is configured by the snapshot itself, so problems found while
    // loading are only reported once the subscriber is up.
    telemetry::init(config.log())?;

    match dotenv {
        Ok(path) => info!("Loaded environment overrides from {}", path.display()),
        Err(e) if e.not_found() => info!("No .env file found, using environment variables only"),
        Err(e) => warn!("Error loading .env file: {}", e),
    }

    if let Some(errors) = errors {
        for err in &errors {
            error!(key = err.key().unwrap_or(""), "{}", err);
        }
        error!(count = errors.len(), "Invalid configuration, refusing to start");
        return Err(errors.into());
    }

    info!("cfgload {} starting", cfgload::VERSION);
    info!(
        level = %config.log().level(),
        format = %config.log().format(),
        output = %config.log().output(),
        "Logging configured"
    );

    server::run(Arc::new(config), server::shutdown_signal()).await
}
