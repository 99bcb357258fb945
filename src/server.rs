//! HTTP server driven by [`ServerConfig`](crate::config::ServerConfig)
//!
//! The configured write timeout bounds request handling through
//! `tower-http`'s [`TimeoutLayer`]; the shutdown timeout bounds how long
//! in-flight requests may keep the process alive after a shutdown signal.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{Config, LogLevel};

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    build_time: &'static str,
    git_hash: &'static str,
    log_level: LogLevel,
    timestamp: DateTime<Utc>,
    uptime_secs: i64,
}

async fn index() -> impl IntoResponse {
    Html("<h1>cfgload</h1><p>Service online</p>")
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: crate::VERSION,
        build_time: crate::BUILD_TIME,
        git_hash: crate::GIT_HASH,
        log_level: state.config.log().level(),
        timestamp: now,
        uptime_secs: (now - state.started_at).num_seconds(),
    })
}

pub fn router(config: Arc<Config>) -> Router {
    let write_timeout = config.server().write_timeout();
    let state = AppState {
        config,
        started_at: Utc::now(),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(write_timeout)),
        )
        .with_state(state)
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn run<F>(config: Arc<Config>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = config.server().address().to_string();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    serve(listener, config, shutdown).await
}

/// Serve on an already-bound listener until `shutdown` resolves, then give
/// in-flight requests up to the configured shutdown timeout.
pub async fn serve<F>(listener: TcpListener, config: Arc<Config>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let server_config = config.server();
    let local_addr = listener.local_addr()?;
    let grace = server_config.shutdown_timeout();

    info!(
        read_timeout = ?server_config.read_timeout(),
        read_header_timeout = ?server_config.read_header_timeout(),
        write_timeout = ?server_config.write_timeout(),
        idle_timeout = ?server_config.idle_timeout(),
        shutdown_timeout = ?grace,
        "Server listening on {}",
        local_addr
    );

    let (drain_tx, drain_rx) = oneshot::channel::<()>();
    let app = router(config);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = drain_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            return result.context("Server task panicked")?.context("Server error");
        }
        _ = shutdown => {
            info!("Shutdown signal received, draining connections");
        }
    }

    let _ = drain_tx.send(());
    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => result.context("Server task panicked")?.context("Server error")?,
        Err(_) => {
            warn!(
                shutdown_timeout = ?grace,
                "Shutdown timeout elapsed, dropping in-flight requests"
            );
            server.abort();
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
