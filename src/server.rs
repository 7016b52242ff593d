// src/server.rs
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use crate::config::{Config, ConfigError, StoreConfig};
use crate::database;
use crate::routes;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, Store};

/// Any of these ends the process with a failure exit status.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to create database pool: {0}")]
    Pool(#[from] sqlx::Error),
    #[error("failed to bind to any port starting at {port} on {host}")]
    Bind { host: IpAddr, port: u16 },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Opens the store, serves until `shutdown` resolves, then closes the store.
/// The store is closed on every path once it has been opened.
pub async fn run<F>(config: Config, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store: Arc<dyn Store> = match &config.store {
        StoreConfig::Postgres { database_url, max_connections } => {
            let pool = database::create_pool(database_url, *max_connections).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let result = match bind(config.host, config.port).await {
        Some(listener) => {
            let app = routes::app(AppState::new(store.clone()));
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
                .map_err(StartupError::Serve)
        }
        None => Err(StartupError::Bind { host: config.host, port: config.port }),
    };

    store.close().await;
    result
}

// Try port..port+20 to avoid crash when address is in use
async fn bind(host: IpAddr, base_port: u16) -> Option<TcpListener> {
    for offset in 0u16..=20 {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::from((host, port));
        match TcpListener::bind(addr).await {
            Ok(l) => {
                tracing::info!("Server running on {}", l.local_addr().unwrap_or(addr));
                return Some(l);
            }
            Err(e) => {
                if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
            }
        }
    }
    None
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error=%e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => { sigterm.recv().await; }
            Err(e) => {
                tracing::error!(error=%e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
