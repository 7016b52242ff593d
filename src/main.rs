// src/main.rs
mod routes;
mod handlers;
mod models;
mod database;
mod state;
mod dtos;
mod error;
mod config;
mod services;
mod store;
mod server;

#[cfg(test)]
mod api_tests;

use std::process::ExitCode;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::server::StartupError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront_api=debug,tower_http=debug,info")),
        )
        .init();

    let result = match Config::from_env() {
        Ok(config) => server::run(config, server::shutdown_signal()).await,
        Err(e) => Err(StartupError::from(e)),
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error=%e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}
