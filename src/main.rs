// src/main.rs
mod config;
mod database;
mod dtos;
mod error;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
#[cfg(test)]
mod test_utils;

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ServerConfig};
use crate::repositories::product::PostgresProductRepository;
use crate::services::product::ProductService;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Create database pool
    let db_pool = match database::create_pool(&config.postgres).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(
                error = %e,
                host = %config.postgres.host,
                port = config.postgres.port,
                db = %config.postgres.db_name,
                "Failed to create database pool"
            );
            return ExitCode::FAILURE;
        }
    };

    // Create application state
    let repository = Arc::new(PostgresProductRepository::new(db_pool.clone()));
    let app_state = state::AppState::new(ProductService::new(repository));
    let app = routes::create_app(app_state);

    let listener = match bind(&config.server).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(host = %config.server.host, port = config.server.port, error=%e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Server running on {}", addr);
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db_pool.close().await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error=%e, "Server error");
            ExitCode::FAILURE
        }
    }
}

/// Binds exactly the configured address; a taken port is an error.
async fn bind(server: &ServerConfig) -> io::Result<TcpListener> {
    let host: IpAddr = server
        .host
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    TcpListener::bind(SocketAddr::from((host, server.port))).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
