// src/database.rs
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::PostgresConfig;

pub fn connect_options(config: &PostgresConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.db_name)
}

/// Opens the shared pool. Connections are checked out per query and returned
/// on drop; idle ones are closed after `max_connection_idle_time`.
pub async fn create_pool(config: &PostgresConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(config.max_connection_idle_time)
        .connect_with(connect_options(config))
        .await
}
