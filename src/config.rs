// src/config.rs
// Defaults form a complete local-development setup. Any value can be
// overridden from the environment (or a `.env` file loaded by `main`).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub db_name: String,
    pub max_connections: u32,
    pub max_connection_idle_time: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6432,
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            db_name: "productapp".to_string(),
            max_connections: 10,
            max_connection_idle_time: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// the defaults for every key the lookup does not know.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let server = ServerConfig {
            host: text("APP_HOST", defaults.server.host),
            port: parsed(&lookup, "APP_PORT", defaults.server.port)?,
        };

        let postgres = PostgresConfig {
            host: text("DB_HOST", defaults.postgres.host),
            port: parsed(&lookup, "DB_PORT", defaults.postgres.port)?,
            username: text("DB_USER", defaults.postgres.username),
            password: text("DB_PASSWORD", defaults.postgres.password),
            db_name: text("DB_NAME", defaults.postgres.db_name),
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", defaults.postgres.max_connections)?,
            max_connection_idle_time: Duration::from_secs(parsed(
                &lookup,
                "DB_MAX_IDLE_SECS",
                defaults.postgres.max_connection_idle_time.as_secs(),
            )?),
        };

        Ok(Self { server, postgres })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.postgres.host, "localhost");
        assert_eq!(config.postgres.port, 6432);
        assert_eq!(config.postgres.db_name, "productapp");
        assert_eq!(config.postgres.max_connections, 10);
        assert_eq!(config.postgres.max_connection_idle_time, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("APP_PORT", "9000"),
            ("DB_HOST", "db.internal"),
            ("DB_USER", "catalog"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("DB_MAX_IDLE_SECS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.postgres.host, "db.internal");
        assert_eq!(config.postgres.username, "catalog");
        assert_eq!(config.postgres.password, "postgres");
        assert_eq!(config.postgres.max_connections, 25);
        assert_eq!(config.postgres.max_connection_idle_time, Duration::from_secs(120));
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DB_PORT", "sixty")])).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "DB_PORT", .. }));
    }
}
