//! Store connection lifecycle: settings come from the environment, the pool
//! is built once at startup and injected everywhere that touches the store.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use thiserror::Error;

/// Shared connection handle, cheap to clone.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("database connection failed")]
    Connect(#[source] sea_orm::DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven settings for the store connection.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_url_key")]
    env_key: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    connect_timeout_secs: u64,
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout_secs() -> u64 {
    3
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            env_key: default_url_key(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            ..Self::default()
        }
    }

    /// Settings from the process environment. `DB_MAX_CONNECTIONS` and
    /// `DB_CONNECT_TIMEOUT_SECS` override the pool defaults when parseable.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Some(max) = env_u64("DB_MAX_CONNECTIONS") {
            settings.max_connections = max as u32;
        }
        if let Some(timeout) = env_u64("DB_CONNECT_TIMEOUT_SECS") {
            settings.connect_timeout_secs = timeout;
        }
        settings
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|raw| raw.parse().ok())
}

/// Open the process-wide pool. A failure here is fatal to all data features;
/// callers report it once and stop.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs));
    Database::connect(options).await.map_err(DbError::Connect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_database_url() {
        let settings = DatabaseSettings::default();
        assert_eq!(settings.env_key, "DATABASE_URL");
        assert_eq!(settings.max_connections, 5);
    }

    #[test]
    fn custom_env_key_is_reported_in_the_error() {
        let settings = DatabaseSettings::new("PARTNER_SUITE_TEST_DB_URL_UNSET");
        match settings.database_url() {
            Err(DbError::MissingUrl(key)) => {
                assert_eq!(key, "PARTNER_SUITE_TEST_DB_URL_UNSET");
            }
            other => panic!("expected MissingUrl, got {other:?}"),
        }
    }
}
