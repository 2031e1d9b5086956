//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional
//! `projectledger.toml` in the working directory, then `PROJECTLEDGER__*`
//! environment variables (e.g. `PROJECTLEDGER__CACHE__ENABLED=false`).
//! Command line flags are applied on top by the CLI.

use std::time::Duration;

use anyhow::Result;
use compute::{DbStore, SummaryMode, default_summaries};
use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile};
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://projectledger.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Settings of the summary projection cache.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// When false every summary is computed on demand
    pub enabled: bool,
    pub max_capacity: u64,
    pub time_to_live_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Loads the configuration from `projectledger.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("projectledger").required(false))
    }

    fn build(file: File<FileSourceFile, FileFormat>) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("cache.enabled", true)?
            .set_default("cache.max_capacity", 1000)?
            .set_default("cache.time_to_live_secs", 300)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("PROJECTLEDGER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Applies command line overrides.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }

    pub fn summary_mode(&self) -> SummaryMode {
        if self.cache.enabled {
            SummaryMode::Cached {
                max_capacity: self.cache.max_capacity,
                time_to_live: Duration::from_secs(self.cache.time_to_live_secs),
            }
        } else {
            SummaryMode::OnDemand
        }
    }
}

/// Connects to the configured database and wires the summary provider.
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;
    debug!("Database connection established");

    Ok(app_state_for(db, config.summary_mode()))
}

/// Builds the shared state around an existing connection.
pub fn app_state_for(db: DatabaseConnection, mode: SummaryMode) -> AppState {
    let summaries = default_summaries(DbStore::new(db.clone()), mode);
    AppState { db, summaries }
}
