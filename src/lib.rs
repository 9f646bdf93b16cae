//! EnergySaver - Backend
//!
//! This library provides the Rust backend for the EnergySaver app.
//! It handles:
//! - Bill, savings and recommendation calculation
//! - Achievement badges and progress
//! - SQLite persistence of predictions, badges and chat history
//! - The energy assistant chat
//! - Line-oriented JSON IPC for the frontend

pub mod chat;
pub mod commands;
pub mod config;
pub mod db;
pub mod gamification;
pub mod ipc;
pub mod metrics;
pub mod models;
pub mod recommendations;
pub mod store;
pub mod validation;

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use config::{AppConfig, ConfigError, Environment};
use store::EnergyStore;
use validation::ValidationError;

/// Application state shared by all commands
pub struct AppState {
    pub store: Box<dyn EnergyStore>,
    pub config: AppConfig,
    /// Source of randomness for chat replies
    pub rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(store: Box<dyn EnergyStore>, config: AppConfig) -> Self {
        Self {
            store,
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// State with a fixed chat seed, for reproducible replies
    pub fn with_seed(store: Box<dyn EnergyStore>, config: AppConfig, seed: u64) -> Self {
        Self {
            store,
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

/// Error type for commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
            Self::Internal(_) => "internal",
        }
    }

    /// Message shown to the caller; storage and internal details stay hidden in production
    pub fn public_message(&self, environment: Environment) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) if environment.is_production() => {
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// Serialized as the plain message for the frontend
impl serde::Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Startup failures
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize logging to stderr; stdout carries IPC responses
pub fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Open and initialize the database named by the config
pub fn open_database(config: &AppConfig) -> Result<db::Database, RunError> {
    let db_path = &config.db_path;
    tracing::info!("Database path: {:?}", db_path);

    // Create database directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(db_path.clone())?;
    database.initialize().inspect_err(|e| {
        tracing::error!("Failed to initialize database schema: {}", e);
    })?;

    tracing::info!("Database initialized successfully at {:?}", db_path);
    Ok(database)
}

// ============================================================================
// Application Setup
// ============================================================================

/// Run the IPC host: one JSON request per stdin line, one response per stdout line
pub async fn run() -> Result<(), RunError> {
    let config = AppConfig::from_env()?;
    init_logging(config.log_level);

    tracing::info!(
        "Starting EnergySaver backend v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment.as_str()
    );

    let database = open_database(&config)?;
    let state = AppState::new(Box::new(database), config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = ipc::handle_line(&state, &line).await;
        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_kinds() {
        let not_found = CommandError::not_found("Location", "loc-x");
        assert_eq!(not_found.kind(), "not_found");
        assert_eq!(not_found.to_string(), "Location not found: loc-x");

        let invalid = CommandError::from(ValidationError::new("query", "Search query is required"));
        assert_eq!(invalid.kind(), "validation");
        assert_eq!(invalid.to_string(), "Invalid input: query: Search query is required");
    }

    #[test]
    fn test_production_hides_internal_details() {
        let err = CommandError::Database(db::DbError::LockPoisoned);
        assert_eq!(err.public_message(Environment::Development), "Database error: Lock poisoned");
        assert_eq!(err.public_message(Environment::Production), "An unexpected error occurred");

        let not_found = CommandError::not_found("Prediction", "p1");
        assert_eq!(
            not_found.public_message(Environment::Production),
            "Prediction not found: p1"
        );
    }

    #[test]
    fn test_command_error_serializes_as_string() {
        let err = CommandError::Internal("boom".to_string());
        assert_eq!(serde_json::to_string(&err).unwrap(), "\"Internal error: boom\"");
    }
}
