//! Database module for SQLite operations
//!
//! This module handles all database interactions including:
//! - Schema creation and catalog seeding
//! - Location, badge, prediction and chat queries
//! - The SQLite implementation of the store traits

pub mod queries;
pub mod schema;
pub mod seed;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::Connection;
use thiserror::Error;

use crate::models::{Badge, ChatMessage, EarnedBadge, LocationRate, PredictionRecord};
use crate::store::{BadgeStore, ChatStore, LocationCatalog, PredictionStore};

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid value in column '{column}': {value}")]
    InvalidColumn { column: &'static str, value: String },

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Database connection wrapper
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) a database file
    pub fn new(path: PathBuf) -> Result<Self, DbError> {
        let conn = Connection::open(&path)?;
        Self::configure(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    fn configure(conn: &Connection) -> Result<(), DbError> {
        // Enable foreign keys
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    /// Initialize the schema and seed the static catalogs
    pub fn initialize(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        schema::create_tables(&conn)?;
        schema::seed_badges(&conn, &seed::default_badges())?;
        schema::seed_locations(&conn, &seed::default_locations())?;
        Ok(())
    }

    /// Get the database file path, `None` for in-memory databases
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Execute a query with the database connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }
}

impl LocationCatalog for Database {
    fn locations(&self) -> Result<Vec<LocationRate>, DbError> {
        self.with_connection(queries::get_locations)
    }

    fn location_by_id(&self, id: &str) -> Result<Option<LocationRate>, DbError> {
        self.with_connection(|conn| queries::get_location(conn, id))
    }
}

impl BadgeStore for Database {
    fn badges(&self) -> Result<Vec<Badge>, DbError> {
        self.with_connection(queries::get_badges)
    }

    fn owned_badge_ids(&self, user_id: &str) -> Result<HashSet<String>, DbError> {
        self.with_connection(|conn| queries::get_owned_badge_ids(conn, user_id))
    }

    fn insert_user_badge(&self, user_id: &str, badge_id: &str, earned_at: &str) -> Result<bool, DbError> {
        self.with_connection(|conn| queries::insert_user_badge(conn, user_id, badge_id, earned_at))
    }

    fn user_badges(&self, user_id: &str) -> Result<Vec<EarnedBadge>, DbError> {
        self.with_connection(|conn| queries::get_user_badges(conn, user_id))
    }
}

impl PredictionStore for Database {
    fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), DbError> {
        self.with_connection(|conn| queries::insert_prediction(conn, record))
    }

    fn prediction_by_id(&self, id: &str) -> Result<Option<PredictionRecord>, DbError> {
        self.with_connection(|conn| queries::get_prediction(conn, id))
    }

    fn prediction_history(&self, user_id: &str, limit: u32) -> Result<Vec<PredictionRecord>, DbError> {
        self.with_connection(|conn| queries::get_prediction_history(conn, user_id, limit))
    }

    fn best_savings_percentage(&self, user_id: &str) -> Result<Option<f64>, DbError> {
        self.with_connection(|conn| queries::get_best_savings_percentage(conn, user_id))
    }
}

impl ChatStore for Database {
    fn insert_chat_message(&self, message: &ChatMessage) -> Result<(), DbError> {
        self.with_connection(|conn| queries::insert_chat_message(conn, message))
    }

    fn chat_history(&self, user_id: &str, limit: u32) -> Result<Vec<ChatMessage>, DbError> {
        self.with_connection(|conn| queries::get_chat_history(conn, user_id, limit))
    }

    fn clear_chat_history(&self, user_id: &str) -> Result<usize, DbError> {
        self.with_connection(|conn| queries::delete_chat_history(conn, user_id))
    }
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("energysaver").join("energysaver.db")
}
