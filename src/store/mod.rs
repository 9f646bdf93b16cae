//! Storage seams
//!
//! The core logic talks to persistence through these traits. `Database` is the
//! SQLite implementation; `MemoryStore` keeps everything in process memory.

pub mod memory;

use std::collections::HashSet;

use crate::db::DbError;
use crate::models::{Badge, ChatMessage, EarnedBadge, LocationRate, PredictionRecord};

pub use memory::MemoryStore;

/// Read access to the location rate catalog
pub trait LocationCatalog {
    /// All locations in catalog order
    fn locations(&self) -> Result<Vec<LocationRate>, DbError>;

    fn location_by_id(&self, id: &str) -> Result<Option<LocationRate>, DbError>;
}

/// Badge catalog and per-user ownership
pub trait BadgeStore {
    /// The badge catalog, ascending by requirement
    fn badges(&self) -> Result<Vec<Badge>, DbError>;

    fn owned_badge_ids(&self, user_id: &str) -> Result<HashSet<String>, DbError>;

    /// Record ownership if absent. Returns `true` only when this call created it.
    fn insert_user_badge(&self, user_id: &str, badge_id: &str, earned_at: &str) -> Result<bool, DbError>;

    /// Owned badges, most recently earned first
    fn user_badges(&self, user_id: &str) -> Result<Vec<EarnedBadge>, DbError>;
}

/// Prediction persistence
pub trait PredictionStore {
    fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), DbError>;

    fn prediction_by_id(&self, id: &str) -> Result<Option<PredictionRecord>, DbError>;

    /// A user's predictions, newest first
    fn prediction_history(&self, user_id: &str, limit: u32) -> Result<Vec<PredictionRecord>, DbError>;

    /// Maximum savings percentage over a user's predictions
    fn best_savings_percentage(&self, user_id: &str) -> Result<Option<f64>, DbError>;
}

/// Chat history persistence
pub trait ChatStore {
    fn insert_chat_message(&self, message: &ChatMessage) -> Result<(), DbError>;

    /// A user's messages, oldest first
    fn chat_history(&self, user_id: &str, limit: u32) -> Result<Vec<ChatMessage>, DbError>;

    fn clear_chat_history(&self, user_id: &str) -> Result<usize, DbError>;
}

/// Everything the command layer needs from a backend
pub trait EnergyStore: LocationCatalog + BadgeStore + PredictionStore + ChatStore + Send + Sync {}

impl<T> EnergyStore for T where T: LocationCatalog + BadgeStore + PredictionStore + ChatStore + Send + Sync {}
