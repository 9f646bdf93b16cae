//! In-memory store

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use super::{BadgeStore, ChatStore, LocationCatalog, PredictionStore};
use crate::db::{seed, DbError};
use crate::models::{Badge, ChatMessage, EarnedBadge, LocationRate, PredictionRecord};

#[derive(Default)]
struct State {
    locations: Vec<LocationRate>,
    badges: Vec<Badge>,
    /// (user_id, badge_id) -> earned_at
    user_badges: HashMap<(String, String), String>,
    predictions: Vec<PredictionRecord>,
    chat_messages: Vec<ChatMessage>,
}

/// Store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Empty store without catalogs
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the default badge and location catalogs
    pub fn seeded() -> Self {
        Self::with_catalogs(seed::default_locations(), seed::default_badges())
    }

    pub fn with_catalogs(locations: Vec<LocationRate>, badges: Vec<Badge>) -> Self {
        Self {
            state: Mutex::new(State {
                locations,
                badges,
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DbError> {
        self.state.lock().map_err(|_| DbError::LockPoisoned)
    }
}

impl LocationCatalog for MemoryStore {
    fn locations(&self) -> Result<Vec<LocationRate>, DbError> {
        Ok(self.lock()?.locations.clone())
    }

    fn location_by_id(&self, id: &str) -> Result<Option<LocationRate>, DbError> {
        Ok(self.lock()?.locations.iter().find(|l| l.id == id).cloned())
    }
}

impl BadgeStore for MemoryStore {
    fn badges(&self) -> Result<Vec<Badge>, DbError> {
        Ok(self.lock()?.badges.clone())
    }

    fn owned_badge_ids(&self, user_id: &str) -> Result<HashSet<String>, DbError> {
        let state = self.lock()?;
        Ok(state
            .user_badges
            .keys()
            .filter(|(user, _)| user == user_id)
            .map(|(_, badge)| badge.clone())
            .collect())
    }

    fn insert_user_badge(&self, user_id: &str, badge_id: &str, earned_at: &str) -> Result<bool, DbError> {
        let mut state = self.lock()?;
        let key = (user_id.to_string(), badge_id.to_string());
        if state.user_badges.contains_key(&key) {
            return Ok(false);
        }
        state.user_badges.insert(key, earned_at.to_string());
        Ok(true)
    }

    fn user_badges(&self, user_id: &str) -> Result<Vec<EarnedBadge>, DbError> {
        let state = self.lock()?;
        let mut earned: Vec<EarnedBadge> = state
            .badges
            .iter()
            .filter_map(|badge| {
                state
                    .user_badges
                    .get(&(user_id.to_string(), badge.id.clone()))
                    .map(|earned_at| EarnedBadge {
                        badge: badge.clone(),
                        earned_at: earned_at.clone(),
                    })
            })
            .collect();

        earned.sort_by(|a, b| {
            b.earned_at
                .cmp(&a.earned_at)
                .then(b.badge.requirement.total_cmp(&a.badge.requirement))
        });
        Ok(earned)
    }
}

impl PredictionStore for MemoryStore {
    fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), DbError> {
        self.lock()?.predictions.push(record.clone());
        Ok(())
    }

    fn prediction_by_id(&self, id: &str) -> Result<Option<PredictionRecord>, DbError> {
        Ok(self.lock()?.predictions.iter().find(|p| p.id == id).cloned())
    }

    fn prediction_history(&self, user_id: &str, limit: u32) -> Result<Vec<PredictionRecord>, DbError> {
        let state = self.lock()?;
        // Reverse insertion order first so equal timestamps keep newest-inserted first
        let mut history: Vec<PredictionRecord> = state
            .predictions
            .iter()
            .rev()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history.truncate(limit as usize);
        Ok(history)
    }

    fn best_savings_percentage(&self, user_id: &str) -> Result<Option<f64>, DbError> {
        let state = self.lock()?;
        Ok(state
            .predictions
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .map(|p| p.result.savings_percentage)
            .reduce(f64::max))
    }
}

impl ChatStore for MemoryStore {
    fn insert_chat_message(&self, message: &ChatMessage) -> Result<(), DbError> {
        self.lock()?.chat_messages.push(message.clone());
        Ok(())
    }

    fn chat_history(&self, user_id: &str, limit: u32) -> Result<Vec<ChatMessage>, DbError> {
        let state = self.lock()?;
        let mut history: Vec<ChatMessage> = state
            .chat_messages
            .iter()
            .filter(|m| m.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        history.truncate(limit as usize);
        Ok(history)
    }

    fn clear_chat_history(&self, user_id: &str) -> Result<usize, DbError> {
        let mut state = self.lock()?;
        let before = state.chat_messages.len();
        state
            .chat_messages
            .retain(|m| m.user_id.as_deref() != Some(user_id));
        Ok(before - state.chat_messages.len())
    }
}
