//! Data models module
//!
//! Contains all data structures shared across the application:
//! - Location rate reference data
//! - Prediction inputs, results and persisted records
//! - Badge catalog and ownership types
//! - Chat message types

pub mod badge;
pub mod chat;
pub mod location;
pub mod prediction;

pub use badge::{Badge, BadgeProgress, EarnedBadge, NextBadge};
pub use chat::{ChatMessage, ChatRole};
pub use location::LocationRate;
pub use prediction::{PredictionInput, PredictionRecord, PredictionResult};
