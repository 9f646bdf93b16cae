//! Database schema definitions
//!
//! Contains SQL for creating all tables and indexes, and the catalog seeders

use rusqlite::{params, Connection};

use super::DbError;
use crate::models::{Badge, LocationRate};

/// SQL schema for all tables
const SCHEMA: &str = r#"
-- Location rate catalog
CREATE TABLE IF NOT EXISTS locations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    state TEXT NOT NULL,
    country TEXT NOT NULL DEFAULT 'USA',
    energy_rate REAL NOT NULL CHECK (energy_rate > 0),
    renewable_percent REAL NOT NULL CHECK (renewable_percent BETWEEN 0 AND 100),
    latitude REAL,
    longitude REAL,
    sort_order INTEGER NOT NULL
);

-- Badge catalog
CREATE TABLE IF NOT EXISTS badges (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    icon TEXT NOT NULL,
    requirement REAL NOT NULL CHECK (requirement >= 0),
    color TEXT NOT NULL,
    sort_order INTEGER NOT NULL
);

-- Persisted predictions
CREATE TABLE IF NOT EXISTS predictions (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    usage_hours REAL NOT NULL,
    appliance_count INTEGER NOT NULL,
    location TEXT NOT NULL,
    monthly_kwh REAL NOT NULL,
    predicted_bill REAL NOT NULL,
    savings_percentage REAL NOT NULL,
    potential_savings REAL NOT NULL,
    optimized_bill REAL NOT NULL,
    recommendations TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_predictions_user ON predictions(user_id, created_at DESC);

-- Badge ownership; one row per (user, badge)
CREATE TABLE IF NOT EXISTS user_badges (
    user_id TEXT NOT NULL,
    badge_id TEXT NOT NULL REFERENCES badges(id),
    earned_at TEXT NOT NULL,
    UNIQUE(user_id, badge_id)
);

CREATE INDEX IF NOT EXISTS idx_user_badges_user ON user_badges(user_id);

-- Chat assistant history
CREATE TABLE IF NOT EXISTS chat_messages (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_chat_messages_user ON chat_messages(user_id, created_at);
"#;

/// Create all database tables
pub fn create_tables(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)
        .map_err(|e| DbError::Migration(e.to_string()))
}

/// Upsert the badge catalog by name
pub fn seed_badges(conn: &Connection, badges: &[Badge]) -> Result<(), DbError> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO badges (id, name, description, icon, requirement, color, sort_order)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(name) DO UPDATE SET
            description = excluded.description,
            icon = excluded.icon,
            requirement = excluded.requirement,
            color = excluded.color,
            sort_order = excluded.sort_order
        "#,
    )?;

    for (index, badge) in badges.iter().enumerate() {
        stmt.execute(params![
            badge.id,
            badge.name,
            badge.description,
            badge.icon,
            badge.requirement,
            badge.color,
            index as i64
        ])?;
    }

    tracing::info!("Seeded {} badges", badges.len());
    Ok(())
}

/// Upsert the location catalog by name
pub fn seed_locations(conn: &Connection, locations: &[LocationRate]) -> Result<(), DbError> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO locations (
            id, name, state, country, energy_rate, renewable_percent,
            latitude, longitude, sort_order
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(name) DO UPDATE SET
            state = excluded.state,
            country = excluded.country,
            energy_rate = excluded.energy_rate,
            renewable_percent = excluded.renewable_percent,
            latitude = excluded.latitude,
            longitude = excluded.longitude,
            sort_order = excluded.sort_order
        "#,
    )?;

    for (index, location) in locations.iter().enumerate() {
        stmt.execute(params![
            location.id,
            location.name,
            location.state,
            location.country,
            location.energy_rate,
            location.renewable_percent,
            location.latitude,
            location.longitude,
            index as i64
        ])?;
    }

    tracing::info!("Seeded {} locations", locations.len());
    Ok(())
}
