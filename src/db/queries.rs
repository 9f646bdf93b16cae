//! Database query implementations
//!
//! Contains functions for querying catalogs, predictions, badge ownership and chat history

use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::DbError;
use crate::models::{
    Badge, ChatMessage, ChatRole, EarnedBadge, LocationRate, PredictionRecord, PredictionResult,
};

const LOCATION_COLUMNS: &str =
    "id, name, state, country, energy_rate, renewable_percent, latitude, longitude";

const BADGE_COLUMNS: &str = "b.id, b.name, b.description, b.icon, b.requirement, b.color";

const PREDICTION_COLUMNS: &str = r#"
    id, user_id, usage_hours, appliance_count, location,
    monthly_kwh, predicted_bill, savings_percentage, potential_savings, optimized_bill,
    recommendations, created_at
"#;

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<LocationRate> {
    Ok(LocationRate {
        id: row.get(0)?,
        name: row.get(1)?,
        state: row.get(2)?,
        country: row.get(3)?,
        energy_rate: row.get(4)?,
        renewable_percent: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
    })
}

fn badge_from_row(row: &Row<'_>) -> rusqlite::Result<Badge> {
    Ok(Badge {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        icon: row.get(3)?,
        requirement: row.get(4)?,
        color: row.get(5)?,
    })
}

/// Raw prediction row; the recommendation list is still JSON text
struct PredictionRow {
    record: PredictionRecord,
    recommendations_json: String,
}

fn prediction_from_row(row: &Row<'_>) -> rusqlite::Result<PredictionRow> {
    Ok(PredictionRow {
        record: PredictionRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            usage_hours: row.get(2)?,
            appliance_count: row.get(3)?,
            location: row.get(4)?,
            result: PredictionResult {
                monthly_kwh: row.get(5)?,
                predicted_bill: row.get(6)?,
                savings_percentage: row.get(7)?,
                potential_savings: row.get(8)?,
                optimized_bill: row.get(9)?,
                recommendations: Vec::new(),
            },
            created_at: row.get(11)?,
        },
        recommendations_json: row.get(10)?,
    })
}

impl PredictionRow {
    fn decode(self) -> Result<PredictionRecord, DbError> {
        let mut record = self.record;
        record.result.recommendations = serde_json::from_str(&self.recommendations_json)?;
        Ok(record)
    }
}

/// Get all locations in catalog order
pub fn get_locations(conn: &Connection) -> Result<Vec<LocationRate>, DbError> {
    let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations ORDER BY sort_order ASC");
    let mut stmt = conn.prepare(&sql)?;

    let locations = stmt
        .query_map([], location_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(locations)
}

/// Get a single location by ID
pub fn get_location(conn: &Connection, id: &str) -> Result<Option<LocationRate>, DbError> {
    let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1");
    let location = conn
        .query_row(&sql, params![id], location_from_row)
        .optional()?;

    Ok(location)
}

/// Get the badge catalog, ascending by requirement
pub fn get_badges(conn: &Connection) -> Result<Vec<Badge>, DbError> {
    let sql = format!("SELECT {BADGE_COLUMNS} FROM badges b ORDER BY b.sort_order ASC");
    let mut stmt = conn.prepare(&sql)?;

    let badges = stmt
        .query_map([], badge_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(badges)
}

/// Get the ids of all badges a user owns
pub fn get_owned_badge_ids(conn: &Connection, user_id: &str) -> Result<HashSet<String>, DbError> {
    let mut stmt = conn.prepare("SELECT badge_id FROM user_badges WHERE user_id = ?1")?;

    let ids = stmt
        .query_map(params![user_id], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    Ok(ids)
}

/// Record badge ownership unless the user already has it.
/// Returns `true` when a new row was written.
pub fn insert_user_badge(
    conn: &Connection,
    user_id: &str,
    badge_id: &str,
    earned_at: &str,
) -> Result<bool, DbError> {
    let inserted = conn.execute(
        r#"
        INSERT INTO user_badges (user_id, badge_id, earned_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(user_id, badge_id) DO NOTHING
        "#,
        params![user_id, badge_id, earned_at],
    )?;

    Ok(inserted == 1)
}

/// Get a user's badges, most recently earned first
pub fn get_user_badges(conn: &Connection, user_id: &str) -> Result<Vec<EarnedBadge>, DbError> {
    let sql = format!(
        r#"
        SELECT {BADGE_COLUMNS}, ub.earned_at
        FROM user_badges ub
        JOIN badges b ON b.id = ub.badge_id
        WHERE ub.user_id = ?1
        ORDER BY ub.earned_at DESC, b.requirement DESC
        "#
    );
    let mut stmt = conn.prepare(&sql)?;

    let badges = stmt
        .query_map(params![user_id], |row| {
            Ok(EarnedBadge {
                badge: badge_from_row(row)?,
                earned_at: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(badges)
}

/// Insert a prediction record
pub fn insert_prediction(conn: &Connection, record: &PredictionRecord) -> Result<(), DbError> {
    let recommendations = serde_json::to_string(&record.result.recommendations)?;

    conn.execute(
        r#"
        INSERT INTO predictions (
            id, user_id, usage_hours, appliance_count, location,
            monthly_kwh, predicted_bill, savings_percentage, potential_savings, optimized_bill,
            recommendations, created_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
        params![
            record.id,
            record.user_id,
            record.usage_hours,
            record.appliance_count,
            record.location,
            record.result.monthly_kwh,
            record.result.predicted_bill,
            record.result.savings_percentage,
            record.result.potential_savings,
            record.result.optimized_bill,
            recommendations,
            record.created_at
        ],
    )?;

    Ok(())
}

/// Get a single prediction by ID
pub fn get_prediction(conn: &Connection, id: &str) -> Result<Option<PredictionRecord>, DbError> {
    let sql = format!("SELECT {PREDICTION_COLUMNS} FROM predictions WHERE id = ?1");

    conn.query_row(&sql, params![id], prediction_from_row)
        .optional()?
        .map(PredictionRow::decode)
        .transpose()
}

/// Get a user's predictions, newest first
pub fn get_prediction_history(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<PredictionRecord>, DbError> {
    let sql = format!(
        r#"
        SELECT {PREDICTION_COLUMNS}
        FROM predictions
        WHERE user_id = ?1
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?2
        "#
    );
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(params![user_id, limit], prediction_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(PredictionRow::decode).collect()
}

/// Best savings percentage across a user's predictions, `None` without history
pub fn get_best_savings_percentage(conn: &Connection, user_id: &str) -> Result<Option<f64>, DbError> {
    let best = conn.query_row(
        "SELECT MAX(savings_percentage) FROM predictions WHERE user_id = ?1",
        params![user_id],
        |row| row.get::<_, Option<f64>>(0),
    )?;

    Ok(best)
}

/// Insert a chat message
pub fn insert_chat_message(conn: &Connection, message: &ChatMessage) -> Result<(), DbError> {
    conn.execute(
        r#"
        INSERT INTO chat_messages (id, user_id, role, content, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            message.id,
            message.user_id,
            message.role.as_str(),
            message.content,
            message.created_at
        ],
    )?;

    Ok(())
}

/// Get a user's chat history, oldest first
pub fn get_chat_history(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<ChatMessage>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, user_id, role, content, created_at
        FROM chat_messages
        WHERE user_id = ?1
        ORDER BY created_at ASC, rowid ASC
        LIMIT ?2
        "#,
    )?;

    let rows = stmt
        .query_map(params![user_id, limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, user_id, role, content, created_at)| {
            let role = ChatRole::parse(&role).ok_or_else(|| DbError::InvalidColumn {
                column: "role",
                value: role.clone(),
            })?;
            Ok(ChatMessage {
                id,
                user_id,
                role,
                content,
                created_at,
            })
        })
        .collect()
}

/// Delete a user's chat history, returning the number of removed messages
pub fn delete_chat_history(conn: &Connection, user_id: &str) -> Result<usize, DbError> {
    let deleted = conn.execute("DELETE FROM chat_messages WHERE user_id = ?1", params![user_id])?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{schema, seed};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        schema::seed_badges(&conn, &seed::default_badges()).unwrap();
        schema::seed_locations(&conn, &seed::default_locations()).unwrap();
        conn
    }

    fn record(id: &str, user_id: &str, savings: f64, created_at: &str) -> PredictionRecord {
        PredictionRecord {
            id: id.to_string(),
            user_id: Some(user_id.to_string()),
            usage_hours: 5.5,
            appliance_count: 3,
            location: "New York".to_string(),
            result: PredictionResult {
                monthly_kwh: 49.5,
                predicted_bill: 9.9,
                savings_percentage: savings,
                potential_savings: 1.63,
                optimized_bill: 8.27,
                recommendations: vec!["first".to_string(), "second".to_string()],
            },
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_locations_in_seed_order() {
        let conn = setup();
        let locations = get_locations(&conn).unwrap();
        let names: Vec<_> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names[0], "New York");
        assert_eq!(names[names.len() - 1], "Miami");
    }

    #[test]
    fn test_get_location_by_id() {
        let conn = setup();
        let seattle = get_location(&conn, "loc-seattle").unwrap().unwrap();
        assert_eq!(seattle.state, "WA");
        assert_eq!(seattle.coordinates(), Some((47.6062, -122.3321)));

        assert!(get_location(&conn, "loc-atlantis").unwrap().is_none());
    }

    #[test]
    fn test_badges_ascending_requirement() {
        let conn = setup();
        let requirements: Vec<f64> = get_badges(&conn).unwrap().iter().map(|b| b.requirement).collect();
        assert_eq!(requirements, vec![0.0, 10.0, 15.0, 20.0, 25.0]);
    }

    #[test]
    fn test_insert_user_badge_if_absent() {
        let conn = setup();
        let now = "2026-03-01T10:00:00.000Z";

        assert!(insert_user_badge(&conn, "u1", "badge-eco-warrior", now).unwrap());
        assert!(!insert_user_badge(&conn, "u1", "badge-eco-warrior", now).unwrap());
        assert!(insert_user_badge(&conn, "u2", "badge-eco-warrior", now).unwrap());

        let owned = get_owned_badge_ids(&conn, "u1").unwrap();
        assert_eq!(owned.len(), 1);
        assert!(owned.contains("badge-eco-warrior"));
    }

    #[test]
    fn test_user_badges_newest_first() {
        let conn = setup();
        insert_user_badge(&conn, "u1", "badge-energy-novice", "2026-03-01T10:00:00.000Z").unwrap();
        insert_user_badge(&conn, "u1", "badge-green-champion", "2026-03-02T10:00:00.000Z").unwrap();

        let badges = get_user_badges(&conn, "u1").unwrap();
        assert_eq!(badges.len(), 2);
        assert_eq!(badges[0].badge.name, "Green Champion");
        assert_eq!(badges[1].earned_at, "2026-03-01T10:00:00.000Z");
    }

    #[test]
    fn test_prediction_round_trip_decodes_recommendations() {
        let conn = setup();
        let stored = record("p1", "u1", 16.5, "2026-03-01T10:00:00.000Z");
        insert_prediction(&conn, &stored).unwrap();

        let loaded = get_prediction(&conn, "p1").unwrap().unwrap();
        assert_eq!(loaded, stored);

        assert!(get_prediction(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_prediction_history_newest_first_with_limit() {
        let conn = setup();
        insert_prediction(&conn, &record("p1", "u1", 15.5, "2026-03-01T10:00:00.000Z")).unwrap();
        insert_prediction(&conn, &record("p2", "u1", 17.0, "2026-03-02T10:00:00.000Z")).unwrap();
        insert_prediction(&conn, &record("p3", "u1", 16.0, "2026-03-03T10:00:00.000Z")).unwrap();
        insert_prediction(&conn, &record("p4", "u2", 25.0, "2026-03-04T10:00:00.000Z")).unwrap();

        let history = get_prediction_history(&conn, "u1", 2).unwrap();
        let ids: Vec<_> = history.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p2"]);
    }

    #[test]
    fn test_best_savings_percentage() {
        let conn = setup();
        assert_eq!(get_best_savings_percentage(&conn, "u1").unwrap(), None);

        insert_prediction(&conn, &record("p1", "u1", 15.5, "2026-03-01T10:00:00.000Z")).unwrap();
        insert_prediction(&conn, &record("p2", "u1", 18.0, "2026-03-02T10:00:00.000Z")).unwrap();
        insert_prediction(&conn, &record("p3", "u1", 16.0, "2026-03-03T10:00:00.000Z")).unwrap();

        assert_eq!(get_best_savings_percentage(&conn, "u1").unwrap(), Some(18.0));
    }

    #[test]
    fn test_chat_history_and_clear() {
        let conn = setup();
        let mut question = ChatMessage::new(Some("u1".to_string()), ChatRole::User, "hi".to_string());
        question.created_at = "2026-03-01T10:00:00.000Z".to_string();
        let mut answer = ChatMessage::new(Some("u1".to_string()), ChatRole::Assistant, "hello".to_string());
        answer.created_at = "2026-03-01T10:00:01.000Z".to_string();

        insert_chat_message(&conn, &answer).unwrap();
        insert_chat_message(&conn, &question).unwrap();

        let history = get_chat_history(&conn, "u1", 50).unwrap();
        assert_eq!(history, vec![question, answer]);

        assert_eq!(delete_chat_history(&conn, "u1").unwrap(), 2);
        assert!(get_chat_history(&conn, "u1", 50).unwrap().is_empty());
    }
}
