//! Badge evaluation
//!
//! A badge qualifies when its requirement is at or below the savings
//! percentage. Ownership is a set: awarding is insert-if-absent and never
//! removes a badge.

use std::collections::HashSet;

use chrono::{SecondsFormat, Utc};

use crate::db::DbError;
use crate::models::Badge;
use crate::store::BadgeStore;

/// Catalog badges met by `savings_percentage` and not in `owned`, in catalog order
pub fn newly_qualifying<'a>(
    catalog: &'a [Badge],
    owned: &HashSet<String>,
    savings_percentage: f64,
) -> Vec<&'a Badge> {
    catalog
        .iter()
        .filter(|badge| badge.is_met_by(savings_percentage))
        .filter(|badge| !owned.contains(&badge.id))
        .collect()
}

/// Award every qualifying badge the user does not own yet.
///
/// Returns exactly the badges this call created. A concurrent award of the
/// same badge loses at the store's insert-if-absent and is left out.
pub fn award_badges<S>(store: &S, user_id: &str, savings_percentage: f64) -> Result<Vec<Badge>, DbError>
where
    S: BadgeStore + ?Sized,
{
    let catalog = store.badges()?;
    let owned = store.owned_badge_ids(user_id)?;
    let earned_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut awarded = Vec::new();
    for badge in newly_qualifying(&catalog, &owned, savings_percentage) {
        if store.insert_user_badge(user_id, &badge.id, &earned_at)? {
            awarded.push(badge.clone());
        }
    }

    if !awarded.is_empty() {
        tracing::info!(
            "Awarded {} badge(s) to {}: {}",
            awarded.len(),
            user_id,
            awarded.iter().map(|b| b.name.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(awarded)
}
