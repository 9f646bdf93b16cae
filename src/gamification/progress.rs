//! Progress toward the next badge

use std::collections::HashSet;

use crate::db::DbError;
use crate::models::{Badge, BadgeProgress, NextBadge};
use crate::store::{BadgeStore, PredictionStore};

/// The closest unowned badge above `current`.
///
/// Zero-requirement badges never count as "next". Ties on requirement go to
/// the earlier catalog entry.
pub fn next_badge(catalog: &[Badge], owned: &HashSet<String>, current: f64) -> Option<NextBadge> {
    let mut best: Option<&Badge> = None;
    for badge in catalog {
        if owned.contains(&badge.id) || badge.requirement <= 0.0 || badge.requirement <= current {
            continue;
        }
        match best {
            Some(b) if b.requirement <= badge.requirement => {}
            _ => best = Some(badge),
        }
    }

    best.map(|badge| NextBadge {
        name: badge.name.clone(),
        requirement: badge.requirement,
        progress: current / badge.requirement * 100.0,
    })
}

/// Compute a user's progress from their best prediction and owned badges
pub fn user_progress<S>(store: &S, user_id: &str) -> Result<BadgeProgress, DbError>
where
    S: BadgeStore + PredictionStore + ?Sized,
{
    let current = store.best_savings_percentage(user_id)?.unwrap_or(0.0);
    let owned = store.owned_badge_ids(user_id)?;
    let catalog = store.badges()?;

    Ok(BadgeProgress {
        current_savings: current,
        total_badges: owned.len() as u32,
        next_badge: next_badge(&catalog, &owned, current),
    })
}
