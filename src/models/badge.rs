//! Badge data types
//!
//! Static badge catalog entries, per-user ownership and progress toward the next badge.

use serde::{Deserialize, Serialize};

/// Achievement badge from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Savings percentage threshold (>= 0)
    pub requirement: f64,
    pub color: String,
}

impl Badge {
    /// Whether a savings percentage meets this badge's threshold
    pub fn is_met_by(&self, savings_percentage: f64) -> bool {
        self.requirement <= savings_percentage
    }
}

/// A badge owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    #[serde(flatten)]
    pub badge: Badge,
    /// RFC 3339 UTC timestamp
    pub earned_at: String,
}

/// The closest badge a user has not earned yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextBadge {
    pub name: String,
    pub requirement: f64,
    /// Progress toward the requirement (0-100)
    pub progress: f64,
}

/// Gamification progress for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeProgress {
    /// Best savings percentage across the user's predictions
    pub current_savings: f64,
    pub total_badges: u32,
    pub next_badge: Option<NextBadge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_is_inclusive() {
        let badge = Badge {
            id: "badge-1".to_string(),
            name: "Green Champion".to_string(),
            description: "Achieved 15% energy savings".to_string(),
            icon: "🏆".to_string(),
            requirement: 15.0,
            color: "#8b5cf6".to_string(),
        };

        assert!(badge.is_met_by(15.0));
        assert!(badge.is_met_by(15.5));
        assert!(!badge.is_met_by(14.9));
    }

    #[test]
    fn test_progress_serializes_null_next_badge() {
        let progress = BadgeProgress {
            current_savings: 25.0,
            total_badges: 5,
            next_badge: None,
        };

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"nextBadge\":null"));
        assert!(json.contains("\"totalBadges\":5"));
    }
}
