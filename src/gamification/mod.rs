//! Gamification module
//!
//! Awards achievement badges from savings percentages and reports progress
//! toward the next badge.

pub mod badges;
pub mod progress;

pub use badges::{award_badges, newly_qualifying};
pub use progress::{next_badge, user_progress};
