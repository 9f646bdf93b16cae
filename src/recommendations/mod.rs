//! Recommendations module
//!
//! Produces the ordered, capped list of energy-saving tips attached to a prediction.

pub mod engine;
pub mod types;

// Re-export commonly used types
pub use engine::{generate_recommendations, MAX_RECOMMENDATIONS};
pub use types::{Recommendation, RecommendationInput, RecommendationList, RecommendationType};
