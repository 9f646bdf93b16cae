//! Rate lookup
//!
//! Resolves a free-text location to an energy rate, falling back to a default
//! rate when nothing in the catalog matches.

use serde::Serialize;

use crate::models::LocationRate;

/// Rate applied when no catalog entry matches, in USD per kWh
pub const DEFAULT_ENERGY_RATE: f64 = 0.13;

/// Result of resolving a location against the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLookup {
    /// Matched catalog entry, `None` for the unknown-location fallback
    pub location: Option<LocationRate>,
    pub energy_rate: f64,
    pub renewable_percent: Option<f64>,
}

impl RateLookup {
    /// Fallback result for an unmatched location
    pub fn unknown() -> Self {
        Self {
            location: None,
            energy_rate: DEFAULT_ENERGY_RATE,
            renewable_percent: None,
        }
    }

    /// Result for a matched catalog entry
    pub fn matched(location: &LocationRate) -> Self {
        Self {
            energy_rate: location.energy_rate,
            renewable_percent: Some(location.renewable_percent),
            location: Some(location.clone()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.location.is_none()
    }
}

/// Find the first catalog entry matching a location string.
///
/// Matching is case-insensitive substring containment in either direction, so
/// both "york" and "New York, NY" resolve to "New York". Catalog order decides
/// between several candidates.
pub fn find_location<'a>(catalog: &'a [LocationRate], query: &str) -> Option<&'a LocationRate> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    catalog.iter().find(|location| {
        let name = location.name.to_lowercase();
        name.contains(&query) || query.contains(&name)
    })
}

/// Resolve a location to its rate, using the default rate when unmatched
pub fn lookup_rate(catalog: &[LocationRate], query: &str) -> RateLookup {
    match find_location(catalog, query) {
        Some(location) => RateLookup::matched(location),
        None => {
            tracing::debug!(
                "No rate for location {:?}, using default {:.2} USD/kWh",
                query,
                DEFAULT_ENERGY_RATE
            );
            RateLookup::unknown()
        }
    }
}

/// Find a location by exact name, ignoring case
pub fn find_by_name<'a>(catalog: &'a [LocationRate], name: &str) -> Option<&'a LocationRate> {
    let name = name.trim();
    catalog
        .iter()
        .find(|location| location.name.eq_ignore_ascii_case(name))
}

/// Search locations whose name or state contains the query, ignoring case
pub fn search_locations(catalog: &[LocationRate], query: &str, limit: usize) -> Vec<LocationRate> {
    let query = query.trim().to_lowercase();

    catalog
        .iter()
        .filter(|location| {
            location.name.to_lowercase().contains(&query)
                || location.state.to_lowercase().contains(&query)
        })
        .take(limit)
        .cloned()
        .collect()
}
