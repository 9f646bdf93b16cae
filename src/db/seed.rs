//! Static catalog data
//!
//! Badges and location rates loaded into a fresh database. Both lists are in
//! catalog order.

use crate::models::{Badge, LocationRate};

fn badge(id: &str, name: &str, description: &str, icon: &str, requirement: f64, color: &str) -> Badge {
    Badge {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        requirement,
        color: color.to_string(),
    }
}

/// Default badge catalog, ascending by requirement
pub fn default_badges() -> Vec<Badge> {
    vec![
        badge("badge-energy-novice", "Energy Novice", "Started your energy-saving journey", "🌱", 0.0, "#10b981"),
        badge("badge-eco-warrior", "Eco Warrior", "Achieved 10% energy savings", "⚡", 10.0, "#3b82f6"),
        badge("badge-green-champion", "Green Champion", "Achieved 15% energy savings", "🏆", 15.0, "#8b5cf6"),
        badge("badge-sustainability-master", "Sustainability Master", "Achieved 20% energy savings", "👑", 20.0, "#f59e0b"),
        badge("badge-planet-protector", "Planet Protector", "Achieved 25% energy savings", "🌍", 25.0, "#ef4444"),
    ]
}

/// Default US city rates (USD/kWh) and renewable mix
pub fn default_locations() -> Vec<LocationRate> {
    vec![
        LocationRate::new("loc-new-york", "New York", "NY", 0.20, 28.0).with_coordinates(40.7128, -74.0060),
        LocationRate::new("loc-los-angeles", "Los Angeles", "CA", 0.22, 45.0).with_coordinates(34.0522, -118.2437),
        LocationRate::new("loc-chicago", "Chicago", "IL", 0.13, 15.0).with_coordinates(41.8781, -87.6298),
        LocationRate::new("loc-houston", "Houston", "TX", 0.12, 20.0).with_coordinates(29.7604, -95.3698),
        LocationRate::new("loc-phoenix", "Phoenix", "AZ", 0.13, 35.0).with_coordinates(33.4484, -112.0740),
        LocationRate::new("loc-philadelphia", "Philadelphia", "PA", 0.14, 18.0).with_coordinates(39.9526, -75.1652),
        LocationRate::new("loc-san-antonio", "San Antonio", "TX", 0.11, 22.0).with_coordinates(29.4241, -98.4936),
        LocationRate::new("loc-san-diego", "San Diego", "CA", 0.24, 50.0).with_coordinates(32.7157, -117.1611),
        LocationRate::new("loc-dallas", "Dallas", "TX", 0.12, 19.0).with_coordinates(32.7767, -96.7970),
        LocationRate::new("loc-san-jose", "San Jose", "CA", 0.21, 48.0).with_coordinates(37.3382, -121.8863),
        LocationRate::new("loc-austin", "Austin", "TX", 0.12, 25.0).with_coordinates(30.2672, -97.7431),
        LocationRate::new("loc-seattle", "Seattle", "WA", 0.10, 85.0).with_coordinates(47.6062, -122.3321),
        LocationRate::new("loc-denver", "Denver", "CO", 0.13, 30.0).with_coordinates(39.7392, -104.9903),
        LocationRate::new("loc-boston", "Boston", "MA", 0.22, 20.0).with_coordinates(42.3601, -71.0589),
        LocationRate::new("loc-miami", "Miami", "FL", 0.12, 12.0).with_coordinates(25.7617, -80.1918),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_badges_sorted_by_requirement() {
        let badges = default_badges();
        for pair in badges.windows(2) {
            assert!(pair[0].requirement <= pair[1].requirement);
        }
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let badge_names: HashSet<_> = default_badges().into_iter().map(|b| b.name).collect();
        assert_eq!(badge_names.len(), default_badges().len());

        let location_names: HashSet<_> = default_locations().into_iter().map(|l| l.name).collect();
        assert_eq!(location_names.len(), default_locations().len());
    }

    #[test]
    fn test_location_rates_are_valid() {
        for location in default_locations() {
            assert!(location.energy_rate > 0.0, "{} has no rate", location.name);
            assert!((0.0..=100.0).contains(&location.renewable_percent));
            assert!(location.coordinates().is_some());
        }
    }
}
