//! Location reference data
//!
//! Energy rates and renewable mix per location. Seeded once, read-only afterwards.

use serde::{Deserialize, Serialize};

/// Electricity rate record for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRate {
    pub id: String,
    pub name: String,
    pub state: String,
    pub country: String,
    /// Price in USD per kWh
    pub energy_rate: f64,
    /// Share of renewable generation (0-100)
    pub renewable_percent: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationRate {
    /// Create a location in the default country without coordinates
    pub fn new(id: &str, name: &str, state: &str, energy_rate: f64, renewable_percent: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            country: "USA".to_string(),
            energy_rate,
            renewable_percent,
            latitude: None,
            longitude: None,
        }
    }

    /// Set coordinates
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Coordinates, only when both halves are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}
