//! Shared location value type.

use serde::{Deserialize, Serialize};

/// Postal location attached to donors, banks, and requests.
///
/// Latitude/longitude are stored but never used for distance ranking;
/// matching is city-substring only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub address: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    /// Minimal location with only the required city.
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }
}
