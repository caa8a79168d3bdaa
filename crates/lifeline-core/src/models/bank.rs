//! Blood bank and stock models.

use serde::{Deserialize, Serialize};

use super::blood::BloodType;
use super::location::Location;

/// A blood bank's directory listing. One per hospital-role principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodBank {
    pub id: String,
    pub principal_id: String,
    pub name: String,
    pub registration_number: Option<String>,
    #[serde(flatten)]
    pub location: Location,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub operating_hours: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl BloodBank {
    pub fn new(principal_id: String, name: String, location: Location) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            principal_id,
            name,
            registration_number: None,
            location,
            phone: None,
            email: None,
            operating_hours: None,
            is_verified: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Registration payload for a new blood bank.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBloodBank {
    pub name: String,
    pub registration_number: Option<String>,
    #[serde(flatten)]
    pub location: Location,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub operating_hours: Option<String>,
}

/// Owner-update whitelist for a blood bank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankUpdate {
    pub name: Option<String>,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub operating_hours: Option<String>,
}

impl BankUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.registration_number.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.pincode.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.operating_hours.is_none()
    }
}

/// Per-bank, per-type unit count. Exactly one row exists for each of the
/// eight canonical types from the moment the bank is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockEntry {
    pub blood_bank_id: String,
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    pub units_available: i64,
    pub last_updated: String,
}

/// A bank with its embedded stock list, as returned by directory search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankWithStock {
    #[serde(flatten)]
    pub bank: BloodBank,
    pub stock: Vec<StockEntry>,
}

impl BankWithStock {
    /// Whether any units of the given type are on hand.
    pub fn has_stock_of(&self, blood_type: BloodType) -> bool {
        self.stock
            .iter()
            .any(|s| s.blood_type == blood_type && s.units_available > 0)
    }
}
