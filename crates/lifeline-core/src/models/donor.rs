//! Donor records.

use serde::{Deserialize, Serialize};

use super::blood::BloodType;
use super::location::Location;

/// A donor's directory listing. One per donor-role principal.
///
/// `is_verified` is writable only through the verification authority; every
/// other field follows the owner-update whitelist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonorRecord {
    pub id: String,
    pub principal_id: String,
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    #[serde(flatten)]
    pub location: Location,
    pub is_available: bool,
    pub is_verified: bool,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub last_donation_date: Option<String>,
    pub medical_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl DonorRecord {
    /// New unverified, available donor record.
    pub fn new(principal_id: String, blood_type: BloodType, location: Location) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            principal_id,
            blood_type,
            location,
            is_available: true,
            is_verified: false,
            date_of_birth: None,
            gender: None,
            weight_kg: None,
            last_donation_date: None,
            medical_notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Registration payload for a new donor record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonorRecord {
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    #[serde(flatten)]
    pub location: Location,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub last_donation_date: Option<String>,
    pub medical_notes: Option<String>,
}

/// Owner-update whitelist. Fields left `None` are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonorUpdate {
    #[serde(rename = "blood_group")]
    pub blood_type: Option<BloodType>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_available: Option<bool>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub weight_kg: Option<f64>,
    pub last_donation_date: Option<String>,
    pub medical_notes: Option<String>,
}

impl DonorUpdate {
    pub fn is_empty(&self) -> bool {
        self.blood_type.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.pincode.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.is_available.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.weight_kg.is_none()
            && self.last_donation_date.is_none()
            && self.medical_notes.is_none()
    }
}

/// A donor record joined with the owning profile's contact details,
/// as returned by directory search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonorSummary {
    #[serde(flatten)]
    pub record: DonorRecord,
    pub display_name: String,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_donor_defaults() {
        let d = DonorRecord::new("u1".into(), BloodType::ONeg, Location::city("Metro"));
        assert!(d.is_available);
        assert!(!d.is_verified);
        assert_eq!(d.id.len(), 36);
        assert_eq!(d.location.city, "Metro");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(DonorUpdate::default().is_empty());
        let u = DonorUpdate {
            is_available: Some(false),
            ..Default::default()
        };
        assert!(!u.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let d = DonorRecord::new("u1".into(), BloodType::APos, Location::city("Metro"));
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["blood_group"], "A+");
        assert_eq!(v["city"], "Metro");
    }
}
