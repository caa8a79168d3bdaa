//! Completed donation records, counted in the admin reports.

use serde::{Deserialize, Serialize};

use super::blood::BloodType;

/// A completed donation logged by the donor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub blood_bank_id: Option<String>,
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    pub units: i64,
    /// ISO 8601 date (YYYY-MM-DD).
    pub donation_date: String,
    pub created_at: String,
}

/// Payload for logging a donation against the caller's donor record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonation {
    pub blood_bank_id: Option<String>,
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    pub units: i64,
    /// Defaults to today when not given.
    pub donation_date: Option<String>,
}

impl Donation {
    pub fn from_new(donor_id: String, new: NewDonation) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            donor_id,
            blood_bank_id: new.blood_bank_id,
            blood_type: new.blood_type,
            units: new.units,
            donation_date: new
                .donation_date
                .unwrap_or_else(|| now.date_naive().to_string()),
            created_at: now.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_date_defaults_to_today() {
        let d = Donation::from_new(
            "donor-1".into(),
            NewDonation {
                blood_bank_id: None,
                blood_type: BloodType::BPos,
                units: 1,
                donation_date: None,
            },
        );
        assert_eq!(d.donation_date, chrono::Utc::now().date_naive().to_string());
    }
}
