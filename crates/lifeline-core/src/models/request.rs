//! Blood request models.

use serde::{Deserialize, Serialize};

use super::blood::{BloodType, RequestStatus, Urgency};
use super::location::Location;

/// Who a request was raised on behalf of. A free attribute of the request,
/// not derived from the requester's profile role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequesterRole {
    Patient,
    Hospital,
}

impl RequesterRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequesterRole::Patient => "patient",
            RequesterRole::Hospital => "hospital",
        }
    }

    pub fn parse(s: &str) -> Option<RequesterRole> {
        match s {
            "patient" => Some(RequesterRole::Patient),
            "hospital" => Some(RequesterRole::Hospital),
            _ => None,
        }
    }
}

/// An open or settled request for blood units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodRequest {
    pub id: String,
    pub requester_principal_id: String,
    pub requester_role: RequesterRole,
    pub patient_name: String,
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    pub units_needed: i64,
    pub urgency: Urgency,
    pub hospital_name: Option<String>,
    pub contact_phone: String,
    #[serde(flatten)]
    pub location: Location,
    pub required_by: Option<String>,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Creation payload. Urgency defaults to normal, requester role to patient,
/// status always starts active.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBloodRequest {
    pub requester_role: Option<RequesterRole>,
    pub patient_name: String,
    #[serde(rename = "blood_group")]
    pub blood_type: BloodType,
    pub units_needed: i64,
    pub urgency: Option<Urgency>,
    pub hospital_name: Option<String>,
    pub contact_phone: String,
    #[serde(flatten)]
    pub location: Location,
    pub required_by: Option<String>,
    pub description: Option<String>,
}

impl BloodRequest {
    pub fn from_new(requester_principal_id: String, new: NewBloodRequest) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            requester_principal_id,
            requester_role: new.requester_role.unwrap_or(RequesterRole::Patient),
            patient_name: new.patient_name,
            blood_type: new.blood_type,
            units_needed: new.units_needed,
            urgency: new.urgency.unwrap_or(Urgency::Normal),
            hospital_name: new.hospital_name,
            contact_phone: new.contact_phone,
            location: new.location,
            required_by: new.required_by,
            description: new.description,
            status: RequestStatus::Active,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A request joined with the requester's profile contact details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: BloodRequest,
    pub requester_name: Option<String>,
    pub requester_phone: Option<String>,
}

/// Filters for the request board feed.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// Defaults to active when not given.
    pub status: Option<RequestStatus>,
    pub blood_type: Option<BloodType>,
    pub city_substring: Option<String>,
}
