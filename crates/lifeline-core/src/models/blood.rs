//! Blood typing, urgency, and request status enums.

use serde::{Deserialize, Serialize};

/// One of the eight canonical blood types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodType {
    /// All canonical types, in display order. Every blood bank carries
    /// exactly one stock row per entry of this array.
    pub const ALL: [BloodType; 8] = [
        BloodType::APos,
        BloodType::ANeg,
        BloodType::BPos,
        BloodType::BNeg,
        BloodType::AbPos,
        BloodType::AbNeg,
        BloodType::OPos,
        BloodType::ONeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APos => "A+",
            BloodType::ANeg => "A-",
            BloodType::BPos => "B+",
            BloodType::BNeg => "B-",
            BloodType::AbPos => "AB+",
            BloodType::AbNeg => "AB-",
            BloodType::OPos => "O+",
            BloodType::ONeg => "O-",
        }
    }

    pub fn parse(s: &str) -> Option<BloodType> {
        match s {
            "A+" => Some(BloodType::APos),
            "A-" => Some(BloodType::ANeg),
            "B+" => Some(BloodType::BPos),
            "B-" => Some(BloodType::BNeg),
            "AB+" => Some(BloodType::AbPos),
            "AB-" => Some(BloodType::AbNeg),
            "O+" => Some(BloodType::OPos),
            "O-" => Some(BloodType::ONeg),
            _ => None,
        }
    }

    /// Position in the canonical display ordering.
    pub fn display_rank(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(Self::ALL.len())
    }
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a blood request. Lower rank sorts first in the board feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Urgent,
    Critical,
}

impl Urgency {
    /// Ordering key for the request board: critical first.
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Critical => 1,
            Urgency::Urgent => 2,
            Urgency::Normal => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Urgency> {
        match s {
            "normal" => Some(Urgency::Normal),
            "urgent" => Some(Urgency::Urgent),
            "critical" => Some(Urgency::Critical),
            _ => None,
        }
    }
}

/// Lifecycle status of a blood request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Active,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Active => "active",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<RequestStatus> {
        match s {
            "active" => Some(RequestStatus::Active),
            "fulfilled" => Some(RequestStatus::Fulfilled),
            "cancelled" => Some(RequestStatus::Cancelled),
            _ => None,
        }
    }

    /// Fulfilled and cancelled requests never change status again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_type_round_trip() {
        for bt in BloodType::ALL {
            assert_eq!(BloodType::parse(bt.as_str()), Some(bt));
        }
        assert_eq!(BloodType::parse("AB"), None);
        assert_eq!(BloodType::parse("o+"), None);
    }

    #[test]
    fn test_blood_type_serde_wire_format() {
        let json = serde_json::to_string(&BloodType::AbNeg).unwrap();
        assert_eq!(json, r#""AB-""#);
        let back: BloodType = serde_json::from_str(r#""O+""#).unwrap();
        assert_eq!(back, BloodType::OPos);
    }

    #[test]
    fn test_urgency_rank_ordering() {
        assert!(Urgency::Critical.rank() < Urgency::Urgent.rank());
        assert!(Urgency::Urgent.rank() < Urgency::Normal.rank());
    }

    #[test]
    fn test_status_terminal() {
        assert!(!RequestStatus::Active.is_terminal());
        assert!(RequestStatus::Fulfilled.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
    }
}
