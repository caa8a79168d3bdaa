//! Principal profiles and roles.

use serde::{Deserialize, Serialize};

/// Role bound to a profile at creation time. There is no role-change
/// operation; the role is fixed for the lifetime of the profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Hospital,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Hospital => "hospital",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "donor" => Some(Role::Donor),
            "hospital" => Some(Role::Hospital),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A role-tagged record binding an authenticated principal to the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Identity id issued by the external identity collaborator.
    pub principal_id: String,
    pub role: Role,
    pub display_name: String,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    pub fn new(principal_id: String, role: Role, display_name: String, phone: Option<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            principal_id,
            role,
            display_name,
            phone,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial profile update. At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.phone.is_none()
    }
}
