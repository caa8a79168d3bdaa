//! Admin verification of donors and blood banks, plus the one-time
//! bootstrap path for promoting a principal to admin.

use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::db::Database;
use crate::models::{BloodBank, DonorRecord, Profile, Role};
use crate::{BootstrapMode, ServiceError, ServiceResult};

/// What kind of record a verification decision targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Donor,
    Hospital,
}

/// The record a verification decision landed on.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum VerifiedEntity {
    Donor(DonorRecord),
    Bank(BloodBank),
}

pub struct VerificationAuthority<'a> {
    db: &'a Database,
}

impl<'a> VerificationAuthority<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Grant or revoke verification. Admin only; idempotent.
    pub fn set_verified(
        &self,
        ctx: &AuthContext,
        entity_type: EntityType,
        entity_id: &str,
        verified: bool,
    ) -> ServiceResult<VerifiedEntity> {
        ctx.require_admin()?;

        let entity = match entity_type {
            EntityType::Donor => self
                .db
                .set_donor_verified(entity_id, verified)?
                .map(VerifiedEntity::Donor),
            EntityType::Hospital => self
                .db
                .set_bank_verified(entity_id, verified)?
                .map(VerifiedEntity::Bank),
        };
        let entity = entity.ok_or_else(|| ServiceError::NotFound("entity".into()))?;

        tracing::info!(entity = entity_id, verified, "verification decision");
        Ok(entity)
    }

    /// Bootstrap path: create an admin profile for a principal that has
    /// none. Available only while bootstrap is enabled and no admin
    /// profile exists yet.
    pub fn promote_to_admin(
        &self,
        bootstrap: BootstrapMode,
        principal_id: &str,
        display_name: &str,
        phone: Option<String>,
    ) -> ServiceResult<Profile> {
        if bootstrap != BootstrapMode::Enabled {
            return Err(ServiceError::Forbidden("bootstrap is disabled".into()));
        }
        if self.db.get_profile(principal_id)?.is_some() {
            return Err(ServiceError::Validation(
                "principal already has a profile".into(),
            ));
        }
        if self.db.admin_exists()? {
            return Err(ServiceError::Forbidden("an admin already exists".into()));
        }
        let name = display_name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("display_name is required".into()));
        }

        let profile = Profile::new(principal_id.to_string(), Role::Admin, name.to_string(), phone);
        self.db.insert_profile(&profile)?;
        tracing::info!(principal = principal_id, "admin bootstrapped");
        Ok(profile)
    }
}
