//! Profile directory: principal-to-role binding and contact details.

use serde::Serialize;

use crate::auth::AuthContext;
use crate::db::Database;
use crate::models::{BloodBank, DonorRecord, Profile, ProfileUpdate, Role};
use crate::{ServiceError, ServiceResult};

/// A profile together with its role-specific extension record.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor: Option<DonorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_bank: Option<BloodBank>,
}

pub struct ProfileDirectory<'a> {
    db: &'a Database,
}

impl<'a> ProfileDirectory<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create the caller's profile. The role is fixed at creation; admin
    /// profiles are only minted through the bootstrap path.
    pub fn create(
        &self,
        ctx: &AuthContext,
        role: Role,
        display_name: &str,
        phone: Option<String>,
    ) -> ServiceResult<Profile> {
        if display_name.trim().is_empty() {
            return Err(ServiceError::Validation("display_name is required".into()));
        }
        if role == Role::Admin {
            return Err(ServiceError::Forbidden(
                "admin profiles are created via bootstrap only".into(),
            ));
        }
        if ctx.role.is_some() {
            return Err(ServiceError::Validation(
                "profile already exists for this principal".into(),
            ));
        }

        let profile = Profile::new(
            ctx.principal_id.clone(),
            role,
            display_name.trim().to_string(),
            phone,
        );
        self.db.insert_profile(&profile)?;
        tracing::debug!(principal = %profile.principal_id, role = role.as_str(), "profile created");
        Ok(profile)
    }

    /// The caller's profile with its role extension, or None when no profile
    /// has been created yet.
    pub fn view(&self, ctx: &AuthContext) -> ServiceResult<Option<ProfileView>> {
        let profile = match self.db.get_profile(&ctx.principal_id)? {
            Some(p) => p,
            None => return Ok(None),
        };

        let donor = match profile.role {
            Role::Donor => self.db.get_donor_by_principal(&profile.principal_id)?,
            _ => None,
        };
        let blood_bank = match profile.role {
            Role::Hospital => self.db.get_blood_bank_by_principal(&profile.principal_id)?,
            _ => None,
        };

        Ok(Some(ProfileView {
            profile,
            donor,
            blood_bank,
        }))
    }

    /// Partial update of the caller's own contact fields.
    pub fn update(&self, ctx: &AuthContext, update: &ProfileUpdate) -> ServiceResult<Profile> {
        if update.is_empty() {
            return Err(ServiceError::Validation("no fields to update".into()));
        }

        let updated = self.db.update_profile_fields(
            &ctx.principal_id,
            update.display_name.as_deref(),
            update.phone.as_deref(),
        )?;
        if !updated {
            return Err(ServiceError::NotFound("profile".into()));
        }

        self.db
            .get_profile(&ctx.principal_id)?
            .ok_or_else(|| ServiceError::NotFound("profile".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(db: &Database, principal: &str) -> AuthContext {
        AuthContext::resolve(db, principal).unwrap()
    }

    #[test]
    fn test_create_and_view() {
        let db = Database::open_in_memory().unwrap();
        let dir = ProfileDirectory::new(&db);

        let c = ctx(&db, "u1");
        let profile = dir.create(&c, Role::Donor, "Asha", Some("555".into())).unwrap();
        assert_eq!(profile.role, Role::Donor);

        let view = dir.view(&ctx(&db, "u1")).unwrap().unwrap();
        assert_eq!(view.profile.display_name, "Asha");
        assert!(view.donor.is_none());
        assert!(view.blood_bank.is_none());
    }

    #[test]
    fn test_duplicate_profile_rejected() {
        let db = Database::open_in_memory().unwrap();
        let dir = ProfileDirectory::new(&db);

        dir.create(&ctx(&db, "u1"), Role::Donor, "Asha", None).unwrap();
        let err = dir
            .create(&ctx(&db, "u1"), Role::Hospital, "Other", None)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_admin_role_not_creatable_directly() {
        let db = Database::open_in_memory().unwrap();
        let dir = ProfileDirectory::new(&db);

        let err = dir
            .create(&ctx(&db, "u1"), Role::Admin, "Sneaky", None)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn test_update_requires_fields() {
        let db = Database::open_in_memory().unwrap();
        let dir = ProfileDirectory::new(&db);
        dir.create(&ctx(&db, "u1"), Role::Donor, "Asha", None).unwrap();

        let err = dir
            .update(&ctx(&db, "u1"), &ProfileUpdate::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let updated = dir
            .update(
                &ctx(&db, "u1"),
                &ProfileUpdate {
                    phone: Some("777".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.phone, Some("777".into()));
        assert_eq!(updated.display_name, "Asha");
    }

    #[test]
    fn test_update_without_profile() {
        let db = Database::open_in_memory().unwrap();
        let dir = ProfileDirectory::new(&db);

        let err = dir
            .update(
                &ctx(&db, "ghost"),
                &ProfileUpdate {
                    phone: Some("777".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_view_includes_role_extension() {
        let db = Database::open_in_memory().unwrap();
        let dir = ProfileDirectory::new(&db);
        dir.create(&ctx(&db, "u1"), Role::Donor, "Asha", None).unwrap();

        let donor = crate::models::DonorRecord::new(
            "u1".into(),
            crate::models::BloodType::OPos,
            crate::models::Location::city("Metro"),
        );
        db.insert_donor(&donor).unwrap();

        let view = dir.view(&ctx(&db, "u1")).unwrap().unwrap();
        assert_eq!(view.donor.unwrap().id, donor.id);
    }
}
