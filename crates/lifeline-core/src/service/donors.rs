//! Donor registration, owner updates, and donation logging.

use crate::auth::AuthContext;
use crate::db::Database;
use crate::models::{Donation, DonorRecord, DonorUpdate, NewDonation, NewDonorRecord, Role};
use crate::{ServiceError, ServiceResult};

pub struct DonorRegistry<'a> {
    db: &'a Database,
}

impl<'a> DonorRegistry<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register the caller's donor record. One per donor-role principal.
    pub fn register(&self, ctx: &AuthContext, new: NewDonorRecord) -> ServiceResult<DonorRecord> {
        ctx.require_role(Role::Donor)?;
        if new.location.city.trim().is_empty() {
            return Err(ServiceError::Validation("city is required".into()));
        }
        if self.db.get_donor_by_principal(&ctx.principal_id)?.is_some() {
            return Err(ServiceError::Validation(
                "donor record already exists for this principal".into(),
            ));
        }

        let mut donor = DonorRecord::new(ctx.principal_id.clone(), new.blood_type, new.location);
        donor.date_of_birth = new.date_of_birth;
        donor.gender = new.gender;
        donor.weight_kg = new.weight_kg;
        donor.last_donation_date = new.last_donation_date;
        donor.medical_notes = new.medical_notes;

        self.db.insert_donor(&donor)?;
        tracing::debug!(donor = %donor.id, "donor registered");
        Ok(donor)
    }

    /// Apply a whitelisted partial update to an owned donor record.
    /// The verification flag is not part of the whitelist.
    pub fn update(
        &self,
        ctx: &AuthContext,
        donor_id: &str,
        update: DonorUpdate,
    ) -> ServiceResult<DonorRecord> {
        let mut donor = self
            .db
            .get_donor(donor_id)?
            .ok_or_else(|| ServiceError::NotFound("donor".into()))?;
        ctx.require_owner(&donor.principal_id)?;
        if update.is_empty() {
            return Err(ServiceError::Validation("no fields to update".into()));
        }

        if let Some(bt) = update.blood_type {
            donor.blood_type = bt;
        }
        if let Some(address) = update.address {
            donor.location.address = Some(address);
        }
        if let Some(city) = update.city {
            if city.trim().is_empty() {
                return Err(ServiceError::Validation("city cannot be empty".into()));
            }
            donor.location.city = city;
        }
        if let Some(state) = update.state {
            donor.location.state = Some(state);
        }
        if let Some(pincode) = update.pincode {
            donor.location.pincode = Some(pincode);
        }
        if let Some(lat) = update.latitude {
            donor.location.latitude = Some(lat);
        }
        if let Some(lon) = update.longitude {
            donor.location.longitude = Some(lon);
        }
        if let Some(available) = update.is_available {
            donor.is_available = available;
        }
        if let Some(dob) = update.date_of_birth {
            donor.date_of_birth = Some(dob);
        }
        if let Some(gender) = update.gender {
            donor.gender = Some(gender);
        }
        if let Some(weight) = update.weight_kg {
            donor.weight_kg = Some(weight);
        }
        if let Some(date) = update.last_donation_date {
            donor.last_donation_date = Some(date);
        }
        if let Some(notes) = update.medical_notes {
            donor.medical_notes = Some(notes);
        }

        self.db.update_donor(&donor)?;
        self.db
            .get_donor(donor_id)?
            .ok_or_else(|| ServiceError::NotFound("donor".into()))
    }

    /// Log a completed donation against the caller's own donor record.
    pub fn record_donation(&self, ctx: &AuthContext, new: NewDonation) -> ServiceResult<Donation> {
        let donor = self
            .db
            .get_donor_by_principal(&ctx.principal_id)?
            .ok_or_else(|| ServiceError::NotFound("donor record".into()))?;
        if new.units < 1 {
            return Err(ServiceError::Validation("units must be at least 1".into()));
        }
        if let Some(bank_id) = &new.blood_bank_id {
            if self.db.get_blood_bank(bank_id)?.is_none() {
                return Err(ServiceError::NotFound("blood bank".into()));
            }
        }

        let donation = Donation::from_new(donor.id, new);
        self.db.insert_donation(&donation)?;
        tracing::debug!(donation = %donation.id, "donation recorded");
        Ok(donation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BloodType, Location, Profile};

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_profile(&Profile::new("u1".into(), Role::Donor, "Asha".into(), None))
            .unwrap();
        db.insert_profile(&Profile::new("h1".into(), Role::Hospital, "City".into(), None))
            .unwrap();
        db
    }

    fn ctx(db: &Database, principal: &str) -> AuthContext {
        AuthContext::resolve(db, principal).unwrap()
    }

    fn minimal_new(city: &str) -> NewDonorRecord {
        NewDonorRecord {
            blood_type: BloodType::ONeg,
            location: Location::city(city),
            date_of_birth: None,
            gender: None,
            weight_kg: None,
            last_donation_date: None,
            medical_notes: None,
        }
    }

    #[test]
    fn test_register_requires_donor_role() {
        let db = setup_db();
        let registry = DonorRegistry::new(&db);

        let err = registry
            .register(&ctx(&db, "h1"), minimal_new("Metro"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let donor = registry.register(&ctx(&db, "u1"), minimal_new("Metro")).unwrap();
        assert_eq!(donor.blood_type, BloodType::ONeg);
        assert!(!donor.is_verified);
    }

    #[test]
    fn test_register_twice_rejected() {
        let db = setup_db();
        let registry = DonorRegistry::new(&db);

        registry.register(&ctx(&db, "u1"), minimal_new("Metro")).unwrap();
        let err = registry
            .register(&ctx(&db, "u1"), minimal_new("Metro"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_update_by_non_owner_changes_nothing() {
        let db = setup_db();
        db.insert_profile(&Profile::new("u2".into(), Role::Donor, "Ben".into(), None))
            .unwrap();
        let registry = DonorRegistry::new(&db);
        let donor = registry.register(&ctx(&db, "u1"), minimal_new("Metro")).unwrap();

        let err = registry
            .update(
                &ctx(&db, "u2"),
                &donor.id,
                DonorUpdate {
                    city: Some("Harbor".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let unchanged = db.get_donor(&donor.id).unwrap().unwrap();
        assert_eq!(unchanged.location.city, "Metro");
    }

    #[test]
    fn test_update_whitelist() {
        let db = setup_db();
        let registry = DonorRegistry::new(&db);
        let donor = registry.register(&ctx(&db, "u1"), minimal_new("Metro")).unwrap();

        let updated = registry
            .update(
                &ctx(&db, "u1"),
                &donor.id,
                DonorUpdate {
                    is_available: Some(false),
                    weight_kg: Some(64.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.is_available);
        assert_eq!(updated.weight_kg, Some(64.0));
        assert_eq!(updated.location.city, "Metro");
    }

    #[test]
    fn test_update_with_no_fields() {
        let db = setup_db();
        let registry = DonorRegistry::new(&db);
        let donor = registry.register(&ctx(&db, "u1"), minimal_new("Metro")).unwrap();

        let err = registry
            .update(&ctx(&db, "u1"), &donor.id, DonorUpdate::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_record_donation() {
        let db = setup_db();
        let registry = DonorRegistry::new(&db);
        registry.register(&ctx(&db, "u1"), minimal_new("Metro")).unwrap();

        let donation = registry
            .record_donation(
                &ctx(&db, "u1"),
                NewDonation {
                    blood_bank_id: None,
                    blood_type: BloodType::ONeg,
                    units: 1,
                    donation_date: None,
                },
            )
            .unwrap();
        assert_eq!(donation.units, 1);
        assert_eq!(db.count_donations().unwrap(), 1);
    }

    #[test]
    fn test_record_donation_without_donor_record() {
        let db = setup_db();
        let registry = DonorRegistry::new(&db);

        let err = registry
            .record_donation(
                &ctx(&db, "u1"),
                NewDonation {
                    blood_bank_id: None,
                    blood_type: BloodType::ONeg,
                    units: 1,
                    donation_date: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
