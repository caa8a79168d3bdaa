//! Blood bank registration and the per-bank stock ledger.

use crate::auth::AuthContext;
use crate::db::Database;
use crate::models::{BankUpdate, BloodBank, BloodType, NewBloodBank, Role, StockEntry};
use crate::{ServiceError, ServiceResult};

pub struct InventoryLedger<'a> {
    db: &'a Database,
}

impl<'a> InventoryLedger<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register the caller's blood bank. Atomically seeds one zero-unit
    /// stock row per canonical blood type.
    pub fn register_blood_bank(
        &self,
        ctx: &AuthContext,
        new: NewBloodBank,
    ) -> ServiceResult<BloodBank> {
        ctx.require_role(Role::Hospital)?;
        if new.name.trim().is_empty() {
            return Err(ServiceError::Validation("name is required".into()));
        }
        if new.location.address.as_deref().unwrap_or("").trim().is_empty() {
            return Err(ServiceError::Validation("address is required".into()));
        }
        if new.location.city.trim().is_empty() {
            return Err(ServiceError::Validation("city is required".into()));
        }
        if self
            .db
            .get_blood_bank_by_principal(&ctx.principal_id)?
            .is_some()
        {
            return Err(ServiceError::Validation(
                "blood bank already exists for this principal".into(),
            ));
        }

        let mut bank = BloodBank::new(ctx.principal_id.clone(), new.name, new.location);
        bank.registration_number = new.registration_number;
        bank.phone = new.phone;
        bank.email = new.email;
        bank.operating_hours = new.operating_hours;

        self.db.insert_blood_bank_with_stock(&bank)?;
        tracing::debug!(bank = %bank.id, "blood bank registered");
        Ok(bank)
    }

    /// Apply a whitelisted partial update to an owned bank.
    /// The verification flag is not part of the whitelist.
    pub fn update_bank(
        &self,
        ctx: &AuthContext,
        bank_id: &str,
        update: BankUpdate,
    ) -> ServiceResult<BloodBank> {
        let mut bank = self
            .db
            .get_blood_bank(bank_id)?
            .ok_or_else(|| ServiceError::NotFound("blood bank".into()))?;
        ctx.require_owner(&bank.principal_id)?;
        if update.is_empty() {
            return Err(ServiceError::Validation("no fields to update".into()));
        }

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("name cannot be empty".into()));
            }
            bank.name = name;
        }
        if let Some(reg) = update.registration_number {
            bank.registration_number = Some(reg);
        }
        if let Some(address) = update.address {
            bank.location.address = Some(address);
        }
        if let Some(city) = update.city {
            if city.trim().is_empty() {
                return Err(ServiceError::Validation("city cannot be empty".into()));
            }
            bank.location.city = city;
        }
        if let Some(state) = update.state {
            bank.location.state = Some(state);
        }
        if let Some(pincode) = update.pincode {
            bank.location.pincode = Some(pincode);
        }
        if let Some(lat) = update.latitude {
            bank.location.latitude = Some(lat);
        }
        if let Some(lon) = update.longitude {
            bank.location.longitude = Some(lon);
        }
        if let Some(phone) = update.phone {
            bank.phone = Some(phone);
        }
        if let Some(email) = update.email {
            bank.email = Some(email);
        }
        if let Some(hours) = update.operating_hours {
            bank.operating_hours = Some(hours);
        }

        self.db.update_blood_bank(&bank)?;
        self.db
            .get_blood_bank(bank_id)?
            .ok_or_else(|| ServiceError::NotFound("blood bank".into()))
    }

    /// Overwrite one stock row of the caller's own bank. Last write wins.
    pub fn set_stock(
        &self,
        ctx: &AuthContext,
        blood_type: BloodType,
        units: i64,
    ) -> ServiceResult<StockEntry> {
        let bank = self
            .db
            .get_blood_bank_by_principal(&ctx.principal_id)?
            .ok_or_else(|| {
                ServiceError::Forbidden("no blood bank registered for this principal".into())
            })?;
        if units < 0 {
            return Err(ServiceError::Validation(
                "units_available cannot be negative".into(),
            ));
        }

        self.db
            .set_stock_units(&bank.id, blood_type, units)?
            .ok_or_else(|| ServiceError::NotFound("stock row".into()))
    }

    /// Full stock table for a bank, in canonical blood-type order.
    pub fn get_stock(&self, bank_id: &str) -> ServiceResult<Vec<StockEntry>> {
        if self.db.get_blood_bank(bank_id)?.is_none() {
            return Err(ServiceError::NotFound("blood bank".into()));
        }
        Ok(self.db.get_stock_entries(bank_id)?)
    }
}
