//! Lifeline Core Library
//!
//! Blood donor and blood bank directory with a request-matching board.
//!
//! # Architecture
//!
//! ```text
//! Principal (external identity)
//!       │
//!       ▼
//! Profile Directory ──► role: donor | hospital | admin
//!       │
//!       ├─ donor ────► Donor Registry ────┐
//!       ├─ hospital ─► Inventory Ledger ──┤  is_verified gates
//!       │                                 ├─► Directory Search
//!       └─ admin ────► Verification ──────┘
//!                      Authority
//!
//! Request Board: any profiled principal posts; feed ranked by
//! urgency (critical, urgent, normal), newest first within a rank.
//! ```
//!
//! # Core Principle
//!
//! **Verification gates discovery, not existence.** Unverified donors and
//! banks stay reachable by direct id but never appear in search results.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer
//! - [`models`]: Domain types (Profile, DonorRecord, BloodBank, etc.)
//! - [`auth`]: Per-operation authorization context
//! - [`service`]: Component services (board, ledger, search, reports)

pub mod auth;
pub mod db;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use crate::auth::AuthContext;
pub use crate::db::Database;
pub use crate::models::{
    BloodBank, BloodRequest, BloodType, Donation, DonorRecord, Profile, RequestStatus, Role,
    Urgency,
};
pub use crate::service::{
    AdminReports, DirectorySearch, DonorRegistry, InventoryLedger, ProfileDirectory, RequestBoard,
    VerificationAuthority,
};

use std::sync::Mutex;

use crate::models::{
    BankUpdate, BankWithStock, DonorSummary, DonorUpdate, NewBloodBank, NewBloodRequest,
    NewDonation, NewDonorRecord, ProfileUpdate, RequestDetail, RequestFilter, StockEntry,
};
use crate::service::{
    BankSearchFilter, DonorSearchFilter, EntityType, ProfileView, ReportStats, VerifiedEntity,
};

/// Service-level error, mapped onto the HTTP taxonomy by the API crate.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<db::DbError> for ServiceError {
    fn from(e: db::DbError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Internal(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ServiceError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ServiceError::Internal(format!("Lock poisoned: {}", e))
    }
}

/// Whether the admin bootstrap path is open. Wired from deployment
/// configuration; disabled in normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapMode {
    Enabled,
    Disabled,
}

/// Thread-safe facade over the whole service. One method per operation:
/// each takes the lock, resolves the caller's [`AuthContext`] once, and
/// dispatches into the owning component.
pub struct Lifeline {
    db: Mutex<Database>,
    bootstrap: BootstrapMode,
}

impl Lifeline {
    /// Open or create a database at the given path.
    pub fn open(path: &str, bootstrap: BootstrapMode) -> ServiceResult<Self> {
        let db = Database::open(path)?;
        Ok(Self {
            db: Mutex::new(db),
            bootstrap,
        })
    }

    /// Create an in-memory instance (for testing).
    pub fn open_in_memory(bootstrap: BootstrapMode) -> ServiceResult<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Mutex::new(db),
            bootstrap,
        })
    }

    // =========================================================================
    // Profile Directory
    // =========================================================================

    pub fn create_profile(
        &self,
        principal_id: &str,
        role: Role,
        display_name: &str,
        phone: Option<String>,
    ) -> ServiceResult<Profile> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        ProfileDirectory::new(&db).create(&ctx, role, display_name, phone)
    }

    pub fn view_profile(&self, principal_id: &str) -> ServiceResult<Option<ProfileView>> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        ProfileDirectory::new(&db).view(&ctx)
    }

    pub fn update_profile(
        &self,
        principal_id: &str,
        update: &ProfileUpdate,
    ) -> ServiceResult<Profile> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        ProfileDirectory::new(&db).update(&ctx, update)
    }

    // =========================================================================
    // Donor Registry
    // =========================================================================

    pub fn register_donor(
        &self,
        principal_id: &str,
        new: NewDonorRecord,
    ) -> ServiceResult<DonorRecord> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        DonorRegistry::new(&db).register(&ctx, new)
    }

    pub fn update_donor(
        &self,
        principal_id: &str,
        donor_id: &str,
        update: DonorUpdate,
    ) -> ServiceResult<DonorRecord> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        DonorRegistry::new(&db).update(&ctx, donor_id, update)
    }

    pub fn record_donation(
        &self,
        principal_id: &str,
        new: NewDonation,
    ) -> ServiceResult<Donation> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        DonorRegistry::new(&db).record_donation(&ctx, new)
    }

    // =========================================================================
    // Inventory Ledger
    // =========================================================================

    pub fn register_blood_bank(
        &self,
        principal_id: &str,
        new: NewBloodBank,
    ) -> ServiceResult<BloodBank> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        InventoryLedger::new(&db).register_blood_bank(&ctx, new)
    }

    pub fn update_blood_bank(
        &self,
        principal_id: &str,
        bank_id: &str,
        update: BankUpdate,
    ) -> ServiceResult<BloodBank> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        InventoryLedger::new(&db).update_bank(&ctx, bank_id, update)
    }

    pub fn set_stock(
        &self,
        principal_id: &str,
        blood_type: BloodType,
        units: i64,
    ) -> ServiceResult<StockEntry> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        InventoryLedger::new(&db).set_stock(&ctx, blood_type, units)
    }

    pub fn get_stock(&self, bank_id: &str) -> ServiceResult<Vec<StockEntry>> {
        let db = self.db.lock()?;
        InventoryLedger::new(&db).get_stock(bank_id)
    }

    // =========================================================================
    // Request Board
    // =========================================================================

    pub fn create_request(
        &self,
        principal_id: &str,
        new: NewBloodRequest,
    ) -> ServiceResult<BloodRequest> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        RequestBoard::new(&db).create(&ctx, new)
    }

    pub fn list_requests(&self, filter: &RequestFilter) -> ServiceResult<Vec<BloodRequest>> {
        let db = self.db.lock()?;
        RequestBoard::new(&db).list(filter)
    }

    pub fn get_request(&self, id: &str) -> ServiceResult<RequestDetail> {
        let db = self.db.lock()?;
        RequestBoard::new(&db).get(id)
    }

    pub fn update_request_status(
        &self,
        principal_id: &str,
        id: &str,
        status: RequestStatus,
    ) -> ServiceResult<BloodRequest> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        RequestBoard::new(&db).update_status(&ctx, id, status)
    }

    // =========================================================================
    // Directory Search
    // =========================================================================

    pub fn search_donors(&self, filter: &DonorSearchFilter) -> ServiceResult<Vec<DonorSummary>> {
        let db = self.db.lock()?;
        DirectorySearch::new(&db).search_donors(filter)
    }

    pub fn search_blood_banks(
        &self,
        filter: &BankSearchFilter,
    ) -> ServiceResult<Vec<BankWithStock>> {
        let db = self.db.lock()?;
        DirectorySearch::new(&db).search_blood_banks(filter)
    }

    pub fn get_donor(&self, id: &str) -> ServiceResult<DonorSummary> {
        let db = self.db.lock()?;
        DirectorySearch::new(&db).get_donor(id)
    }

    pub fn get_blood_bank(&self, id: &str) -> ServiceResult<BankWithStock> {
        let db = self.db.lock()?;
        DirectorySearch::new(&db).get_blood_bank(id)
    }

    // =========================================================================
    // Verification Authority
    // =========================================================================

    pub fn set_verified(
        &self,
        principal_id: &str,
        entity_type: EntityType,
        entity_id: &str,
        verified: bool,
    ) -> ServiceResult<VerifiedEntity> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        VerificationAuthority::new(&db).set_verified(&ctx, entity_type, entity_id, verified)
    }

    pub fn promote_to_admin(
        &self,
        principal_id: &str,
        display_name: &str,
        phone: Option<String>,
    ) -> ServiceResult<Profile> {
        let db = self.db.lock()?;
        VerificationAuthority::new(&db).promote_to_admin(
            self.bootstrap,
            principal_id,
            display_name,
            phone,
        )
    }

    // =========================================================================
    // Admin Reports
    // =========================================================================

    pub fn admin_stats(&self, principal_id: &str) -> ServiceResult<ReportStats> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        AdminReports::new(&db).stats(&ctx)
    }

    pub fn list_users(
        &self,
        principal_id: &str,
        role: Option<Role>,
    ) -> ServiceResult<Vec<Profile>> {
        let db = self.db.lock()?;
        let ctx = AuthContext::resolve(&db, principal_id)?;
        AdminReports::new(&db).list_users(&ctx, role)
    }
}
