//! Admin-only platform reports.

use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::db::{Database, TypeCount, UrgencyCount};
use crate::models::{Profile, Role};
use crate::ServiceResult;

/// Upper bound on the admin user listing.
const USER_LIST_LIMIT: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonorStats {
    pub total: i64,
    pub verified: i64,
    pub available: i64,
    pub by_blood_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankStats {
    pub total: i64,
    pub verified: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestStats {
    pub active: i64,
    pub critical: i64,
    pub by_urgency: Vec<UrgencyCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationStats {
    pub total: i64,
    pub this_month: i64,
}

/// The full platform snapshot returned by the admin report endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportStats {
    pub donors: DonorStats,
    pub blood_banks: BankStats,
    pub requests: RequestStats,
    pub donations: DonationStats,
}

pub struct AdminReports<'a> {
    db: &'a Database,
}

impl<'a> AdminReports<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Aggregate counts across the whole platform. Admin only.
    pub fn stats(&self, ctx: &AuthContext) -> ServiceResult<ReportStats> {
        ctx.require_admin()?;
        Ok(ReportStats {
            donors: DonorStats {
                total: self.db.count_donors()?,
                verified: self.db.count_verified_donors()?,
                available: self.db.count_available_donors()?,
                by_blood_type: self.db.donors_by_blood_type()?,
            },
            blood_banks: BankStats {
                total: self.db.count_banks()?,
                verified: self.db.count_verified_banks()?,
            },
            requests: RequestStats {
                active: self.db.count_active_requests()?,
                critical: self.db.count_critical_requests()?,
                by_urgency: self.db.requests_by_urgency()?,
            },
            donations: DonationStats {
                total: self.db.count_donations()?,
                this_month: self.db.count_donations_this_month()?,
            },
        })
    }

    /// Profile listing for the admin console, newest first.
    pub fn list_users(&self, ctx: &AuthContext, role: Option<Role>) -> ServiceResult<Vec<Profile>> {
        ctx.require_admin()?;
        Ok(self.db.list_profiles(role, USER_LIST_LIMIT)?)
    }
}
