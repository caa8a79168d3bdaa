//! Per-operation authorization context.
//!
//! The principal's role is resolved once when an operation starts and the
//! resulting context is passed into the component call, instead of each
//! handler re-querying the profile table inline.

use crate::db::{Database, DbResult};
use crate::models::Role;
use crate::{ServiceError, ServiceResult};

/// An authenticated principal with its resolved role, if any profile exists.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub principal_id: String,
    pub role: Option<Role>,
}

impl AuthContext {
    /// Look up the principal's profile role.
    pub fn resolve(db: &Database, principal_id: &str) -> DbResult<Self> {
        let role = db.get_profile(principal_id)?.map(|p| p.role);
        Ok(Self {
            principal_id: principal_id.to_string(),
            role,
        })
    }

    /// Admin-only gate.
    pub fn require_admin(&self) -> ServiceResult<()> {
        if self.role == Some(Role::Admin) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("admin access required".into()))
        }
    }

    /// Role gate for role-bound record creation.
    pub fn require_role(&self, role: Role) -> ServiceResult<()> {
        if self.role == Some(role) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(format!(
                "{} role required",
                role.as_str()
            )))
        }
    }

    /// Ownership gate: the record's principal must be the caller.
    pub fn require_owner(&self, owner_principal_id: &str) -> ServiceResult<()> {
        if self.principal_id == owner_principal_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("not the owner".into()))
        }
    }
}
