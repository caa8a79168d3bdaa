//! The urgency-ranked request board.

use crate::auth::AuthContext;
use crate::db::Database;
use crate::models::{
    BloodRequest, NewBloodRequest, RequestDetail, RequestFilter, RequestStatus,
};
use crate::{ServiceError, ServiceResult};

/// Upper bound on any board feed.
const BOARD_LIMIT: usize = 100;

pub struct RequestBoard<'a> {
    db: &'a Database,
}

impl<'a> RequestBoard<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Post a new request. Any authenticated principal may post, with or
    /// without a profile on file.
    pub fn create(&self, ctx: &AuthContext, new: NewBloodRequest) -> ServiceResult<BloodRequest> {
        if new.patient_name.trim().is_empty() {
            return Err(ServiceError::Validation("patient_name is required".into()));
        }
        if new.contact_phone.trim().is_empty() {
            return Err(ServiceError::Validation("contact_phone is required".into()));
        }
        if new.location.city.trim().is_empty() {
            return Err(ServiceError::Validation("city is required".into()));
        }
        if new.units_needed < 1 {
            return Err(ServiceError::Validation(
                "units_needed must be at least 1".into(),
            ));
        }

        let request = BloodRequest::from_new(ctx.principal_id.clone(), new);
        self.db.insert_request(&request)?;
        tracing::debug!(request = %request.id, urgency = %request.urgency.as_str(), "request posted");
        Ok(request)
    }

    /// The board feed: urgency rank first, newest first within a rank,
    /// capped at 100 rows. Status defaults to active.
    pub fn list(&self, filter: &RequestFilter) -> ServiceResult<Vec<BloodRequest>> {
        let status = filter.status.unwrap_or(RequestStatus::Active);
        Ok(self.db.list_requests(
            status,
            filter.blood_type,
            filter.city_substring.as_deref(),
            BOARD_LIMIT,
        )?)
    }

    /// One request joined with the requester's contact details.
    pub fn get(&self, id: &str) -> ServiceResult<RequestDetail> {
        self.db
            .get_request_detail(id)?
            .ok_or_else(|| ServiceError::NotFound("request".into()))
    }

    /// Settle or cancel an owned request. Only active requests can move,
    /// and only to a terminal status.
    pub fn update_status(
        &self,
        ctx: &AuthContext,
        id: &str,
        status: RequestStatus,
    ) -> ServiceResult<BloodRequest> {
        let request = self
            .db
            .get_request(id)?
            .ok_or_else(|| ServiceError::NotFound("request".into()))?;
        ctx.require_owner(&request.requester_principal_id)?;

        if request.status.is_terminal() {
            return Err(ServiceError::Validation(format!(
                "request is already {}",
                request.status.as_str()
            )));
        }
        if !status.is_terminal() {
            return Err(ServiceError::Validation(
                "status can only move to fulfilled or cancelled".into(),
            ));
        }

        self.db.set_request_status(id, status)?;
        self.db
            .get_request(id)?
            .ok_or_else(|| ServiceError::NotFound("request".into()))
    }
}
