//! Request board endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use lifeline_core::models::{NewBloodRequest, RequestDetail, RequestFilter};
use lifeline_core::{BloodRequest, BloodType, RequestStatus};

use crate::error::ApiResult;
use crate::extract::{Json, Principal, Query};
use crate::AppState;

pub async fn create(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<NewBloodRequest>,
) -> ApiResult<(StatusCode, Json<BloodRequest>)> {
    let request = state.lifeline.create_request(&principal, body)?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[derive(Debug, Deserialize)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub blood_group: Option<BloodType>,
    pub city: Option<String>,
}

/// The board feed: urgency rank first, newest first within a rank.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<RequestQuery>,
) -> ApiResult<Json<Vec<BloodRequest>>> {
    let filter = RequestFilter {
        status: query.status,
        blood_type: query.blood_group,
        city_substring: query.city,
    };
    Ok(Json(state.lifeline.list_requests(&filter)?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RequestDetail>> {
    Ok(Json(state.lifeline.get_request(&id)?))
}

#[derive(Debug, Deserialize)]
pub struct SetStatus {
    pub status: RequestStatus,
}

pub async fn update_status(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Path(id): Path<String>,
    Json(body): Json<SetStatus>,
) -> ApiResult<Json<BloodRequest>> {
    let request = state
        .lifeline
        .update_request_status(&principal, &id, body.status)?;
    Ok(Json(request))
}
