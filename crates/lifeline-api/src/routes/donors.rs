//! Donor registry and donor search endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use lifeline_core::models::{DonorSummary, DonorUpdate, NewDonation, NewDonorRecord};
use lifeline_core::service::DonorSearchFilter;
use lifeline_core::{BloodType, Donation, DonorRecord};

use crate::error::ApiResult;
use crate::extract::{Json, Principal, Query};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<NewDonorRecord>,
) -> ApiResult<(StatusCode, Json<DonorRecord>)> {
    let donor = state.lifeline.register_donor(&principal, body)?;
    Ok((StatusCode::CREATED, Json(donor)))
}

#[derive(Debug, Deserialize)]
pub struct DonorQuery {
    pub blood_group: Option<BloodType>,
    pub city: Option<String>,
    pub available: Option<bool>,
}

/// Public donor directory. Only verified donors appear.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<DonorQuery>,
) -> ApiResult<Json<Vec<DonorSummary>>> {
    let filter = DonorSearchFilter {
        blood_type: query.blood_group,
        city_substring: query.city,
        available_only: query.available.unwrap_or(false),
    };
    Ok(Json(state.lifeline.search_donors(&filter)?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DonorSummary>> {
    Ok(Json(state.lifeline.get_donor(&id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Path(id): Path<String>,
    Json(body): Json<DonorUpdate>,
) -> ApiResult<Json<DonorRecord>> {
    Ok(Json(state.lifeline.update_donor(&principal, &id, body)?))
}

pub async fn record_donation(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<NewDonation>,
) -> ApiResult<(StatusCode, Json<Donation>)> {
    let donation = state.lifeline.record_donation(&principal, body)?;
    Ok((StatusCode::CREATED, Json(donation)))
}
