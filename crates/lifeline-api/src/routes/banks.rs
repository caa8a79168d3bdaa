//! Blood bank and stock ledger endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use lifeline_core::models::{BankUpdate, BankWithStock, NewBloodBank, StockEntry};
use lifeline_core::service::BankSearchFilter;
use lifeline_core::{BloodBank, BloodType};

use crate::error::ApiResult;
use crate::extract::{Json, Principal, Query};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<NewBloodBank>,
) -> ApiResult<(StatusCode, Json<BloodBank>)> {
    let bank = state.lifeline.register_blood_bank(&principal, body)?;
    Ok((StatusCode::CREATED, Json(bank)))
}

#[derive(Debug, Deserialize)]
pub struct BankQuery {
    pub city: Option<String>,
    pub blood_group: Option<BloodType>,
}

/// Public bank directory. Only verified banks appear; each result carries
/// its full stock table.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<BankQuery>,
) -> ApiResult<Json<Vec<BankWithStock>>> {
    let filter = BankSearchFilter {
        city_substring: query.city,
        with_stock_of: query.blood_group,
    };
    Ok(Json(state.lifeline.search_blood_banks(&filter)?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BankWithStock>> {
    Ok(Json(state.lifeline.get_blood_bank(&id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Path(id): Path<String>,
    Json(body): Json<BankUpdate>,
) -> ApiResult<Json<BloodBank>> {
    Ok(Json(state.lifeline.update_blood_bank(&principal, &id, body)?))
}

#[derive(Debug, Deserialize)]
pub struct SetStock {
    pub blood_group: BloodType,
    pub units_available: i64,
}

/// Absolute stock overwrite for the caller's own bank.
pub async fn set_stock(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<SetStock>,
) -> ApiResult<Json<StockEntry>> {
    let entry = state
        .lifeline
        .set_stock(&principal, body.blood_group, body.units_available)?;
    Ok(Json(entry))
}
