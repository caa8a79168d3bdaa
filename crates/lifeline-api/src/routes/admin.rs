//! Admin console endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use lifeline_core::service::{EntityType, ReportStats, VerifiedEntity};
use lifeline_core::{Profile, Role};

use crate::error::ApiResult;
use crate::extract::{Json, Principal, Query};
use crate::AppState;

pub async fn reports(
    State(state): State<AppState>,
    Principal(principal): Principal,
) -> ApiResult<Json<ReportStats>> {
    Ok(Json(state.lifeline.admin_stats(&principal)?))
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_type: Option<Role>,
}

pub async fn users(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<Profile>>> {
    Ok(Json(state.lifeline.list_users(&principal, query.user_type)?))
}

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    pub entity_type: EntityType,
    pub entity_id: String,
    pub is_verified: bool,
}

pub async fn verify(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<VerifyBody>,
) -> ApiResult<Json<VerifiedEntity>> {
    let entity = state.lifeline.set_verified(
        &principal,
        body.entity_type,
        &body.entity_id,
        body.is_verified,
    )?;
    Ok(Json(entity))
}

#[derive(Debug, Deserialize)]
pub struct PromoteBody {
    pub display_name: String,
    pub phone: Option<String>,
}

/// Bootstrap-only path for minting the first admin profile.
pub async fn promote(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<PromoteBody>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let profile = state
        .lifeline
        .promote_to_admin(&principal, &body.display_name, body.phone)?;
    Ok((StatusCode::CREATED, Json(profile)))
}
