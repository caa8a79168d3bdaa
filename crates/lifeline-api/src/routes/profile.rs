//! Profile endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use lifeline_core::models::ProfileUpdate;
use lifeline_core::service::ProfileView;
use lifeline_core::{Profile, Role, ServiceError};

use crate::error::ApiResult;
use crate::extract::{Json, Principal};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub role: Role,
    pub display_name: String,
    pub phone: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<CreateProfile>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let profile =
        state
            .lifeline
            .create_profile(&principal, body.role, &body.display_name, body.phone)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn view(
    State(state): State<AppState>,
    Principal(principal): Principal,
) -> ApiResult<Json<ProfileView>> {
    let view = state
        .lifeline
        .view_profile(&principal)?
        .ok_or_else(|| ServiceError::NotFound("profile".into()))?;
    Ok(Json(view))
}

pub async fn update(
    State(state): State<AppState>,
    Principal(principal): Principal,
    Json(body): Json<ProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    let profile = state.lifeline.update_profile(&principal, &body)?;
    Ok(Json(profile))
}
