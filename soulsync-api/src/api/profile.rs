//! Profile endpoint

use crate::api::auth::AuthedUser;
use crate::db::profiles;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Serialize;
use soulsync_common::ChakraProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: ChakraProfile,
    pub mode: String,
    pub completed_at: String,
}

/// GET /api/profile
///
/// 404 until the user has completed an assessment.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> ApiResult<Json<ProfileResponse>> {
    let row = profiles::get_profile(&state.db, &user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("no assessment completed yet".to_string()))?;

    Ok(Json(ProfileResponse {
        profile: row.profile(),
        mode: row.mode.clone(),
        completed_at: row.completed_at,
    }))
}
