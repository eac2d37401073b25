//! Ritual endpoints
//!
//! Recommendations follow the user's weakest chakras. A user without a
//! stored profile is treated as all-neutral, which yields a deterministic
//! default set rather than an error.

use crate::api::auth::AuthedUser;
use crate::db::{profiles, rituals as db_rituals};
use crate::error::{ApiError, ApiResult};
use crate::rituals::{find_ritual, recommendations, Ritual, RITUALS};
use crate::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use soulsync_common::config::get_setting;
use soulsync_common::db::models::RitualCompletion;
use soulsync_common::ChakraProfile;

/// GET /api/rituals
pub async fn list_rituals() -> Json<&'static [Ritual]> {
    Json(RITUALS)
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub rituals: Vec<&'static Ritual>,
}

/// GET /api/rituals/recommendations
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> ApiResult<Json<RecommendationsResponse>> {
    let profile = profiles::get_profile(&state.db, &user.user_id)
        .await?
        .map(|row| row.profile())
        .unwrap_or_else(ChakraProfile::neutral);

    let chakra_count = get_setting(&state.db, "recommendation_chakra_count")
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(3usize)
        .clamp(1, 7);

    Ok(Json(RecommendationsResponse {
        rituals: recommendations(&profile, chakra_count),
    }))
}

/// GET /api/rituals/completions
pub async fn list_completions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> ApiResult<Json<Vec<RitualCompletion>>> {
    let completions = db_rituals::list_completions(&state.db, &user.user_id).await?;
    Ok(Json(completions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub ritual_id: String,
}

/// POST /api/rituals/completions
pub async fn record_completion(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(request): Json<CompletionRequest>,
) -> ApiResult<(StatusCode, Json<RitualCompletion>)> {
    let ritual = find_ritual(&request.ritual_id)
        .ok_or_else(|| ApiError::NotFound(format!("ritual {}", request.ritual_id)))?;

    let completion = db_rituals::insert_completion(&state.db, &user.user_id, ritual.id).await?;
    Ok((StatusCode::CREATED, Json(completion)))
}
