//! Emotion tracking endpoints

use crate::api::auth::AuthedUser;
use crate::db::tracking;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use soulsync_common::config::get_setting;
use soulsync_common::db::models::EmotionTracking;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    days: Option<i64>,
}

/// GET /api/tracking
pub async fn list_trackings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<EmotionTracking>>> {
    let default_days = get_setting(&state.db, "tracking_default_days")
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let days = query.days.unwrap_or(default_days).clamp(1, 365);

    let trackings = tracking::list_trackings(&state.db, &user.user_id, days).await?;
    Ok(Json(trackings))
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub emotion: String,
    pub intensity: i64,
    #[serde(default)]
    pub note: String,
}

/// POST /api/tracking
pub async fn create_tracking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(request): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<EmotionTracking>)> {
    let emotion = request.emotion.trim().to_lowercase();
    if emotion.is_empty() {
        return Err(ApiError::BadRequest("emotion is empty".to_string()));
    }
    if !(1..=10).contains(&request.intensity) {
        return Err(ApiError::BadRequest(format!(
            "intensity {} outside range 1-10",
            request.intensity
        )));
    }

    let tracking = tracking::insert_tracking(
        &state.db,
        &user.user_id,
        &emotion,
        request.intensity,
        request.note.trim(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(tracking)))
}
