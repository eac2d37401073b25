//! Assessment endpoints
//!
//! GET /api/assessment/questions?mode=basic|enhanced returns the ordered
//! steps of the selected catalogue. POST /api/assessment/submit scores a
//! complete answer set and stores the resulting profile.

use crate::api::auth::AuthedUser;
use crate::db::profiles;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use soulsync_common::assessment::{score, steps_for, AnswerSet, AssessmentMode, AssessmentStep};
use soulsync_common::ChakraProfile;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub mode: AssessmentMode,
    pub steps: &'static [AssessmentStep],
}

/// GET /api/assessment/questions
pub async fn get_questions(
    Query(query): Query<QuestionsQuery>,
) -> ApiResult<Json<QuestionsResponse>> {
    let mode = parse_mode(query.mode.as_deref())?;

    Ok(Json(QuestionsResponse {
        mode,
        steps: steps_for(mode),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub mode: String,
    pub answers: AnswerSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub mode: AssessmentMode,
    pub profile: ChakraProfile,
}

/// POST /api/assessment/submit
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    let mode = parse_mode(Some(&request.mode))?;

    let profile = score(mode, &request.answers)?;
    profiles::upsert_profile(&state.db, &user.user_id, &profile, mode).await?;

    info!(
        user_id = %user.user_id,
        mode = %mode,
        answers = request.answers.len(),
        "Assessment scored and profile stored"
    );

    Ok(Json(SubmitResponse { mode, profile }))
}

fn parse_mode(mode: Option<&str>) -> Result<AssessmentMode, ApiError> {
    match mode {
        None => Ok(AssessmentMode::Basic),
        Some(s) => AssessmentMode::from_str(s)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown assessment mode: {}", s))),
    }
}
