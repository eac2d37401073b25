//! Coach endpoints
//!
//! A coach reply comes from the analysis backend with the persona's system
//! prompt and recent conversation history. Unlike journal analysis there is
//! no fallback: an invented reply would be worse than a visible failure, so
//! backend errors surface as 502.

use crate::analysis::{ChatRole, ChatTurn};
use crate::api::auth::AuthedUser;
use crate::db::coach;
use crate::error::{ApiError, ApiResult};
use crate::personas::{find_persona, Persona, PERSONAS};
use crate::AppState;
use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use soulsync_common::db::models::CoachMessage;
use tracing::{info, warn};

/// History window sent to the model, in messages
const HISTORY_WINDOW: i64 = 20;

const MAX_MESSAGE_LEN: usize = 4_000;

/// GET /api/coach/personas
pub async fn list_personas() -> Json<&'static [Persona]> {
    Json(PERSONAS)
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: CoachMessage,
}

/// POST /api/coach/:persona/message
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(persona_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let persona = find_persona(&persona_id)
        .ok_or_else(|| ApiError::NotFound(format!("persona {}", persona_id)))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message is empty".to_string()));
    }
    if message.len() > MAX_MESSAGE_LEN {
        return Err(ApiError::BadRequest(format!(
            "message exceeds {} bytes",
            MAX_MESSAGE_LEN
        )));
    }

    let history = coach::get_history(&state.db, &user.user_id, persona.id, HISTORY_WINDOW).await?;
    let turns: Vec<ChatTurn> = history
        .iter()
        .filter_map(|m| {
            ChatRole::from_str(&m.role).map(|role| ChatTurn {
                role,
                content: m.content.clone(),
            })
        })
        .collect();

    let reply_text = state
        .analyzer
        .chat(persona.system_prompt, &turns, message)
        .await
        .map_err(|e| {
            warn!(persona = persona.id, "Coach backend failed: {}", e);
            ApiError::Upstream(e.to_string())
        })?;

    // Persist the user turn only once a reply exists, so a failed backend
    // call leaves the conversation unchanged and retryable
    coach::insert_message(&state.db, &user.user_id, persona.id, "user", message).await?;
    let reply =
        coach::insert_message(&state.db, &user.user_id, persona.id, "coach", &reply_text).await?;

    info!(user_id = %user.user_id, persona = persona.id, "Coach reply generated");

    Ok(Json(MessageResponse { reply }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<i64>,
}

/// GET /api/coach/:persona/history
pub async fn get_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(persona_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<CoachMessage>>> {
    let persona = find_persona(&persona_id)
        .ok_or_else(|| ApiError::NotFound(format!("persona {}", persona_id)))?;

    let limit = query.limit.unwrap_or(200).clamp(1, 500);
    let history = coach::get_history(&state.db, &user.user_id, persona.id, limit).await?;
    Ok(Json(history))
}
