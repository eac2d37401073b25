//! Journal endpoints
//!
//! Entries are analyzed on creation; if the analysis backend is down the
//! entry is still stored with a neutral result. Stored tags are JSON text
//! in SQLite and are expanded back into arrays on the way out.

use crate::api::auth::AuthedUser;
use crate::db::journal;
use crate::error::{ApiError, ApiResult};
use crate::prompts;
use crate::AppState;
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use soulsync_common::config::get_setting;
use soulsync_common::db::models::JournalEntry;
use tracing::info;

const MAX_CONTENT_LEN: usize = 20_000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub guid: String,
    pub content: String,
    pub sentiment_score: f64,
    pub emotion_tags: Vec<String>,
    pub chakra_tags: Vec<String>,
    pub summary: String,
    pub created_at: String,
}

impl From<JournalEntry> for EntryResponse {
    fn from(entry: JournalEntry) -> Self {
        Self {
            guid: entry.guid,
            content: entry.content,
            sentiment_score: entry.sentiment_score,
            emotion_tags: serde_json::from_str(&entry.emotion_tags).unwrap_or_default(),
            chakra_tags: serde_json::from_str(&entry.chakra_tags).unwrap_or_default(),
            summary: entry.summary,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<i64>,
}

/// GET /api/journal
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<EntryResponse>>> {
    let default_limit = get_setting(&state.db, "journal_default_limit")
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(50);
    let limit = query.limit.unwrap_or(default_limit).clamp(1, 500);

    let entries = journal::list_entries(&state.db, &user.user_id, limit).await?;
    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub content: String,
}

/// POST /api/journal
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(request): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<EntryResponse>)> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest("journal content is empty".to_string()));
    }
    if content.len() > MAX_CONTENT_LEN {
        return Err(ApiError::BadRequest(format!(
            "journal content exceeds {} bytes",
            MAX_CONTENT_LEN
        )));
    }

    let analysis = state.analyzer.analyze(content).await;
    let entry = journal::insert_entry(&state.db, &user.user_id, content, &analysis).await?;

    info!(
        user_id = %user.user_id,
        guid = %entry.guid,
        sentiment = analysis.sentiment_score,
        "Journal entry created"
    );

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: &'static str,
}

/// GET /api/journal/prompt
pub async fn get_prompt() -> Json<PromptResponse> {
    Json(PromptResponse {
        prompt: prompts::random_prompt(),
    })
}

/// GET /api/journal/:guid
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(guid): Path<String>,
) -> ApiResult<Json<EntryResponse>> {
    let entry = journal::get_entry(&state.db, &user.user_id, &guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("journal entry {}", guid)))?;

    Ok(Json(entry.into()))
}

/// DELETE /api/journal/:guid
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(guid): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = journal::delete_entry(&state.db, &user.user_id, &guid).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("journal entry {}", guid)));
    }

    Ok(StatusCode::NO_CONTENT)
}
