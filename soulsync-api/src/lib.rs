//! soulsync-api library - SoulSync backend service
//!
//! HTTP API over the assessment engine plus the journaling, emotion
//! tracking, coaching, and ritual features. All feature endpoints sit behind
//! cookie-session authentication; only the health endpoint is public.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

pub mod analysis;
pub mod api;
pub mod db;
pub mod error;
pub mod personas;
pub mod prompts;
pub mod rituals;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Text analysis backend (LLM-backed in production, stubbed in tests)
    pub analyzer: Arc<dyn analysis::TextAnalysis + Send + Sync>,
}

impl AppState {
    pub fn new(db: SqlitePool, analyzer: Arc<dyn analysis::TextAnalysis + Send + Sync>) -> Self {
        Self { db, analyzer }
    }
}

/// Build application router
///
/// Protected routes require a valid `soulsync_session` cookie; the health
/// endpoint does not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    let protected = Router::new()
        .route("/api/assessment/questions", get(api::assessment::get_questions))
        .route("/api/assessment/submit", post(api::assessment::submit_assessment))
        .route("/api/profile", get(api::profile::get_profile))
        .route("/api/journal", get(api::journal::list_entries).post(api::journal::create_entry))
        .route("/api/journal/prompt", get(api::journal::get_prompt))
        .route(
            "/api/journal/:guid",
            get(api::journal::get_entry).delete(api::journal::delete_entry),
        )
        .route("/api/coach/personas", get(api::coach::list_personas))
        .route("/api/coach/:persona/message", post(api::coach::send_message))
        .route("/api/coach/:persona/history", get(api::coach::get_history))
        .route("/api/tracking", get(api::tracking::list_trackings).post(api::tracking::create_tracking))
        .route("/api/rituals", get(api::rituals::list_rituals))
        .route("/api/rituals/recommendations", get(api::rituals::get_recommendations))
        .route(
            "/api/rituals/completions",
            get(api::rituals::list_completions).post(api::rituals::record_completion),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_session,
        ));

    let public = Router::new().route("/health", get(api::health::health_check));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
