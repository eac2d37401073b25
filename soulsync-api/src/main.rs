//! soulsync-api - SoulSync backend service
//!
//! Serves the assessment, profile, journal, coach, tracking, and ritual
//! endpoints over HTTP, backed by a SQLite database in the root folder.

use anyhow::Result;
use soulsync_api::{analysis::LlmClient, build_router, AppState};
use soulsync_common::assessment::{validate_catalog, AssessmentMode};
use soulsync_common::config::{get_setting, resolve_root_folder, resolve_setting};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting SoulSync API (soulsync-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Root folder: CLI arg > env > config file > platform default
    let cli_root = std::env::args().nth(1);
    let root_folder = resolve_root_folder(cli_root.as_deref(), "SOULSYNC_ROOT")?;
    info!("Root folder: {}", root_folder.display());

    let db_path = root_folder.join("soulsync.db");
    let pool = soulsync_common::db::init_database(&db_path).await?;

    let purged = soulsync_common::db::purge_expired_sessions(&pool).await?;
    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    // A catalogue authoring defect must stop startup, not surface later as
    // scoring failures
    for mode in [AssessmentMode::Basic, AssessmentMode::Enhanced] {
        if let Err(e) = validate_catalog(mode) {
            anyhow::bail!("question catalogue for {} mode is invalid: {}", mode, e);
        }
    }
    info!("Question catalogues validated");

    // LLM settings: database > environment > config file for the key
    let api_key = resolve_setting(&pool, "llm_api_key", "SOULSYNC_LLM_API_KEY").await?;
    if api_key.is_none() {
        warn!("No LLM API key configured; journal analysis degrades to neutral, coach chat disabled");
    }

    let model = get_setting(&pool, "llm_model")
        .await?
        .unwrap_or_else(|| "gpt-4o-mini".to_string());
    let timeout_secs = get_setting(&pool, "llm_timeout_secs")
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let max_attempts = get_setting(&pool, "llm_max_attempts")
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    let analyzer = LlmClient::new(api_key, model, timeout_secs, max_attempts)
        .map_err(|e| anyhow::anyhow!("failed to build analysis client: {}", e))?;

    let state = AppState::new(pool.clone(), Arc::new(analyzer));
    let app = build_router(state);

    let port: u16 = get_setting(&pool, "http_port")
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(5730);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("soulsync-api listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
