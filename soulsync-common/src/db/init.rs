//! Database initialization
//!
//! Creates the SQLite database on first run, applies the schema idempotently,
//! and seeds default settings. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Anonymous user every request falls back to when no session is presented
pub const ANONYMOUS_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_tables(&pool).await?;
    init_default_settings(&pool).await?;

    Ok(pool)
}

/// Apply the full schema (idempotent, safe to call multiple times).
///
/// Split out from `init_database` so tests can run against an in-memory
/// database without touching the filesystem.
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_sessions_table(pool).await?;
    create_settings_table(pool).await?;
    create_chakra_profiles_table(pool).await?;
    create_journal_entries_table(pool).await?;
    create_emotion_trackings_table(pool).await?;
    create_coach_messages_table(pool).await?;
    create_ritual_completions_table(pool).await?;
    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            display_name TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create Anonymous user if it doesn't exist
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (guid, display_name)
        VALUES (?, 'Anonymous')
        "#,
    )
    .bind(ANONYMOUS_USER_ID)
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            expires_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_chakra_profiles_table(pool: &SqlitePool) -> Result<()> {
    // One row per user, replaced wholesale on re-assessment
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chakra_profiles (
            user_id TEXT PRIMARY KEY REFERENCES users(guid) ON DELETE CASCADE,
            root REAL NOT NULL CHECK (root BETWEEN 1.0 AND 10.0),
            sacral REAL NOT NULL CHECK (sacral BETWEEN 1.0 AND 10.0),
            solar_plexus REAL NOT NULL CHECK (solar_plexus BETWEEN 1.0 AND 10.0),
            heart REAL NOT NULL CHECK (heart BETWEEN 1.0 AND 10.0),
            throat REAL NOT NULL CHECK (throat BETWEEN 1.0 AND 10.0),
            third_eye REAL NOT NULL CHECK (third_eye BETWEEN 1.0 AND 10.0),
            crown REAL NOT NULL CHECK (crown BETWEEN 1.0 AND 10.0),
            mode TEXT NOT NULL CHECK (mode IN ('basic', 'enhanced')),
            completed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_journal_entries_table(pool: &SqlitePool) -> Result<()> {
    // emotion_tags and chakra_tags hold JSON arrays of strings
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            content TEXT NOT NULL,
            sentiment_score REAL NOT NULL DEFAULT 5.0,
            emotion_tags TEXT NOT NULL DEFAULT '[]',
            chakra_tags TEXT NOT NULL DEFAULT '[]',
            summary TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_journal_entries_user
         ON journal_entries(user_id, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_emotion_trackings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS emotion_trackings (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            emotion TEXT NOT NULL,
            intensity INTEGER NOT NULL CHECK (intensity BETWEEN 1 AND 10),
            note TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_emotion_trackings_user
         ON emotion_trackings(user_id, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_coach_messages_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS coach_messages (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            persona TEXT NOT NULL,
            role TEXT NOT NULL CHECK (role IN ('user', 'coach')),
            content TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_coach_messages_user
         ON coach_messages(user_id, persona, created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_ritual_completions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ritual_completions (
            guid TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            ritual_id TEXT NOT NULL,
            completed_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // Session management
    ensure_setting(pool, "session_timeout_seconds", "31536000").await?; // 1 year

    // HTTP server
    ensure_setting(pool, "http_port", "5730").await?;

    // LLM analysis
    ensure_setting(pool, "llm_model", "gpt-4o-mini").await?;
    ensure_setting(pool, "llm_timeout_secs", "30").await?;
    ensure_setting(pool, "llm_max_attempts", "3").await?;

    // Feature defaults
    ensure_setting(pool, "journal_default_limit", "50").await?;
    ensure_setting(pool, "tracking_default_days", "30").await?;
    ensure_setting(pool, "recommendation_chakra_count", "3").await?;

    info!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value.
///
/// If the setting doesn't exist, it will be created with the default.
/// If the setting exists but has a NULL value, it will be reset to the default.
async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // INSERT OR IGNORE handles concurrent initialization races
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;
        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;
    }

    Ok(())
}
