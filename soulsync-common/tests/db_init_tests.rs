//! Unit tests for database initialization
//!
//! Covers automatic creation on first run, idempotent re-open, schema
//! constraints, and default setting seeding.

use soulsync_common::db::init::{init_database, ANONYMOUS_USER_ID};
use soulsync_common::db::sessions::{create_session, delete_session, purge_expired_sessions};
use tempfile::tempdir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("soulsync.db");

    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("soulsync.db");

    let pool1 = init_database(&db_path).await;
    assert!(pool1.is_ok());
    drop(pool1);

    // Second open must succeed and leave the schema intact
    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("deeper").join("soulsync.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Expected parent directories to be created");
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("soulsync.db")).await.unwrap();

    for key in [
        "session_timeout_seconds",
        "http_port",
        "llm_model",
        "llm_timeout_secs",
        "llm_max_attempts",
        "journal_default_limit",
        "tracking_default_days",
        "recommendation_chakra_count",
    ] {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(&pool)
                .await
                .unwrap();
        assert!(value.is_some(), "setting '{}' was not seeded", key);
    }
}

#[tokio::test]
async fn test_existing_setting_not_overwritten() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("soulsync.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("UPDATE settings SET value = '9999' WHERE key = 'http_port'")
        .execute(&pool)
        .await
        .unwrap();
    drop(pool);

    let pool = init_database(&db_path).await.unwrap();
    let value: String = sqlx::query_scalar("SELECT value FROM settings WHERE key = 'http_port'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(value, "9999", "re-init must not clobber operator overrides");
}

#[tokio::test]
async fn test_anonymous_user_seeded() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("soulsync.db")).await.unwrap();

    let name: String = sqlx::query_scalar("SELECT display_name FROM users WHERE guid = ?")
        .bind(ANONYMOUS_USER_ID)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Anonymous");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("soulsync.db")).await.unwrap();

    let token = create_session(&pool, ANONYMOUS_USER_ID, 3600).await.unwrap();

    let live: Option<String> = sqlx::query_scalar(
        "SELECT user_id FROM sessions WHERE token = ? AND expires_at > datetime('now')",
    )
    .bind(&token)
    .fetch_optional(&pool)
    .await
    .unwrap();
    assert_eq!(live.as_deref(), Some(ANONYMOUS_USER_ID));

    delete_session(&pool, &token).await.unwrap();
    let gone: Option<String> = sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = ?")
        .bind(&token)
        .fetch_optional(&pool)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_purge_removes_only_expired_sessions() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("soulsync.db")).await.unwrap();

    let live = create_session(&pool, ANONYMOUS_USER_ID, 3600).await.unwrap();
    sqlx::query(
        "INSERT INTO sessions (token, user_id, expires_at)
         VALUES ('stale', ?, datetime('now', '-1 day'))",
    )
    .bind(ANONYMOUS_USER_ID)
    .execute(&pool)
    .await
    .unwrap();

    let purged = purge_expired_sessions(&pool).await.unwrap();
    assert_eq!(purged, 1);

    let remaining: Option<String> =
        sqlx::query_scalar("SELECT token FROM sessions WHERE token = ?")
            .bind(&live)
            .fetch_optional(&pool)
            .await
            .unwrap();
    assert!(remaining.is_some());
}

#[tokio::test]
async fn test_profile_range_check_enforced() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("soulsync.db")).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO chakra_profiles
         (user_id, root, sacral, solar_plexus, heart, throat, third_eye, crown, mode)
         VALUES (?, 11.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 'basic')",
    )
    .bind(ANONYMOUS_USER_ID)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "intensity above 10.0 must be rejected by the schema");
}

#[tokio::test]
async fn test_tracking_intensity_check_enforced() {
    let dir = tempdir().unwrap();
    let pool = init_database(&dir.path().join("soulsync.db")).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO emotion_trackings (guid, user_id, emotion, intensity)
         VALUES ('t-1', ?, 'joy', 0)",
    )
    .bind(ANONYMOUS_USER_ID)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "intensity below 1 must be rejected by the schema");
}
