//! Session token management
//!
//! Sessions are opaque random tokens with an expiry, presented back by
//! clients in the `soulsync_session` cookie. Validation happens in the API
//! layer's middleware; this module owns creation and cleanup.

use crate::Result;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create a session for a user, returning the new token
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    timeout_seconds: i64,
) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    let expires_at = (Utc::now() + Duration::seconds(timeout_seconds))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(&expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Delete a session (logout)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove expired sessions, returning how many were purged
pub async fn purge_expired_sessions(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= datetime('now')")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
