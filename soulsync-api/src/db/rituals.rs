//! Ritual completion persistence

use soulsync_common::db::models::RitualCompletion;
use soulsync_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Record that a ritual was completed
pub async fn insert_completion(
    pool: &SqlitePool,
    user_id: &str,
    ritual_id: &str,
) -> Result<RitualCompletion> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO ritual_completions (guid, user_id, ritual_id) VALUES (?, ?, ?)",
    )
    .bind(&guid)
    .bind(user_id)
    .bind(ritual_id)
    .execute(pool)
    .await?;

    let completion = sqlx::query_as::<_, RitualCompletion>(
        "SELECT * FROM ritual_completions WHERE guid = ?",
    )
    .bind(&guid)
    .fetch_one(pool)
    .await?;

    Ok(completion)
}

/// Completion history for a user, newest first
pub async fn list_completions(pool: &SqlitePool, user_id: &str) -> Result<Vec<RitualCompletion>> {
    let completions = sqlx::query_as::<_, RitualCompletion>(
        "SELECT * FROM ritual_completions WHERE user_id = ?
         ORDER BY rowid DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(completions)
}
