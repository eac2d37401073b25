//! Coach conversation persistence

use soulsync_common::db::models::CoachMessage;
use soulsync_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Append one message to a persona conversation
pub async fn insert_message(
    pool: &SqlitePool,
    user_id: &str,
    persona: &str,
    role: &str,
    content: &str,
) -> Result<CoachMessage> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO coach_messages (guid, user_id, persona, role, content)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(user_id)
    .bind(persona)
    .bind(role)
    .bind(content)
    .execute(pool)
    .await?;

    let message =
        sqlx::query_as::<_, CoachMessage>("SELECT * FROM coach_messages WHERE guid = ?")
            .bind(&guid)
            .fetch_one(pool)
            .await?;

    Ok(message)
}

/// Full conversation with one persona, oldest first
pub async fn get_history(
    pool: &SqlitePool,
    user_id: &str,
    persona: &str,
    limit: i64,
) -> Result<Vec<CoachMessage>> {
    // fetch the newest `limit` rows, then restore chronological order.
    // created_at has one-second granularity, so rowid (insertion order)
    // is the tiebreak; a random guid would shuffle same-second turns.
    let mut messages = sqlx::query_as::<_, CoachMessage>(
        "SELECT * FROM coach_messages WHERE user_id = ? AND persona = ?
         ORDER BY rowid DESC LIMIT ?",
    )
    .bind(user_id)
    .bind(persona)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    messages.reverse();
    Ok(messages)
}
