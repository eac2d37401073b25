//! Journal entry persistence

use crate::analysis::AnalysisResult;
use soulsync_common::db::models::JournalEntry;
use soulsync_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert a new entry with its analysis attached, returning the stored row
pub async fn insert_entry(
    pool: &SqlitePool,
    user_id: &str,
    content: &str,
    analysis: &AnalysisResult,
) -> Result<JournalEntry> {
    let guid = Uuid::new_v4().to_string();
    let emotion_tags = serde_json::to_string(&analysis.emotion_tags)
        .unwrap_or_else(|_| "[]".to_string());
    let chakra_tags = serde_json::to_string(&analysis.chakra_tags)
        .unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        r#"
        INSERT INTO journal_entries
            (guid, user_id, content, sentiment_score, emotion_tags, chakra_tags, summary)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(user_id)
    .bind(content)
    .bind(analysis.sentiment_score)
    .bind(&emotion_tags)
    .bind(&chakra_tags)
    .bind(&analysis.summary)
    .execute(pool)
    .await?;

    let entry = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE guid = ?",
    )
    .bind(&guid)
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

/// Most recent entries for a user, newest first
pub async fn list_entries(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<JournalEntry>> {
    // rowid tiebreak: created_at alone cannot order entries written within
    // the same second
    let entries = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE user_id = ?
         ORDER BY rowid DESC LIMIT ?",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// One entry, scoped to its owner
pub async fn get_entry(
    pool: &SqlitePool,
    user_id: &str,
    guid: &str,
) -> Result<Option<JournalEntry>> {
    let entry = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE guid = ? AND user_id = ?",
    )
    .bind(guid)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Delete an entry, scoped to its owner. Returns false when nothing matched.
pub async fn delete_entry(pool: &SqlitePool, user_id: &str, guid: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE guid = ? AND user_id = ?")
        .bind(guid)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
