//! Emotion tracking persistence

use soulsync_common::db::models::EmotionTracking;
use soulsync_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Record one emotion reading
pub async fn insert_tracking(
    pool: &SqlitePool,
    user_id: &str,
    emotion: &str,
    intensity: i64,
    note: &str,
) -> Result<EmotionTracking> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO emotion_trackings (guid, user_id, emotion, intensity, note)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(user_id)
    .bind(emotion)
    .bind(intensity)
    .bind(note)
    .execute(pool)
    .await?;

    let tracking =
        sqlx::query_as::<_, EmotionTracking>("SELECT * FROM emotion_trackings WHERE guid = ?")
            .bind(&guid)
            .fetch_one(pool)
            .await?;

    Ok(tracking)
}

/// Readings from the last `days` days, newest first
pub async fn list_trackings(
    pool: &SqlitePool,
    user_id: &str,
    days: i64,
) -> Result<Vec<EmotionTracking>> {
    let trackings = sqlx::query_as::<_, EmotionTracking>(
        "SELECT * FROM emotion_trackings
         WHERE user_id = ? AND created_at >= datetime('now', '-' || ? || ' days')
         ORDER BY rowid DESC",
    )
    .bind(user_id)
    .bind(days)
    .fetch_all(pool)
    .await?;

    Ok(trackings)
}
