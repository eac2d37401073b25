//! Chakra profile persistence
//!
//! One row per user, replaced wholesale on re-assessment.

use soulsync_common::assessment::AssessmentMode;
use soulsync_common::db::models::ChakraProfileRow;
use soulsync_common::{ChakraProfile, Result};
use sqlx::SqlitePool;

/// Store (or replace) a user's profile
pub async fn upsert_profile(
    pool: &SqlitePool,
    user_id: &str,
    profile: &ChakraProfile,
    mode: AssessmentMode,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO chakra_profiles
            (user_id, root, sacral, solar_plexus, heart, throat, third_eye, crown,
             mode, completed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(user_id)
    .bind(profile.root)
    .bind(profile.sacral)
    .bind(profile.solar_plexus)
    .bind(profile.heart)
    .bind(profile.throat)
    .bind(profile.third_eye)
    .bind(profile.crown)
    .bind(mode.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch a user's stored profile, if any
pub async fn get_profile(pool: &SqlitePool, user_id: &str) -> Result<Option<ChakraProfileRow>> {
    let row = sqlx::query_as::<_, ChakraProfileRow>(
        "SELECT * FROM chakra_profiles WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
