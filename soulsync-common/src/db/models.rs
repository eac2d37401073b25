//! Database models

use crate::assessment::AssessmentMode;
use crate::chakra::ChakraProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub guid: String,
    pub display_name: String,
    pub created_at: String,
}

/// One row of chakra_profiles, flattened for sqlx
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChakraProfileRow {
    pub user_id: String,
    pub root: f64,
    pub sacral: f64,
    pub solar_plexus: f64,
    pub heart: f64,
    pub throat: f64,
    pub third_eye: f64,
    pub crown: f64,
    pub mode: String,
    pub completed_at: String,
}

impl ChakraProfileRow {
    pub fn profile(&self) -> ChakraProfile {
        ChakraProfile {
            root: self.root,
            sacral: self.sacral,
            solar_plexus: self.solar_plexus,
            heart: self.heart,
            throat: self.throat,
            third_eye: self.third_eye,
            crown: self.crown,
        }
    }

    pub fn mode(&self) -> Option<AssessmentMode> {
        AssessmentMode::from_str(&self.mode)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JournalEntry {
    pub guid: String,
    pub user_id: String,
    pub content: String,
    pub sentiment_score: f64,
    /// JSON array of emotion names
    pub emotion_tags: String,
    /// JSON array of chakra keys
    pub chakra_tags: String,
    pub summary: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmotionTracking {
    pub guid: String,
    pub user_id: String,
    pub emotion: String,
    pub intensity: i64,
    pub note: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CoachMessage {
    pub guid: String,
    pub user_id: String,
    pub persona: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RitualCompletion {
    pub guid: String,
    pub user_id: String,
    pub ritual_id: String,
    pub completed_at: String,
}
