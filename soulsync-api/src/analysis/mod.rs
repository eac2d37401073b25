//! Text analysis backend
//!
//! `TextAnalysis` is the seam between the feature handlers and the LLM:
//! production wires in `LlmClient`, tests substitute a stub. Journal analysis
//! degrades to a neutral fallback when the backend is unavailable; coach chat
//! surfaces the failure instead, since an invented coach reply is worse than
//! an error.

pub mod client;

pub use client::LlmClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis backend errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis backend not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Structured result of analyzing one piece of journal text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall sentiment, 1.0 (very negative) to 10.0 (very positive)
    pub sentiment_score: f64,
    /// Detected emotion names, lowercase
    pub emotion_tags: Vec<String>,
    /// Chakra keys the text relates to (canonical camelCase strings)
    pub chakra_tags: Vec<String>,
    /// One-sentence summary of the entry
    pub summary: String,
}

impl AnalysisResult {
    /// Neutral result used when the backend is unavailable or returns
    /// something unparseable. The entry is still stored.
    pub fn fallback() -> Self {
        Self {
            sentiment_score: 5.0,
            emotion_tags: vec!["neutral".to_string()],
            chakra_tags: Vec::new(),
            summary: String::new(),
        }
    }
}

/// Speaker of one prior conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Coach,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Coach => "coach",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ChatRole::User),
            "coach" => Some(ChatRole::Coach),
            _ => None,
        }
    }
}

/// One prior turn of a coach conversation
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Pluggable analysis backend
#[async_trait::async_trait]
pub trait TextAnalysis {
    /// Analyze journal text. Infallible by contract: implementations return
    /// `AnalysisResult::fallback()` on any backend failure.
    async fn analyze(&self, text: &str) -> AnalysisResult;

    /// Generate a coach reply given the persona's system prompt and the
    /// conversation so far.
    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_message: &str,
    ) -> Result<String, AnalysisError>;
}
