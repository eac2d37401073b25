//! OpenAI-compatible chat-completions client
//!
//! Rate limited to 1 request/second and retried up to `max_attempts` times
//! with exponential backoff before giving up.

use super::{AnalysisError, AnalysisResult, ChatRole, ChatTurn, TextAnalysis};
use serde_json::{json, Value};
use soulsync_common::ChakraKey;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const RATE_LIMIT_MS: u64 = 1000; // 1 request per second

const ANALYSIS_SYSTEM_PROMPT: &str = "You analyze personal journal entries. \
Respond with strict JSON only, no prose, matching: \
{\"sentimentScore\": <number 1-10>, \"emotionTags\": [<lowercase emotion words>], \
\"chakraTags\": [<any of: root, sacral, solarPlexus, heart, throat, thirdEye, crown>], \
\"summary\": <one sentence>}";

/// Rate limiter enforcing a minimum interval between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// LLM-backed text analysis
pub struct LlmClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_attempts: u32,
}

impl LlmClient {
    /// Create a client. `api_key = None` produces a degraded client whose
    /// `analyze` always falls back and whose `chat` always errors.
    pub fn new(
        api_key: Option<String>,
        model: String,
        timeout_secs: u64,
        max_attempts: u32,
    ) -> Result<Self, AnalysisError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MS)),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Override the API base URL (for self-hosted compatible backends)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// One chat-completions round trip, retried with exponential backoff.
    async fn complete(&self, messages: Vec<Value>) -> Result<String, AnalysisError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AnalysisError::NotConfigured)?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": messages,
        });

        let mut attempt = 0u32;
        let mut last_error = AnalysisError::Network("no attempts made".to_string());

        while attempt < self.max_attempts {
            attempt += 1;
            self.rate_limiter.wait().await;

            let result = self
                .http_client
                .post(&url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let value: Value = response
                            .json()
                            .await
                            .map_err(|e| AnalysisError::Parse(e.to_string()))?;
                        return extract_content(&value);
                    }

                    let text = response.text().await.unwrap_or_default();
                    // 4xx other than 429 will not improve on retry
                    if status.is_client_error() && status.as_u16() != 429 {
                        return Err(AnalysisError::Api(status.as_u16(), text));
                    }
                    last_error = AnalysisError::Api(status.as_u16(), text);
                }
                Err(e) => {
                    last_error = AnalysisError::Network(e.to_string());
                }
            }

            if attempt < self.max_attempts {
                let backoff_ms = 100u64 * 2u64.pow(attempt);
                debug!(attempt, backoff_ms, "LLM request failed, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error)
    }
}

/// Pull the assistant message text out of a chat-completions response
fn extract_content(value: &Value) -> Result<String, AnalysisError> {
    value
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| AnalysisError::Parse("missing choices[0].message.content".to_string()))
}

/// Parse the model's analysis JSON leniently.
///
/// Unknown emotion tags pass through (lowercased); chakra tags must parse as
/// known keys or they are dropped; the sentiment score is clamped to [1, 10].
/// Returns None only when the text is not JSON at all or carries no usable
/// fields, in which case the caller falls back to neutral.
fn parse_analysis(content: &str) -> Option<AnalysisResult> {
    // Models sometimes wrap the JSON in a markdown fence despite instructions
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let value: Value = serde_json::from_str(trimmed).ok()?;
    let obj = value.as_object()?;

    let sentiment_score = obj
        .get("sentimentScore")
        .or_else(|| obj.get("sentiment_score"))
        .and_then(|v| v.as_f64())?
        .clamp(1.0, 10.0);

    let emotion_tags: Vec<String> = obj
        .get("emotionTags")
        .or_else(|| obj.get("emotion_tags"))
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_lowercase())
                .collect()
        })
        .unwrap_or_default();

    let chakra_tags: Vec<String> = obj
        .get("chakraTags")
        .or_else(|| obj.get("chakra_tags"))
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .filter_map(ChakraKey::from_str)
                .map(|k| k.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();

    let summary = obj
        .get("summary")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Some(AnalysisResult {
        sentiment_score,
        emotion_tags,
        chakra_tags,
        summary,
    })
}

#[async_trait::async_trait]
impl TextAnalysis for LlmClient {
    async fn analyze(&self, text: &str) -> AnalysisResult {
        let messages = vec![
            json!({"role": "system", "content": ANALYSIS_SYSTEM_PROMPT}),
            json!({"role": "user", "content": text}),
        ];

        match self.complete(messages).await {
            Ok(content) => parse_analysis(&content).unwrap_or_else(|| {
                warn!("Analysis response was not parseable, using neutral fallback");
                AnalysisResult::fallback()
            }),
            Err(e) => {
                warn!("Analysis backend unavailable ({}), using neutral fallback", e);
                AnalysisResult::fallback()
            }
        }
    }

    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        user_message: &str,
    ) -> Result<String, AnalysisError> {
        let mut messages = vec![json!({"role": "system", "content": system_prompt})];
        for turn in history {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Coach => "assistant",
            };
            messages.push(json!({"role": role, "content": turn.content}));
        }
        messages.push(json!({"role": "user", "content": user_message}));

        self.complete(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let value = json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        });
        assert_eq!(extract_content(&value).unwrap(), "hello");

        let empty = json!({"choices": []});
        assert!(extract_content(&empty).is_err());
    }

    #[test]
    fn test_parse_analysis_strict_json() {
        let result = parse_analysis(
            r#"{"sentimentScore": 7.5, "emotionTags": ["Calm", "hopeful"],
                "chakraTags": ["heart", "thirdEye"], "summary": "A hopeful day."}"#,
        )
        .unwrap();
        assert_eq!(result.sentiment_score, 7.5);
        assert_eq!(result.emotion_tags, vec!["calm", "hopeful"]);
        assert_eq!(result.chakra_tags, vec!["heart", "thirdEye"]);
        assert_eq!(result.summary, "A hopeful day.");
    }

    #[test]
    fn test_parse_analysis_strips_markdown_fence() {
        let result = parse_analysis(
            "```json\n{\"sentimentScore\": 3.0, \"emotionTags\": [], \"chakraTags\": [], \"summary\": \"\"}\n```",
        )
        .unwrap();
        assert_eq!(result.sentiment_score, 3.0);
    }

    #[test]
    fn test_parse_analysis_clamps_and_filters() {
        let result = parse_analysis(
            r#"{"sentimentScore": 42, "emotionTags": ["joy"], "chakraTags": ["heart", "spleen"]}"#,
        )
        .unwrap();
        assert_eq!(result.sentiment_score, 10.0);
        // unknown chakra keys are dropped, not preserved
        assert_eq!(result.chakra_tags, vec!["heart"]);
    }

    #[test]
    fn test_parse_analysis_rejects_non_json() {
        assert!(parse_analysis("I feel this entry is positive overall.").is_none());
        assert!(parse_analysis("{}").is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_client_falls_back() {
        let client = LlmClient::new(None, "gpt-4o-mini".to_string(), 5, 3).unwrap();
        let result = client.analyze("a fine day").await;
        assert_eq!(result, AnalysisResult::fallback());

        let err = client.chat("prompt", &[], "hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::NotConfigured));
    }
}
