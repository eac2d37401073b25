//! Cookie-session authentication middleware
//!
//! Every `/api` route requires a `soulsync_session` cookie holding a token
//! with an unexpired row in the sessions table. Handlers read the resolved
//! user from the `AuthedUser` request extension.

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};

pub const SESSION_COOKIE: &str = "soulsync_session";

/// Authenticated user resolved by the session middleware
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: String,
}

/// Extract the session cookie value from a Cookie header
fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}

/// Reject requests without a valid, unexpired session
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_token)
        .ok_or_else(|| ApiError::Unauthorized("missing session cookie".to_string()))?;

    let user_id: Option<String> = sqlx::query_scalar(
        "SELECT user_id FROM sessions WHERE token = ? AND expires_at > datetime('now')",
    )
    .bind(token)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let user_id =
        user_id.ok_or_else(|| ApiError::Unauthorized("invalid or expired session".to_string()))?;

    request.extensions_mut().insert(AuthedUser { user_id });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_parsing() {
        assert_eq!(session_token("soulsync_session=abc123"), Some("abc123"));
        assert_eq!(
            session_token("theme=dark; soulsync_session=tok; lang=en"),
            Some("tok")
        );
        assert_eq!(session_token("other=x"), None);
        assert_eq!(session_token("soulsync_session="), None);
        assert_eq!(session_token(""), None);
    }
}
