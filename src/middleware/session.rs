use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{api::AppState, error::AppError, models::Session};

/// HTTP header carrying the session token returned by login/register
pub const SESSION_HEADER: &str = "x-session-token";

fn session_token(parts: &Parts) -> Option<Uuid> {
    parts
        .headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
}

/// The session of a logged-in user; rejects the request otherwise
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))?;

        state
            .sessions
            .get(&token)
            .await
            .map(CurrentSession)
            .ok_or_else(|| AppError::Unauthorized("Session expired, please log in again".to_string()))
    }
}

/// The session if the request carries a valid one
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = match session_token(parts) {
            Some(token) => state.sessions.get(&token).await,
            None => None,
        };
        Ok(OptionalSession(session))
    }
}
