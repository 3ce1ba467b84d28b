use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// The verified identity acting on a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

fn bearer_token(parts: &axum::http::request::Parts) -> Option<&str> {
    let auth = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;
    let token = auth.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthenticated)?;
        let user_id = state.tokens.verify(token).ok_or(ApiError::Unauthenticated)?;

        // a valid token for a deleted account must not pass
        let user = state
            .users
            .find_by_id(user_id)
            .await
            .map_err(ApiError::store("Error verifying credentials"))?;
        if user.is_none() {
            tracing::debug!(%user_id, "token refers to a missing user");
            return Err(ApiError::Unauthenticated);
        }

        Ok(AuthUser { id: user_id })
    }
}
