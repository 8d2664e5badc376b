//! Bearer-token sessions for the JSON API

use axum::http::{header::AUTHORIZATION, HeaderMap};
use candilingo_core::session::{Session, SessionContext};
use tracing::warn;

use crate::error::{unauthorized, RouteError};
use crate::state::AppState;

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the caller's session from the `Authorization` header.
///
/// A missing header is rejected before the backend is contacted.
pub async fn session_from_headers(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<SessionContext, RouteError> {
    let token = bearer_token(headers).ok_or_else(|| unauthorized("Missing bearer token"))?;
    let user = state
        .backend()
        .sessions()
        .get_user(token)
        .await
        .map_err(|err| {
            warn!("bearer token rejected: {}", err);
            unauthorized("Invalid or expired session")
        })?;
    Ok(SessionContext::with_session(Session::new(token, user)))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer token-a@b.com"));
        assert_eq!(bearer_token(&headers), Some("token-a@b.com"));
    }
}
