//! Session provider backed by the auth service (`/auth/v1`)

use async_trait::async_trait;
use candilingo_core::session::{
    ProfileData, Session, SessionProvider, SignUpOutcome, SignUpRequest, UserIdentity,
};
use candilingo_core::Result;
use chrono::{Duration, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::http::BackendHttp;

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    /// Stored by the auth service as user metadata
    data: &'a ProfileData,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl From<AuthUser> for UserIdentity {
    fn from(user: AuthUser) -> Self {
        let display_name = user
            .user_metadata
            .get("name")
            .and_then(|v| v.as_str())
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds until the access token expires
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let mut session = Session::new(self.access_token, self.user.into());
        if let Some(token) = self.refresh_token {
            session = session.with_refresh_token(token);
        }
        // Out-of-range lifetimes leave the expiry unset.
        let expires_at = self
            .expires_in
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        if let Some(expires_at) = expires_at {
            session = session.with_expires_at(expires_at);
        }
        session
    }
}

/// Sign-up answers with a full token response when no confirmation is needed
/// and with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

pub struct AuthClient {
    http: BackendHttp,
}

impl AuthClient {
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SessionProvider for AuthClient {
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome> {
        let body = SignUpBody {
            email: &request.email,
            password: &request.password,
            data: &request.profile,
        };
        let response: SignUpResponse = self
            .http
            .send_json(
                self.http.request(Method::POST, "/auth/v1/signup", None).json(&body),
                "sign up",
            )
            .await?;

        let outcome = match response {
            SignUpResponse::Session(tokens) => {
                let session = tokens.into_session();
                SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpResponse::User(user) => SignUpOutcome {
                user: user.into(),
                session: None,
            },
        };
        info!(
            user_id = %outcome.user.id,
            session_active = outcome.session.is_some(),
            "user signed up"
        );
        Ok(outcome)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let request = self
            .http
            .request(Method::POST, "/auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });
        let tokens: TokenResponse = self.http.send_json(request, "sign in").await?;
        Ok(tokens.into_session())
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, "/auth/v1/logout", Some(&session.access_token));
        self.http.send_empty(request, "sign out").await
    }

    async fn get_user(&self, access_token: &str) -> Result<UserIdentity> {
        let request = self
            .http
            .request(Method::GET, "/auth/v1/user", Some(access_token));
        let user: AuthUser = self.http.send_json(request, "fetch user").await?;
        Ok(user.into())
    }
}
