//! Session provider trait
//!
//! Interface of the managed authentication service.

use async_trait::async_trait;

use super::model::{Session, SignUpOutcome, SignUpRequest, UserIdentity};
use crate::Result;

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome>;

    /// Exchange email and password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Revoke the session on the provider side.
    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Resolve the user behind an access token.
    async fn get_user(&self, access_token: &str) -> Result<UserIdentity>;
}
