//! Explicit session context
//!
//! Every flow that needs the current user receives a [`SessionContext`]
//! from its caller. The context is filled on sign-up/sign-in and cleared on
//! sign-out; there is no process-wide "current user".

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::model::Session;
use super::provider::SessionProvider;
use crate::error::GENERIC_FAILURE_MESSAGE;
use crate::notify::{Notification, Notifier};
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    session: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// An empty (signed-out) context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
        }
    }

    pub async fn establish(&self, session: Session) {
        info!(user_id = %session.user.id, "session established");
        *self.session.write().await = Some(session);
    }

    /// Clear the session, returning what was there.
    pub async fn invalidate(&self) -> Option<Session> {
        let previous = self.session.write().await.take();
        if let Some(session) = &previous {
            info!(user_id = %session.user.id, "session invalidated");
        }
        previous
    }

    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// The current session, or a precondition error naming `action`.
    pub async fn require(&self, action: &str) -> Result<Session> {
        self.current()
            .await
            .ok_or_else(|| Error::not_logged_in(action))
    }

    pub async fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.clone())
    }
}

/// Sign in and fill `ctx` with the new session.
pub async fn sign_in<P>(
    ctx: &SessionContext,
    provider: &P,
    email: &str,
    password: &str,
) -> Result<Session>
where
    P: SessionProvider + ?Sized,
{
    let session = provider.sign_in(email.trim(), password).await?;
    ctx.establish(session.clone()).await;
    Ok(session)
}

/// Sign out of the provider and clear `ctx`.
///
/// The context is cleared even when the provider call fails; the provider
/// error is still notified and returned to the caller.
pub async fn sign_out<P>(ctx: &SessionContext, provider: &P, notifier: &dyn Notifier) -> Result<()>
where
    P: SessionProvider + ?Sized,
{
    let Some(session) = ctx.invalidate().await else {
        return Ok(());
    };

    if let Err(err) = provider.sign_out(&session).await {
        warn!(user_id = %session.user.id, "provider sign-out failed: {}", err);
        notifier.notify(Notification::error(
            "Sign out failed",
            err.user_message(GENERIC_FAILURE_MESSAGE),
        ));
        return Err(err);
    }
    Ok(())
}
