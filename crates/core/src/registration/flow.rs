//! Registration orchestrator
//!
//! Drives [`RegistrationState`] through the two wizard steps, calls the
//! session provider once per submission and reports exactly one outcome.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::state::{AdditionalInfo, BasicInfo, RegistrationEvent, RegistrationState, RegistrationStep};
use crate::busy::BusyFlag;
use crate::dashboard::DashboardShell;
use crate::navigation::{route_for, Route};
use crate::notify::{Notification, Notifier};
use crate::organization::{OrganizationDirectory, OrganizationStore};
use crate::session::{SessionContext, SessionProvider, UserIdentity};
use crate::Result;

pub const EMAIL_CONFIRMATION_MESSAGE: &str =
    "Please check your email to confirm your account before signing in.";
const SIGN_UP_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// Signed up and signed in; `next` is the bootstrap prompt when the user
    /// has no organization yet.
    Complete { user: UserIdentity, next: Route },
    /// The provider wants the email address confirmed first.
    EmailConfirmationRequired { email: String, message: String },
    /// Sign-up was rejected; the wizard is back on step 2.
    Failed { message: String },
}

pub struct RegistrationFlow<P: ?Sized, S: ?Sized> {
    provider: Arc<P>,
    organizations: OrganizationDirectory<S>,
    session: SessionContext,
    notifier: Arc<dyn Notifier>,
    shell: DashboardShell,
    state: RegistrationState,
    loading: BusyFlag,
}

impl<P, S> RegistrationFlow<P, S>
where
    P: SessionProvider + ?Sized,
    S: OrganizationStore + ?Sized,
{
    pub fn new(
        provider: Arc<P>,
        organizations: OrganizationDirectory<S>,
        session: SessionContext,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            organizations,
            session,
            notifier,
            shell: DashboardShell::default(),
            state: RegistrationState::new(),
            loading: BusyFlag::new(),
        }
    }

    pub fn with_shell(mut self, shell: DashboardShell) -> Self {
        self.shell = shell;
        self
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    pub fn step(&self) -> RegistrationStep {
        self.state.step()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    fn apply(&mut self, event: RegistrationEvent) -> Result<()> {
        self.state = self.state.clone().transition(event)?;
        Ok(())
    }

    /// Step 1 → step 2. Local validation only.
    pub fn submit_basic_info(&mut self, info: BasicInfo) -> Result<()> {
        self.apply(RegistrationEvent::SubmitBasicInfo(info))
    }

    /// Step 2 → step 1, keeping everything entered so far.
    pub fn back_to_basic_info(&mut self) -> Result<()> {
        self.apply(RegistrationEvent::BackToBasicInfo)
    }

    /// Submit step 2 and sign up with both payloads.
    ///
    /// Returns `Err` only when the wizard is not on step 2; provider failures
    /// come back as [`RegistrationOutcome::Failed`].
    pub async fn submit_additional_info(&mut self, info: AdditionalInfo) -> Result<RegistrationOutcome> {
        let _loading = self.loading.acquire("Registration")?;
        self.apply(RegistrationEvent::SubmitAdditionalInfo(info))?;
        let request = self.state.sign_up_request()?;
        let email = request.email.clone();

        match self.provider.sign_up(request).await {
            Ok(outcome) => {
                let session_active = outcome.session.is_some();
                self.apply(RegistrationEvent::SignUpSucceeded { session_active })?;

                match outcome.session {
                    Some(session) => {
                        self.session.establish(session.clone()).await;
                        let organization = match self.organizations.for_owner(outcome.user.id).await {
                            Ok(organization) => organization,
                            Err(err) => {
                                warn!(
                                    user_id = %outcome.user.id,
                                    "organization lookup after sign-up failed: {}", err
                                );
                                None
                            }
                        };
                        let next = route_for(Some(&session), organization.as_ref(), &self.shell);
                        info!(user_id = %outcome.user.id, next = %next.path(), "registration complete");
                        self.notifier.notify(Notification::success(
                            "Account created",
                            "Your account has been created.",
                        ));
                        Ok(RegistrationOutcome::Complete {
                            user: outcome.user,
                            next,
                        })
                    }
                    None => {
                        info!(user_id = %outcome.user.id, "registration awaiting email confirmation");
                        self.notifier.notify(Notification::info(
                            "Confirm your email",
                            EMAIL_CONFIRMATION_MESSAGE,
                        ));
                        Ok(RegistrationOutcome::EmailConfirmationRequired {
                            email,
                            message: EMAIL_CONFIRMATION_MESSAGE.to_string(),
                        })
                    }
                }
            }
            Err(err) => {
                error!("sign-up failed: {}", err);
                let message = err.user_message(SIGN_UP_FALLBACK_MESSAGE);
                self.apply(RegistrationEvent::SignUpFailed(message.clone()))?;
                self.notifier
                    .notify(Notification::error("Registration failed", message.clone()));
                self.apply(RegistrationEvent::FailureReported)?;
                Ok(RegistrationOutcome::Failed { message })
            }
        }
    }
}
