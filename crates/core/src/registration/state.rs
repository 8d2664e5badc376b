//! Registration wizard state machine
//!
//! Pure transitions only; the flow in `flow.rs` performs the sign-up call and
//! feeds its result back in as an event.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::{ProfileData, SignUpRequest};
use crate::validation::{normalize_email, require_non_empty};
use crate::{Error, Result};

/// Step 1 payload.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct BasicInfo {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl BasicInfo {
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    fn validated(self) -> Result<Self> {
        if self.password.is_empty() {
            return Err(Error::InvalidInput("Password cannot be empty".to_string()));
        }
        Ok(Self {
            email: normalize_email(&self.email)?,
            name: require_non_empty(&self.name, "Name")?,
            password: self.password,
        })
    }
}

impl fmt::Debug for BasicInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicInfo")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Step 2 payload; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    BasicInfo,
    AdditionalInfo,
    Submitting,
    Complete,
    EmailConfirmationRequired,
    Failed,
}

impl RegistrationStep {
    /// Outcome of a sign-up attempt.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Complete | Self::EmailConfirmationRequired | Self::Failed
        )
    }
}

#[derive(Debug, Clone)]
pub enum RegistrationEvent {
    SubmitBasicInfo(BasicInfo),
    BackToBasicInfo,
    SubmitAdditionalInfo(AdditionalInfo),
    /// The provider accepted the sign-up. `session_active` is false when it
    /// holds the session back until the email address is confirmed.
    SignUpSucceeded { session_active: bool },
    SignUpFailed(String),
    /// The failure was reported to the user; go back to step 2.
    FailureReported,
}

impl RegistrationEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::SubmitBasicInfo(_) => "submit basic info",
            Self::BackToBasicInfo => "go back to basic info",
            Self::SubmitAdditionalInfo(_) => "submit additional info",
            Self::SignUpSucceeded { .. } => "complete sign-up",
            Self::SignUpFailed(_) => "fail sign-up",
            Self::FailureReported => "acknowledge failure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegistrationState {
    step: RegistrationStep,
    basic_info: Option<BasicInfo>,
    additional_info: Option<AdditionalInfo>,
    error: Option<String>,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationState {
    pub fn new() -> Self {
        Self {
            step: RegistrationStep::BasicInfo,
            basic_info: None,
            additional_info: None,
            error: None,
        }
    }

    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    pub fn basic_info(&self) -> Option<&BasicInfo> {
        self.basic_info.as_ref()
    }

    pub fn additional_info(&self) -> Option<&AdditionalInfo> {
        self.additional_info.as_ref()
    }

    /// Message of the last failed sign-up, kept until the next submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transition(self, event: RegistrationEvent) -> Result<Self> {
        use RegistrationEvent as Event;
        use RegistrationStep as Step;

        match (self.step, event) {
            (Step::BasicInfo, Event::SubmitBasicInfo(info)) => Ok(Self {
                step: Step::AdditionalInfo,
                basic_info: Some(info.validated()?),
                ..self
            }),
            (Step::BasicInfo | Step::AdditionalInfo, Event::BackToBasicInfo) => Ok(Self {
                step: Step::BasicInfo,
                ..self
            }),
            (Step::AdditionalInfo, Event::SubmitAdditionalInfo(info)) => Ok(Self {
                step: Step::Submitting,
                additional_info: Some(info),
                error: None,
                ..self
            }),
            (Step::Submitting, Event::SignUpSucceeded { session_active }) => Ok(Self {
                step: if session_active {
                    Step::Complete
                } else {
                    Step::EmailConfirmationRequired
                },
                // Credentials are only needed until the provider accepts them.
                basic_info: None,
                ..self
            }),
            (Step::Submitting, Event::SignUpFailed(message)) => Ok(Self {
                step: Step::Failed,
                error: Some(message),
                ..self
            }),
            (Step::Failed, Event::FailureReported) => Ok(Self {
                step: Step::AdditionalInfo,
                ..self
            }),
            (step, event) => Err(Error::InvalidInput(format!(
                "Cannot {} while registration is at {:?}",
                event.name(),
                step
            ))),
        }
    }

    /// The sign-up payload assembled from both steps.
    pub fn sign_up_request(&self) -> Result<SignUpRequest> {
        let basic = self
            .basic_info
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("Basic info has not been submitted".to_string()))?;
        let additional = self.additional_info.clone().unwrap_or_default();

        Ok(SignUpRequest {
            email: basic.email.clone(),
            password: basic.password.clone(),
            profile: ProfileData {
                name: basic.name.clone(),
                company_name: clean(&additional.company_name),
                job_title: clean(&additional.job_title),
                phone: clean(&additional.phone),
            },
        })
    }
}
