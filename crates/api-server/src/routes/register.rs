//! Two-step registration over JSON

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use candilingo_core::error::GENERIC_FAILURE_MESSAGE;
use candilingo_core::navigation::Route;
use candilingo_core::notify::{Notification, RecordingNotifier};
use candilingo_core::organization::OrganizationDirectory;
use candilingo_core::registration::{AdditionalInfo, BasicInfo, RegistrationFlow, RegistrationOutcome};
use candilingo_core::session::SessionContext;
use candilingo_core::Error;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::status_for;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    basic_info: BasicInfo,
    #[serde(default)]
    additional_info: AdditionalInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum RegisterState {
    Complete,
    EmailConfirmationRequired,
    Failed,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    state: RegisterState,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    notifications: Vec<Notification>,
}

impl RegisterResponse {
    fn new(state: RegisterState, notifications: Vec<Notification>) -> Self {
        Self {
            state,
            user_id: None,
            next: None,
            access_token: None,
            message: None,
            error: None,
            notifications,
        }
    }

    fn failed(error: String, notifications: Vec<Notification>) -> Self {
        Self {
            error: Some(error),
            ..Self::new(RegisterState::Failed, notifications)
        }
    }
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<RegisterResponse>) {
    let backend = state.backend();
    let session = SessionContext::new();
    let notifier = RecordingNotifier::new();
    let mut flow = RegistrationFlow::new(
        backend.sessions(),
        OrganizationDirectory::new(backend.organizations(session.clone())),
        session.clone(),
        Arc::new(notifier.clone()),
    )
    .with_shell(state.shell().clone());

    if let Err(err) = flow.submit_basic_info(req.basic_info) {
        return rejected(err, &notifier);
    }
    let outcome = match flow.submit_additional_info(req.additional_info).await {
        Ok(outcome) => outcome,
        Err(err) => return rejected(err, &notifier),
    };

    match outcome {
        RegistrationOutcome::Complete { user, next } => {
            let response = RegisterResponse {
                user_id: Some(user.id),
                next: Some(next),
                access_token: session.access_token().await,
                ..RegisterResponse::new(RegisterState::Complete, notifier.notifications())
            };
            (StatusCode::CREATED, Json(response))
        }
        RegistrationOutcome::EmailConfirmationRequired { message, .. } => {
            let response = RegisterResponse {
                message: Some(message),
                ..RegisterResponse::new(
                    RegisterState::EmailConfirmationRequired,
                    notifier.notifications(),
                )
            };
            (StatusCode::ACCEPTED, Json(response))
        }
        RegistrationOutcome::Failed { message } => (
            StatusCode::BAD_GATEWAY,
            Json(RegisterResponse::failed(message, notifier.notifications())),
        ),
    }
}

/// The wizard refused the request before reaching the provider.
fn rejected(err: Error, notifier: &RecordingNotifier) -> (StatusCode, Json<RegisterResponse>) {
    warn!("registration rejected: {}", err);
    (
        status_for(&err),
        Json(RegisterResponse::failed(
            err.user_message(GENERIC_FAILURE_MESSAGE),
            notifier.notifications(),
        )),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/register", post(register))
}
