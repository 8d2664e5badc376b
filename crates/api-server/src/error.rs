//! Mapping of domain errors onto HTTP responses

use axum::{http::StatusCode, Json};
use candilingo_core::error::GENERIC_FAILURE_MESSAGE;
use candilingo_core::Error;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

pub fn route_error(status: StatusCode, error: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub fn unauthorized(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::UNAUTHORIZED, error)
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Precondition(_) => StatusCode::UNAUTHORIZED,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Conflict(_) => StatusCode::CONFLICT,
        Error::Provider(_) | Error::Serialization(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn map_core_error(err: Error) -> RouteError {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("backend failure: {}", err);
    }
    route_error(status, err.user_message(GENERIC_FAILURE_MESSAGE))
}
