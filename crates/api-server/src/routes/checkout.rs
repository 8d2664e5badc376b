//! Checkout redirect

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::Redirect,
    routing::post,
    Json, Router,
};
use candilingo_core::checkout::{CheckoutOptions, CheckoutRedirector, RecordingNavigator};
use candilingo_core::notify::TracingNotifier;

use crate::auth::session_from_headers;
use crate::error::{map_core_error, RouteError};
use crate::state::AppState;

/// Mint a checkout session and answer `303 See Other` pointing at it.
async fn checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(options): Json<CheckoutOptions>,
) -> Result<Redirect, RouteError> {
    let session = session_from_headers(&state, &headers).await?;
    // The browser follows the 303; the navigator only records the target.
    let redirector = CheckoutRedirector::new(
        state.backend().checkout(),
        state.public_origin(),
        Arc::new(RecordingNavigator::new()),
        Arc::new(TracingNotifier),
    )
    .map_err(map_core_error)?;

    let url = redirector
        .redirect_to_checkout(&session, options)
        .await
        .map_err(map_core_error)?;
    Ok(Redirect::to(&url))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(checkout))
}
