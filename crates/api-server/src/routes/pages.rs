//! Client-side page routes served by the shell

use axum::{
    extract::Query,
    http::{header, HeaderMap, HeaderName, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use candilingo_core::navigation::{
    resolve_legacy_path, PaymentCanceledPage, CUSTOMER_PORTAL_PATH, LEGACY_PORTAL_PATH,
    PAYMENT_CANCELED_PATH,
};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct PaymentCanceledQuery {
    session_id: Option<String>,
}

/// Permanent redirect for retired paths.
async fn legacy_redirect(uri: Uri) -> Response {
    match resolve_legacy_path(uri.path()) {
        Some(target) => Redirect::permanent(target).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn customer_portal() -> Json<serde_json::Value> {
    Json(json!({ "page": "customer-portal" }))
}

async fn payment_canceled(
    headers: HeaderMap,
    Query(query): Query<PaymentCanceledQuery>,
) -> Json<PaymentCanceledPage> {
    let host = header_value(&headers, header::HOST).unwrap_or_default();
    Json(PaymentCanceledPage::resolve(
        query.session_id,
        header_value(&headers, header::REFERER),
        host,
    ))
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(LEGACY_PORTAL_PATH, get(legacy_redirect))
        .route("/portal/{*rest}", get(legacy_redirect))
        .route(CUSTOMER_PORTAL_PATH, get(customer_portal))
        .route(PAYMENT_CANCELED_PATH, get(payment_canceled))
}
