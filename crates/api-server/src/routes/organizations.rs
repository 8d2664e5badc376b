//! Organization bootstrap and lookup

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use candilingo_core::bootstrap::OrganizationBootstrapPrompt;
use candilingo_core::notify::TracingNotifier;
use candilingo_core::organization::{OrganizationDirectory, OrganizationView};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::session_from_headers;
use crate::error::{map_core_error, RouteError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrgRequest {
    name: String,
}

async fn create_org(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateOrgRequest>,
) -> Result<(StatusCode, Json<OrganizationView>), RouteError> {
    let session = session_from_headers(&state, &headers).await?;
    let directory = OrganizationDirectory::new(state.backend().organizations(session.clone()));

    let mut prompt = OrganizationBootstrapPrompt::new(Arc::new(TracingNotifier));
    prompt.set_name(req.name);
    let organization = prompt
        .submit(&session, &directory)
        .await
        .map_err(map_core_error)?;
    Ok((StatusCode::CREATED, Json(organization)))
}

async fn get_org(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(org_id): Path<Uuid>,
) -> Result<Json<OrganizationView>, RouteError> {
    let session = session_from_headers(&state, &headers).await?;
    let directory = OrganizationDirectory::new(state.backend().organizations(session));
    let organization = directory.fetch(org_id).await.map_err(map_core_error)?;
    Ok(Json(organization))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/organizations", post(create_org))
        .route("/api/organizations/{org_id}", get(get_org))
}
