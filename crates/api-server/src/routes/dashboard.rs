//! Dashboard shell configuration

use axum::{extract::State, routing::get, Json, Router};
use candilingo_core::dashboard::DashboardSnapshot;

use crate::state::AppState;

async fn dashboard_config(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.shell().snapshot())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard_config))
}
