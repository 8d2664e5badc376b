//! Web shell for the Candilingo portal
//!
//! Serves the client-side routes (`/portal`, `/customer-portal`,
//! `/payment-canceled`) and a JSON API that drives registration,
//! organization bootstrap and checkout against the managed backend.

mod auth;
mod error;
mod feature_flags;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use backend_client::{BackendConfig, BackendHttp};
use candilingo_core::dashboard::{DashboardShell, Feature};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::{AppState, RestBackend};

const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::pages::router())
        .merge(routes::dashboard::router())
        .merge(routes::register::router())
        .merge(routes::organizations::router())
        .merge(routes::checkout::router())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api_server=debug,candilingo_core=debug,backend_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend_config = BackendConfig::from_env().context("Failed to read backend configuration")?;
    tracing::info!(
        backend_url = %backend_config.url,
        checkout_function = %backend_config.checkout_function,
        "Using managed backend"
    );

    let public_origin =
        std::env::var("CANDILINGO_PUBLIC_ORIGIN").unwrap_or_else(|_| DEFAULT_PUBLIC_ORIGIN.to_string());
    let bind_addr: SocketAddr = std::env::var("CANDILINGO_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("CANDILINGO_BIND_ADDR is not a socket address")?;

    let flags = feature_flags::snapshot();
    tracing::info!(?flags, "Feature flags");
    let shell = DashboardShell::default().with_feature(Feature::GlossaryImport, flags.glossary_import);

    let backend = Arc::new(RestBackend::new(BackendHttp::new(backend_config)));
    let state = AppState::new(backend, shell, &public_origin).with_context(|| {
        format!("CANDILINGO_PUBLIC_ORIGIN '{}' is not a valid origin", public_origin)
    })?;
    let app = app(state);

    tracing::info!("Web shell listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
