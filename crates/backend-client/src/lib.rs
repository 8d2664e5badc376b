//! HTTP adapters for the managed backend
//!
//! Implements the collaborator traits of `candilingo-core` against the
//! backend's auth, table and function endpoints.

mod auth;
mod config;
mod functions;
mod http;
mod tables;

#[cfg(test)]
mod test_server;

pub use auth::AuthClient;
pub use config::{BackendConfig, DEFAULT_CHECKOUT_FUNCTION};
pub use functions::FunctionsClient;
pub use http::BackendHttp;
pub use tables::{RestGlossaryStore, RestMemberStore, RestOrganizationStore};
