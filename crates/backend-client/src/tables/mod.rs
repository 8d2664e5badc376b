//! Table stores backed by the REST service (`/rest/v1`)
//!
//! Each store acts on behalf of the user in its [`SessionContext`]; row-level
//! security on the backend decides what that user may see.

mod glossaries;
mod members;
mod organizations;

pub use glossaries::RestGlossaryStore;
pub use members::RestMemberStore;
pub use organizations::RestOrganizationStore;

use std::fmt::Display;

use candilingo_core::session::SessionContext;
use candilingo_core::Result;
use reqwest::RequestBuilder;

/// Exact-match filter value.
fn eq(value: impl Display) -> String {
    format!("eq.{}", value)
}

/// Ask the backend to echo written rows back.
fn returning_rows(request: RequestBuilder) -> RequestBuilder {
    request.header("Prefer", "return=representation")
}

async fn access_token(session: &SessionContext, action: &str) -> Result<String> {
    Ok(session.require(action).await?.access_token)
}
