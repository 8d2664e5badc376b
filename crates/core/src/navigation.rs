//! Client-side routes and the rules that pick between them.

use serde::Serialize;
use tracing::info;
use url::Url;

use crate::dashboard::{DashboardSelection, DashboardShell};
use crate::organization::OrganizationView;
use crate::session::Session;

pub const CUSTOMER_PORTAL_PATH: &str = "/customer-portal";
pub const PAYMENT_CANCELED_PATH: &str = "/payment-canceled";
pub const LEGACY_PORTAL_PATH: &str = "/portal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    CreateOrganization,
    Dashboard(DashboardSelection),
    CustomerPortal,
    PaymentCanceled,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::CreateOrganization => "/create-organization".to_string(),
            Self::Dashboard(selection) => selection.path(),
            Self::CustomerPortal => CUSTOMER_PORTAL_PATH.to_string(),
            Self::PaymentCanceled => PAYMENT_CANCELED_PATH.to_string(),
        }
    }
}

impl Serialize for Route {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

/// Where a user lands given their session and organization.
///
/// A signed-in user without an organization always goes to the
/// organization bootstrap prompt before the dashboard.
pub fn route_for(
    session: Option<&Session>,
    organization: Option<&OrganizationView>,
    shell: &DashboardShell,
) -> Route {
    match (session, organization) {
        (None, _) => Route::Login,
        (Some(_), None) => Route::CreateOrganization,
        (Some(_), Some(_)) => Route::Dashboard(shell.default_selection()),
    }
}

/// Map retired paths onto their replacements.
pub fn resolve_legacy_path(path: &str) -> Option<&'static str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed == LEGACY_PORTAL_PATH || trimmed.starts_with("/portal/") {
        return Some(CUSTOMER_PORTAL_PATH);
    }
    None
}

/// State of the page shown after the user backs out of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCanceledPage {
    pub session_id: Option<String>,
    pub return_to: String,
}

impl PaymentCanceledPage {
    /// `session_id` is only logged. The return destination is the referrer
    /// when it points at `current_host`, the customer portal otherwise.
    pub fn resolve(session_id: Option<String>, referrer: Option<&str>, current_host: &str) -> Self {
        if let Some(id) = session_id.as_deref() {
            info!(checkout_session_id = %id, "checkout canceled");
        }

        let return_to = referrer
            .and_then(|raw| Url::parse(raw).ok())
            .filter(|url| same_host(url, current_host))
            .map(|url| url.to_string())
            .unwrap_or_else(|| CUSTOMER_PORTAL_PATH.to_string());

        Self {
            session_id,
            return_to,
        }
    }
}

/// `current_host` may carry a port, as in a `Host` header.
fn same_host(url: &Url, current_host: &str) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let authority = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    authority.eq_ignore_ascii_case(current_host)
}
