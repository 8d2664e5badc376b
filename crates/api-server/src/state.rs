//! Application state

use std::sync::Arc;

use backend_client::{AuthClient, BackendHttp, FunctionsClient, RestOrganizationStore};
use candilingo_core::checkout::{public_origin, CheckoutFunction};
use candilingo_core::dashboard::DashboardShell;
use candilingo_core::organization::OrganizationStore;
use candilingo_core::session::{SessionContext, SessionProvider};
use candilingo_core::Result;

/// The managed backend as seen by the route handlers.
///
/// Table access is bound to the caller's session, so stores are built per
/// request.
pub trait Backend: Send + Sync {
    fn sessions(&self) -> Arc<dyn SessionProvider>;

    fn organizations(&self, session: SessionContext) -> Arc<dyn OrganizationStore>;

    fn checkout(&self) -> Arc<dyn CheckoutFunction>;
}

/// [`Backend`] over HTTP.
pub struct RestBackend {
    http: BackendHttp,
    auth: Arc<AuthClient>,
    functions: Arc<FunctionsClient>,
}

impl RestBackend {
    pub fn new(http: BackendHttp) -> Self {
        Self {
            auth: Arc::new(AuthClient::new(http.clone())),
            functions: Arc::new(FunctionsClient::new(http.clone())),
            http,
        }
    }
}

impl Backend for RestBackend {
    fn sessions(&self) -> Arc<dyn SessionProvider> {
        self.auth.clone()
    }

    fn organizations(&self, session: SessionContext) -> Arc<dyn OrganizationStore> {
        Arc::new(RestOrganizationStore::new(self.http.clone(), session))
    }

    fn checkout(&self) -> Arc<dyn CheckoutFunction> {
        self.functions.clone()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    backend: Arc<dyn Backend>,
    shell: DashboardShell,
    public_origin: String,
}

impl AppState {
    /// Fails when `origin` is not an absolute URL.
    pub fn new(backend: Arc<dyn Backend>, shell: DashboardShell, origin: &str) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(AppStateInner {
                backend,
                shell,
                public_origin: public_origin(origin)?,
            }),
        })
    }

    pub fn backend(&self) -> &dyn Backend {
        self.inner.backend.as_ref()
    }

    pub fn shell(&self) -> &DashboardShell {
        &self.inner.shell
    }

    /// Origin used to build absolute URLs such as the checkout cancel URL
    pub fn public_origin(&self) -> &str {
        &self.inner.public_origin
    }
}
