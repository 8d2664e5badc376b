//! In-memory backend for route tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candilingo_core::checkout::{CheckoutFunction, CheckoutSessionRequest, CheckoutSessionResponse};
use candilingo_core::dashboard::DashboardShell;
use candilingo_core::organization::{NewOrganization, Organization, OrganizationRecord, OrganizationStore};
use candilingo_core::session::{
    Session, SessionContext, SessionProvider, SignUpOutcome, SignUpRequest, UserIdentity,
};
use candilingo_core::{Error, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::state::{AppState, Backend};

pub const ORIGIN: &str = "https://app.candilingo.com";

pub fn identity(email: &str) -> UserIdentity {
    UserIdentity {
        id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()),
        email: email.to_string(),
        display_name: None,
    }
}

pub fn token_for(email: &str) -> String {
    format!("token-{}", email)
}

/// Sign-up behaves by email prefix: `confirm…` needs confirmation, `taken…`
/// is rejected, anything else gets a session.
#[derive(Default)]
pub struct FakeAuth {
    get_user_calls: AtomicUsize,
}

#[async_trait]
impl SessionProvider for FakeAuth {
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome> {
        let user = identity(&request.email);
        if request.email.starts_with("taken") {
            return Err(Error::provider("User already registered"));
        }
        if request.email.starts_with("confirm") {
            return Ok(SignUpOutcome { user, session: None });
        }
        Ok(SignUpOutcome {
            session: Some(Session::new(token_for(&request.email), user.clone())),
            user,
        })
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session> {
        Ok(Session::new(token_for(email), identity(email)))
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<UserIdentity> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        access_token
            .strip_prefix("token-")
            .map(identity)
            .ok_or_else(|| Error::provider("invalid JWT"))
    }
}

#[derive(Default)]
pub struct FakeOrganizations {
    rows: Mutex<HashMap<Uuid, OrganizationRecord>>,
}

impl FakeOrganizations {
    pub fn seed(&self, name: &str, owner: Uuid) -> Uuid {
        let record = OrganizationRecord::from(Organization {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            created_by: owner,
            active: true,
        });
        let id = record.organization.id;
        self.rows.lock().unwrap().insert(id, record);
        id
    }
}

#[async_trait]
impl OrganizationStore for FakeOrganizations {
    async fn fetch_record(&self, id: Uuid) -> Result<Option<OrganizationRecord>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_for_owner(&self, user_id: Uuid) -> Result<Option<OrganizationRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|record| record.organization.created_by == user_id)
            .cloned())
    }

    async fn insert(&self, organization: NewOrganization) -> Result<OrganizationRecord> {
        let id = self.seed(&organization.name, organization.created_by);
        self.fetch_record(id)
            .await?
            .ok_or_else(|| Error::provider("insert returned no row"))
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<OrganizationRecord> {
        let mut rows = self.rows.lock().unwrap();
        let record = rows
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Organization {}", id)))?;
        record.organization.name = name.to_string();
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

/// Returns a checkout URL for price `p1` and an empty object otherwise.
#[derive(Default)]
pub struct FakeCheckout {
    calls: AtomicUsize,
    last_cancel_url: Mutex<Option<String>>,
}

impl FakeCheckout {
    pub fn last_cancel_url(&self) -> Option<String> {
        self.last_cancel_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutFunction for FakeCheckout {
    async fn create_checkout_session(
        &self,
        _access_token: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSessionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_cancel_url.lock().unwrap() = request.options.cancel_url.clone();
        let body = serde_json::to_value(request)?;
        let url = (body["priceId"] == "p1").then(|| "https://pay.example/s1".to_string());
        Ok(CheckoutSessionResponse { url, error: None })
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub auth: Arc<FakeAuth>,
    pub organizations: Arc<FakeOrganizations>,
    pub checkout: Arc<FakeCheckout>,
}

impl FakeBackend {
    pub fn get_user_calls(&self) -> usize {
        self.auth.get_user_calls.load(Ordering::SeqCst)
    }

    pub fn checkout_calls(&self) -> usize {
        self.checkout.calls.load(Ordering::SeqCst)
    }
}

impl Backend for FakeBackend {
    fn sessions(&self) -> Arc<dyn SessionProvider> {
        self.auth.clone()
    }

    fn organizations(&self, _session: SessionContext) -> Arc<dyn OrganizationStore> {
        self.organizations.clone()
    }

    fn checkout(&self) -> Arc<dyn CheckoutFunction> {
        self.checkout.clone()
    }
}

pub fn state() -> (AppState, Arc<FakeBackend>) {
    let backend = Arc::new(FakeBackend::default());
    let state = AppState::new(backend.clone(), DashboardShell::default(), ORIGIN).unwrap();
    (state, backend)
}
