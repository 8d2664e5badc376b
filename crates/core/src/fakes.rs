//! In-memory stand-ins for the backend, shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::checkout::{CheckoutFunction, CheckoutSessionRequest, CheckoutSessionResponse};
use crate::glossary::{Glossary, GlossaryStore, Term};
use crate::member::{MemberRole, MemberStore, OrganizationMember};
use crate::organization::{
    normalize_organization, NewOrganization, Organization, OrganizationRecord, OrganizationStore,
    OrganizationView,
};
use crate::session::{Session, SessionProvider, SignUpOutcome, SignUpRequest, UserIdentity};
use crate::{Error, Result};

/// Stable user id derived from the email so tests can predict it.
fn user_id_for_email(email: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes())
}

pub fn identity(email: &str) -> UserIdentity {
    UserIdentity {
        id: user_id_for_email(email),
        email: email.to_string(),
        display_name: None,
    }
}

pub fn view(name: &str, owner: Uuid) -> OrganizationView {
    normalize_organization(OrganizationRecord::from(Organization {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Utc::now(),
        created_by: owner,
        active: true,
    }))
}

enum SignUpBehavior {
    Immediate,
    Confirming,
    Failing(String),
}

pub struct FakeSessionProvider {
    sign_up: SignUpBehavior,
    sign_out_error: Option<String>,
    sign_up_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl FakeSessionProvider {
    fn with(sign_up: SignUpBehavior) -> Self {
        Self {
            sign_up,
            sign_out_error: None,
            sign_up_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    /// Sign-up returns a live session.
    pub fn immediate() -> Self {
        Self::with(SignUpBehavior::Immediate)
    }

    /// Sign-up requires email confirmation.
    pub fn confirming() -> Self {
        Self::with(SignUpBehavior::Confirming)
    }

    pub fn failing_sign_up(message: &str) -> Self {
        Self::with(SignUpBehavior::Failing(message.to_string()))
    }

    pub fn failing_sign_out(message: &str) -> Self {
        Self {
            sign_out_error: Some(message.to_string()),
            ..Self::confirming()
        }
    }

    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn user_id_for(&self, email: &str) -> Uuid {
        user_id_for_email(email)
    }
}

#[async_trait]
impl SessionProvider for FakeSessionProvider {
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        let user = UserIdentity {
            display_name: Some(request.profile.name.clone()),
            ..identity(&request.email)
        };
        match &self.sign_up {
            SignUpBehavior::Immediate => Ok(SignUpOutcome {
                session: Some(Session::new(format!("token-{}", request.email), user.clone())),
                user,
            }),
            SignUpBehavior::Confirming => Ok(SignUpOutcome {
                user,
                session: None,
            }),
            SignUpBehavior::Failing(message) => Err(Error::Provider(message.clone())),
        }
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session> {
        Ok(Session::new(format!("token-{}", email), identity(email)))
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        match &self.sign_out_error {
            Some(message) => Err(Error::Provider(message.clone())),
            None => Ok(()),
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<UserIdentity> {
        access_token
            .strip_prefix("token-")
            .map(identity)
            .ok_or_else(|| Error::Precondition("Invalid access token".to_string()))
    }
}

#[derive(Default)]
pub struct MemoryOrganizationStore {
    rows: Mutex<HashMap<Uuid, OrganizationRecord>>,
    hidden: Mutex<HashMap<Uuid, OrganizationRecord>>,
    insert_calls: AtomicUsize,
}

impl MemoryOrganizationStore {
    fn record(
        name: &str,
        owner: Uuid,
        role: Option<MemberRole>,
        member_count: Option<u32>,
    ) -> OrganizationRecord {
        OrganizationRecord {
            organization: Organization {
                id: Uuid::new_v4(),
                name: name.to_string(),
                created_at: Utc::now(),
                created_by: owner,
                active: true,
            },
            role,
            member_count,
        }
    }

    pub fn seed(
        &self,
        name: &str,
        owner: Uuid,
        role: Option<MemberRole>,
        member_count: Option<u32>,
    ) -> Uuid {
        let record = Self::record(name, owner, role, member_count);
        let id = record.organization.id;
        self.rows.lock().unwrap().insert(id, record);
        id
    }

    /// A row written by a concurrent request: invisible to lookups until the
    /// next insert, which then conflicts with it.
    pub fn seed_hidden_until_insert(&self, name: &str, owner: Uuid) -> Uuid {
        let record = Self::record(name, owner, None, None);
        let id = record.organization.id;
        self.hidden.lock().unwrap().insert(id, record);
        id
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrganizationStore for MemoryOrganizationStore {
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
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let revealed: Vec<OrganizationRecord> =
            self.hidden.lock().unwrap().drain().map(|(_, record)| record).collect();
        let mut rows = self.rows.lock().unwrap();
        for record in revealed {
            rows.insert(record.organization.id, record);
        }

        if rows
            .values()
            .any(|record| record.organization.created_by == organization.created_by)
        {
            return Err(Error::Conflict(format!(
                "User {} already owns an organization",
                organization.created_by
            )));
        }

        let record = Self::record(&organization.name, organization.created_by, None, None);
        rows.insert(record.organization.id, record.clone());
        Ok(record)
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

#[derive(Default)]
pub struct MemoryMemberStore {
    rows: Mutex<HashMap<Uuid, OrganizationMember>>,
}

#[async_trait]
impl MemberStore for MemoryMemberStore {
    async fn list(&self, organization_id: Uuid) -> Result<Vec<OrganizationMember>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|member| member.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<OrganizationMember>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, member: OrganizationMember) -> Result<OrganizationMember> {
        self.rows.lock().unwrap().insert(member.id, member.clone());
        Ok(member)
    }

    async fn update(&self, member: OrganizationMember) -> Result<OrganizationMember> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&member.id) {
            return Err(Error::NotFound(format!("Member {}", member.id)));
        }
        rows.insert(member.id, member.clone());
        Ok(member)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryGlossaryStore {
    glossaries: Mutex<HashMap<Uuid, Glossary>>,
    terms: Mutex<HashMap<Uuid, Term>>,
}

#[async_trait]
impl GlossaryStore for MemoryGlossaryStore {
    async fn list_glossaries(&self, organization_id: Uuid) -> Result<Vec<Glossary>> {
        Ok(self
            .glossaries
            .lock()
            .unwrap()
            .values()
            .filter(|glossary| glossary.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn insert_glossary(&self, glossary: Glossary) -> Result<Glossary> {
        self.glossaries.lock().unwrap().insert(glossary.id, glossary.clone());
        Ok(glossary)
    }

    async fn delete_glossary(&self, id: Uuid) -> Result<bool> {
        let removed = self.glossaries.lock().unwrap().remove(&id).is_some();
        if removed {
            self.terms.lock().unwrap().retain(|_, term| term.glossary_id != id);
        }
        Ok(removed)
    }

    async fn list_terms(&self, glossary_id: Uuid) -> Result<Vec<Term>> {
        Ok(self
            .terms
            .lock()
            .unwrap()
            .values()
            .filter(|term| term.glossary_id == glossary_id)
            .cloned()
            .collect())
    }

    async fn insert_term(&self, term: Term) -> Result<Term> {
        self.terms.lock().unwrap().insert(term.id, term.clone());
        Ok(term)
    }

    async fn delete_term(&self, id: Uuid) -> Result<bool> {
        Ok(self.terms.lock().unwrap().remove(&id).is_some())
    }
}

pub struct FakeCheckoutFunction {
    response: std::result::Result<CheckoutSessionResponse, String>,
    calls: Mutex<Vec<(String, CheckoutSessionRequest)>>,
}

impl FakeCheckoutFunction {
    pub fn returning(response: CheckoutSessionResponse) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning_url(url: &str) -> Self {
        Self::returning(CheckoutSessionResponse {
            url: Some(url.to_string()),
            error: None,
        })
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, CheckoutSessionRequest)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CheckoutFunction for FakeCheckoutFunction {
    async fn create_checkout_session(
        &self,
        access_token: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSessionResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((access_token.to_string(), request.clone()));
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(Error::Provider(message.clone())),
        }
    }
}
