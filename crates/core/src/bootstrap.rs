//! Organization bootstrap prompt
//!
//! Shown to a signed-in user who has no organization yet. Collects a name and
//! hands it to the creation operation supplied by the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::busy::BusyFlag;
use crate::notify::{Notification, Notifier};
use crate::organization::{OrganizationDirectory, OrganizationStore, OrganizationView};
use crate::session::SessionContext;
use crate::validation::require_non_empty;
use crate::Result;

const CREATE_FALLBACK_MESSAGE: &str = "Failed to create organization. Please try again.";

#[async_trait]
pub trait OrganizationCreator: Send + Sync {
    async fn create_organization(&self, name: &str, owner_id: Uuid) -> Result<OrganizationView>;
}

#[async_trait]
impl<S: OrganizationStore + ?Sized> OrganizationCreator for OrganizationDirectory<S> {
    async fn create_organization(&self, name: &str, owner_id: Uuid) -> Result<OrganizationView> {
        self.create(name, owner_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    Editing,
    Created(OrganizationView),
    Cancelled,
}

pub struct OrganizationBootstrapPrompt {
    name: String,
    state: BootstrapState,
    loading: BusyFlag,
    notifier: Arc<dyn Notifier>,
}

impl OrganizationBootstrapPrompt {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            name: String::new(),
            state: BootstrapState::Editing,
            loading: BusyFlag::new(),
            notifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty() && !self.is_loading()
    }

    /// Create the organization for the signed-in user.
    ///
    /// On failure the prompt stays editable so the user can retry.
    pub async fn submit<C>(&mut self, session: &SessionContext, creator: &C) -> Result<OrganizationView>
    where
        C: OrganizationCreator + ?Sized,
    {
        let result = self.try_submit(session, creator).await;
        match &result {
            Ok(organization) => {
                info!(organization_id = %organization.id(), "organization bootstrapped");
                self.notifier.notify(Notification::success(
                    "Organization created",
                    format!("{} is ready.", organization.name()),
                ));
                self.state = BootstrapState::Created(organization.clone());
            }
            Err(err) => {
                error!("organization bootstrap failed: {}", err);
                self.notifier.notify(Notification::error(
                    "Could not create organization",
                    err.user_message(CREATE_FALLBACK_MESSAGE),
                ));
            }
        }
        result
    }

    async fn try_submit<C>(&self, session: &SessionContext, creator: &C) -> Result<OrganizationView>
    where
        C: OrganizationCreator + ?Sized,
    {
        let session = session.require("create an organization").await?;
        let name = require_non_empty(&self.name, "Organization name")?;
        let _loading = self.loading.acquire("Organization creation")?;
        creator.create_organization(&name, session.user_id()).await
    }

    /// Leave the prompt without creating anything.
    pub fn cancel(&mut self) {
        self.state = BootstrapState::Cancelled;
    }
}
