//! Organization data access
//!
//! Everything handed to callers goes through [`normalize_organization`].

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::model::{normalize_organization, NewOrganization, OrganizationView};
use super::store::OrganizationStore;
use crate::validation::require_non_empty;
use crate::{Error, Result};

pub struct OrganizationDirectory<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for OrganizationDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrganizationStore + ?Sized> OrganizationDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fetch one organization by id.
    pub async fn fetch(&self, id: Uuid) -> Result<OrganizationView> {
        let record = self
            .store
            .fetch_record(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Organization {}", id)))?;
        debug!(organization_id = %id, "organization fetched");
        Ok(normalize_organization(record))
    }

    /// The organization owned by `user_id`, if the user has one yet.
    pub async fn for_owner(&self, user_id: Uuid) -> Result<Option<OrganizationView>> {
        Ok(self
            .store
            .find_for_owner(user_id)
            .await?
            .map(normalize_organization))
    }

    /// Create the owner's organization.
    ///
    /// An owner has at most one organization: when one already exists it is
    /// returned unchanged, including when a concurrent request inserted it
    /// between our lookup and our insert.
    pub async fn create(&self, name: &str, owner_id: Uuid) -> Result<OrganizationView> {
        let name = require_non_empty(name, "Organization name")?;

        if let Some(existing) = self.for_owner(owner_id).await? {
            info!(
                organization_id = %existing.id(),
                owner_id = %owner_id,
                "owner already has an organization"
            );
            return Ok(existing);
        }

        let inserted = self
            .store
            .insert(NewOrganization {
                name,
                created_by: owner_id,
            })
            .await;

        match inserted {
            Ok(record) => {
                info!(
                    organization_id = %record.organization.id,
                    owner_id = %owner_id,
                    "organization created"
                );
                Ok(normalize_organization(record))
            }
            Err(Error::Conflict(reason)) => {
                warn!(owner_id = %owner_id, "organization insert conflicted: {}", reason);
                self.for_owner(owner_id)
                    .await?
                    .ok_or(Error::Conflict(reason))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn rename(&self, id: Uuid, name: &str) -> Result<OrganizationView> {
        let name = require_non_empty(name, "Organization name")?;
        let record = self.store.rename(id, &name).await?;
        info!(organization_id = %id, "organization renamed");
        Ok(normalize_organization(record))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound(format!("Organization {}", id)));
        }
        info!(organization_id = %id, "organization deleted");
        Ok(())
    }
}
