//! Organization store trait
//!
//! Row-level access to the organization table.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{NewOrganization, OrganizationRecord};
use crate::Result;

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Get an organization by exact id
    async fn fetch_record(&self, id: Uuid) -> Result<Option<OrganizationRecord>>;

    /// Get the organization created by `user_id`, if any
    async fn find_for_owner(&self, user_id: Uuid) -> Result<Option<OrganizationRecord>>;

    /// Insert a new organization.
    ///
    /// Implementations return [`crate::Error::Conflict`] when the backend
    /// refuses a second organization for the same owner.
    async fn insert(&self, organization: NewOrganization) -> Result<OrganizationRecord>;

    /// Change the display name
    async fn rename(&self, id: Uuid, name: &str) -> Result<OrganizationRecord>;

    /// Delete an organization, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
