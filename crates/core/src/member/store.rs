//! Member store trait

use async_trait::async_trait;
use uuid::Uuid;

use super::model::OrganizationMember;
use crate::Result;

/// Repository interface for membership rows
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// All members of an organization
    async fn list(&self, organization_id: Uuid) -> Result<Vec<OrganizationMember>>;

    /// Get a member by ID
    async fn get(&self, id: Uuid) -> Result<Option<OrganizationMember>>;

    /// Insert a new member row
    async fn insert(&self, member: OrganizationMember) -> Result<OrganizationMember>;

    /// Replace an existing member row
    async fn update(&self, member: OrganizationMember) -> Result<OrganizationMember>;

    /// Delete a member by ID
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
