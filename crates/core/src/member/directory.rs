//! Member management: invitations, acceptance, role changes, removal.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::model::{MemberRole, OrganizationMember};
use super::store::MemberStore;
use crate::validation::normalize_email;
use crate::{Error, Result};

pub struct MemberDirectory<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for MemberDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MemberStore + ?Sized> MemberDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<OrganizationMember>> {
        self.store.list(organization_id).await
    }

    /// Invite `email` into the organization with `role`.
    pub async fn invite(
        &self,
        organization_id: Uuid,
        email: &str,
        role: MemberRole,
        invited_by: Uuid,
    ) -> Result<OrganizationMember> {
        let email = normalize_email(email)?;

        let existing = self.store.list(organization_id).await?;
        if existing
            .iter()
            .any(|member| member.invitation_email() == Some(email.as_str()))
        {
            return Err(Error::Conflict(format!(
                "'{}' has already been invited",
                email
            )));
        }

        let member = self
            .store
            .insert(OrganizationMember::invited(
                organization_id,
                email,
                role,
                invited_by,
            ))
            .await?;
        info!(
            organization_id = %organization_id,
            member_id = %member.id,
            role = %member.role,
            "member invited"
        );
        Ok(member)
    }

    pub async fn mark_pending(&self, member_id: Uuid, user_id: Uuid) -> Result<OrganizationMember> {
        let mut member = self.get(member_id).await?;
        member.mark_pending(user_id)?;
        self.store.update(member).await
    }

    pub async fn accept(&self, member_id: Uuid) -> Result<OrganizationMember> {
        let mut member = self.get(member_id).await?;
        member.accept()?;
        let member = self.store.update(member).await?;
        info!(member_id = %member_id, "invitation accepted");
        Ok(member)
    }

    pub async fn change_role(&self, member_id: Uuid, role: MemberRole) -> Result<OrganizationMember> {
        let mut member = self.get(member_id).await?;
        member.role = role;
        self.store.update(member).await
    }

    pub async fn remove(&self, member_id: Uuid) -> Result<()> {
        if !self.store.delete(member_id).await? {
            return Err(Error::NotFound(format!("Member {}", member_id)));
        }
        info!(member_id = %member_id, "member removed");
        Ok(())
    }

    async fn get(&self, member_id: Uuid) -> Result<OrganizationMember> {
        self.store
            .get(member_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Member {}", member_id)))
    }
}
