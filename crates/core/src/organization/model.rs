//! Organization model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::member::MemberRole;

/// A tenant/workspace owning glossaries and members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Organization row exactly as the backend returns it.
///
/// `role` (the caller's role in the organization) and `member_count` are
/// filled by backend views and may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    #[serde(flatten)]
    pub organization: Organization,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
}

impl From<Organization> for OrganizationRecord {
    fn from(organization: Organization) -> Self {
        Self {
            organization,
            role: None,
            member_count: None,
        }
    }
}

/// Organization as exposed to callers, with every defaultable field filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationView {
    #[serde(flatten)]
    pub organization: Organization,
    pub role: MemberRole,
    pub member_count: u32,
}

impl OrganizationView {
    pub fn id(&self) -> Uuid {
        self.organization.id
    }

    pub fn name(&self) -> &str {
        &self.organization.name
    }
}

/// Fill the fields the backend may omit.
///
/// A missing `role` becomes [`MemberRole::Owner`] and a missing
/// `member_count` becomes `1`; values the backend supplies are kept as-is.
pub fn normalize_organization(record: OrganizationRecord) -> OrganizationView {
    OrganizationView {
        organization: record.organization,
        role: record.role.unwrap_or(MemberRole::Owner),
        member_count: record.member_count.unwrap_or(1),
    }
}

/// Payload for inserting an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub created_by: Uuid,
}
