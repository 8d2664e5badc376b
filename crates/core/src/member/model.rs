//! Organization member model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Role of a member inside an organization.
///
/// `admin` is accepted as a synonym of `owner` when reading rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    #[serde(alias = "admin")]
    Owner,
    Manager,
    TeamLead,
    Employee,
    Consultant,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::TeamLead => "team_lead",
            Self::Employee => "employee",
            Self::Consultant => "consultant",
        }
    }

    pub fn can_manage_members(self) -> bool {
        matches!(self, Self::Owner | Self::Manager)
    }

    pub fn can_manage_billing(self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "owner" | "admin" => Ok(Self::Owner),
            "manager" => Ok(Self::Manager),
            "team_lead" => Ok(Self::TeamLead),
            "employee" => Ok(Self::Employee),
            "consultant" => Ok(Self::Consultant),
            _ => Err(Error::InvalidInput(format!("Unsupported role '{}'", value))),
        }
    }
}

/// Membership status. Independent of [`MemberRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Pending,
    Invited,
}

impl MemberStatus {
    pub fn can_accept(self) -> bool {
        matches!(self, Self::Pending | Self::Invited)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub email: String,
    pub invited_by: Uuid,
    pub invited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// `None` until the invitee has an account
    pub user_id: Option<Uuid>,
    pub role: MemberRole,
    pub status: MemberStatus,
    #[serde(default)]
    pub invitation: Option<Invitation>,
}

impl OrganizationMember {
    /// A fresh invitation row.
    pub fn invited(organization_id: Uuid, email: String, role: MemberRole, invited_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            user_id: None,
            role,
            status: MemberStatus::Invited,
            invitation: Some(Invitation {
                email,
                invited_by,
                invited_at: Utc::now(),
            }),
        }
    }

    pub fn invitation_email(&self) -> Option<&str> {
        self.invitation.as_ref().map(|invitation| invitation.email.as_str())
    }

    /// The invitee registered; the membership waits for acceptance.
    pub fn mark_pending(&mut self, user_id: Uuid) -> Result<()> {
        if self.status != MemberStatus::Invited {
            return Err(Error::InvalidInput(format!(
                "Member {} is not awaiting registration",
                self.id
            )));
        }
        self.user_id = Some(user_id);
        self.status = MemberStatus::Pending;
        Ok(())
    }

    pub fn accept(&mut self) -> Result<()> {
        if !self.status.can_accept() {
            return Err(Error::InvalidInput(format!(
                "Member {} is already active",
                self.id
            )));
        }
        self.status = MemberStatus::Active;
        Ok(())
    }
}
