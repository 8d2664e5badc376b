//! `organization_members` table

use async_trait::async_trait;
use candilingo_core::member::{MemberStore, OrganizationMember};
use candilingo_core::session::SessionContext;
use candilingo_core::{Error, Result};
use reqwest::Method;
use uuid::Uuid;

use super::{access_token, eq, returning_rows};
use crate::http::BackendHttp;

const TABLE: &str = "/rest/v1/organization_members";

pub struct RestMemberStore {
    http: BackendHttp,
    session: SessionContext,
}

impl RestMemberStore {
    pub fn new(http: BackendHttp, session: SessionContext) -> Self {
        Self { http, session }
    }
}

#[async_trait]
impl MemberStore for RestMemberStore {
    async fn list(&self, organization_id: Uuid) -> Result<Vec<OrganizationMember>> {
        let token = access_token(&self.session, "view members").await?;
        let request = self
            .http
            .request(Method::GET, TABLE, Some(&token))
            .query(&[("select", "*".to_string()), ("organization_id", eq(organization_id))]);
        self.http.send_json(request, "list members").await
    }

    async fn get(&self, id: Uuid) -> Result<Option<OrganizationMember>> {
        let token = access_token(&self.session, "view members").await?;
        let request = self
            .http
            .request(Method::GET, TABLE, Some(&token))
            .query(&[("select", "*".to_string()), ("id", eq(id))]);
        let rows: Vec<OrganizationMember> = self.http.send_json(request, "fetch member").await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, member: OrganizationMember) -> Result<OrganizationMember> {
        let token = access_token(&self.session, "invite members").await?;
        let request = returning_rows(self.http.request(Method::POST, TABLE, Some(&token))).json(&member);
        let rows: Vec<OrganizationMember> = self.http.send_json(request, "invite member").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::provider("Member insert returned no row"))
    }

    async fn update(&self, member: OrganizationMember) -> Result<OrganizationMember> {
        let token = access_token(&self.session, "manage members").await?;
        let request = returning_rows(self.http.request(Method::PATCH, TABLE, Some(&token)))
            .query(&[("id", eq(member.id))])
            .json(&member);
        let rows: Vec<OrganizationMember> = self.http.send_json(request, "update member").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Member {}", member.id)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let token = access_token(&self.session, "manage members").await?;
        let request = returning_rows(self.http.request(Method::DELETE, TABLE, Some(&token)))
            .query(&[("id", eq(id))]);
        let rows: Vec<OrganizationMember> = self.http.send_json(request, "remove member").await?;
        Ok(!rows.is_empty())
    }
}
