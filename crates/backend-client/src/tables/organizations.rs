//! `organizations` table

use async_trait::async_trait;
use candilingo_core::organization::{NewOrganization, OrganizationRecord, OrganizationStore};
use candilingo_core::session::SessionContext;
use candilingo_core::{Error, Result};
use reqwest::Method;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::{access_token, eq, returning_rows};
use crate::http::BackendHttp;

const TABLE: &str = "/rest/v1/organizations";

pub struct RestOrganizationStore {
    http: BackendHttp,
    session: SessionContext,
}

impl RestOrganizationStore {
    pub fn new(http: BackendHttp, session: SessionContext) -> Self {
        Self { http, session }
    }

    async fn select_one(&self, column: &str, value: Uuid) -> Result<Option<OrganizationRecord>> {
        let token = access_token(&self.session, "view organizations").await?;
        let request = self
            .http
            .request(Method::GET, TABLE, Some(&token))
            .query(&[
                ("select", "*".to_string()),
                (column, eq(value)),
                ("limit", "1".to_string()),
            ]);
        let rows: Vec<OrganizationRecord> =
            self.http.send_json(request, "fetch organization").await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl OrganizationStore for RestOrganizationStore {
    async fn fetch_record(&self, id: Uuid) -> Result<Option<OrganizationRecord>> {
        self.select_one("id", id).await
    }

    async fn find_for_owner(&self, user_id: Uuid) -> Result<Option<OrganizationRecord>> {
        self.select_one("created_by", user_id).await
    }

    async fn insert(&self, organization: NewOrganization) -> Result<OrganizationRecord> {
        let token = access_token(&self.session, "create an organization").await?;
        let request =
            returning_rows(self.http.request(Method::POST, TABLE, Some(&token))).json(&organization);
        let rows: Vec<OrganizationRecord> =
            self.http.send_json(request, "create organization").await?;
        let record = rows
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider("Organization insert returned no row"))?;
        info!(organization_id = %record.organization.id, "organization row inserted");
        Ok(record)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<OrganizationRecord> {
        let token = access_token(&self.session, "rename an organization").await?;
        let request = returning_rows(self.http.request(Method::PATCH, TABLE, Some(&token)))
            .query(&[("id", eq(id))])
            .json(&json!({ "name": name }));
        let rows: Vec<OrganizationRecord> =
            self.http.send_json(request, "rename organization").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Organization {}", id)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let token = access_token(&self.session, "delete an organization").await?;
        let request = returning_rows(self.http.request(Method::DELETE, TABLE, Some(&token)))
            .query(&[("id", eq(id))]);
        let rows: Vec<OrganizationRecord> =
            self.http.send_json(request, "delete organization").await?;
        Ok(!rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use candilingo_core::member::MemberRole;
    use candilingo_core::organization::OrganizationDirectory;
    use candilingo_core::session::{Session, UserIdentity};
    use serde_json::Value;

    use super::*;
    use crate::test_server::{bearer, spawn};

    type Rows = Arc<Mutex<Vec<Value>>>;

    fn filter(query: &HashMap<String, String>, column: &str) -> Option<String> {
        query
            .get(column)
            .and_then(|value| value.strip_prefix("eq."))
            .map(str::to_string)
    }

    async fn select(
        State(rows): State<Rows>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        if bearer(&headers).as_deref() != Some("user-token") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "JWT expired" })));
        }
        let rows = rows.lock().unwrap();
        let matches: Vec<Value> = rows
            .iter()
            .filter(|row| {
                ["id", "created_by"].iter().all(|column| match filter(&query, column) {
                    Some(value) => row[*column] == value.as_str(),
                    None => true,
                })
            })
            .cloned()
            .collect();
        (StatusCode::OK, Json(Value::Array(matches)))
    }

    async fn insert(
        State(rows): State<Rows>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get("Prefer").and_then(|v| v.to_str().ok()) != Some("return=representation") {
            return (StatusCode::OK, Json(json!([])));
        }
        let mut rows = rows.lock().unwrap();
        if rows.iter().any(|row| row["created_by"] == body["created_by"]) {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "code": "23505",
                    "message": "duplicate key value violates unique constraint \"organizations_created_by_key\""
                })),
            );
        }
        let row = json!({
            "id": Uuid::new_v4(),
            "name": body["name"],
            "created_at": "2024-03-01T10:00:00Z",
            "created_by": body["created_by"],
        });
        rows.push(row.clone());
        (StatusCode::CREATED, Json(json!([row])))
    }

    fn session() -> SessionContext {
        SessionContext::with_session(Session::new(
            "user-token",
            UserIdentity {
                id: Uuid::new_v4(),
                email: "owner@b.com".to_string(),
                display_name: None,
            },
        ))
    }

    async fn store(rows: Rows, session: SessionContext) -> RestOrganizationStore {
        let router = Router::new()
            .route(TABLE, get(select).post(insert))
            .with_state(rows);
        RestOrganizationStore::new(spawn(router).await, session)
    }

    #[tokio::test]
    async fn fetch_normalizes_sparse_row() {
        let id = Uuid::new_v4();
        let rows: Rows = Arc::new(Mutex::new(vec![json!({
            "id": id,
            "name": "Acme",
            "created_at": "2024-03-01T10:00:00Z",
            "created_by": Uuid::new_v4(),
        })]));
        let directory = OrganizationDirectory::new(Arc::new(store(rows, session()).await));

        let view = directory.fetch(id).await.unwrap();

        assert_eq!(view.name(), "Acme");
        assert_eq!(view.role, MemberRole::Owner);
        assert_eq!(view.member_count, 1);
    }

    #[tokio::test]
    async fn fetch_passes_supplied_fields_through() {
        let id = Uuid::new_v4();
        let rows: Rows = Arc::new(Mutex::new(vec![json!({
            "id": id,
            "name": "Acme",
            "created_at": "2024-03-01T10:00:00Z",
            "created_by": Uuid::new_v4(),
            "role": "admin",
            "member_count": 9,
        })]));
        let directory = OrganizationDirectory::new(Arc::new(store(rows, session()).await));

        let view = directory.fetch(id).await.unwrap();

        assert_eq!(view.role, MemberRole::Owner);
        assert_eq!(view.member_count, 9);
    }

    #[tokio::test]
    async fn unique_owner_violation_is_a_conflict() {
        let session = session();
        let owner = session.current().await.unwrap().user_id();
        let store = store(Arc::new(Mutex::new(Vec::new())), session).await;

        let created = store
            .insert(NewOrganization {
                name: "Acme".to_string(),
                created_by: owner,
            })
            .await
            .unwrap();
        assert_eq!(created.organization.created_by, owner);

        let err = store
            .insert(NewOrganization {
                name: "Acme 2".to_string(),
                created_by: owner,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let found = store.find_for_owner(owner).await.unwrap().unwrap();
        assert_eq!(found.organization.id, created.organization.id);
    }

    #[tokio::test]
    async fn requires_session_before_any_request() {
        let store = store(Arc::new(Mutex::new(Vec::new())), SessionContext::new()).await;

        let err = store.fetch_record(Uuid::new_v4()).await.unwrap_err();

        assert!(err.is_precondition());
    }
}
