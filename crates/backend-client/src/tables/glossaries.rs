//! `glossaries` and `glossary_terms` tables

use async_trait::async_trait;
use candilingo_core::glossary::{Glossary, GlossaryStore, Term};
use candilingo_core::session::SessionContext;
use candilingo_core::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::{access_token, eq, returning_rows};
use crate::http::BackendHttp;

const GLOSSARIES: &str = "/rest/v1/glossaries";
const TERMS: &str = "/rest/v1/glossary_terms";

pub struct RestGlossaryStore {
    http: BackendHttp,
    session: SessionContext,
}

impl RestGlossaryStore {
    pub fn new(http: BackendHttp, session: SessionContext) -> Self {
        Self { http, session }
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, column: &str, value: Uuid) -> Result<Vec<T>> {
        let token = access_token(&self.session, "view glossaries").await?;
        let request = self
            .http
            .request(Method::GET, table, Some(&token))
            .query(&[("select", "*".to_string()), (column, eq(value))]);
        self.http.send_json(request, "list glossary rows").await
    }

    async fn insert<T: Serialize + DeserializeOwned>(&self, table: &str, row: &T) -> Result<T> {
        let token = access_token(&self.session, "edit glossaries").await?;
        let request = returning_rows(self.http.request(Method::POST, table, Some(&token))).json(row);
        let rows: Vec<T> = self.http.send_json(request, "insert glossary row").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::provider("Glossary insert returned no row"))
    }

    async fn delete(&self, table: &str, id: Uuid) -> Result<bool> {
        let token = access_token(&self.session, "edit glossaries").await?;
        let request = returning_rows(self.http.request(Method::DELETE, table, Some(&token)))
            .query(&[("id", eq(id))]);
        let rows: Vec<serde_json::Value> = self.http.send_json(request, "delete glossary row").await?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl GlossaryStore for RestGlossaryStore {
    async fn list_glossaries(&self, organization_id: Uuid) -> Result<Vec<Glossary>> {
        self.select(GLOSSARIES, "organization_id", organization_id).await
    }

    async fn insert_glossary(&self, glossary: Glossary) -> Result<Glossary> {
        self.insert(GLOSSARIES, &glossary).await
    }

    async fn delete_glossary(&self, id: Uuid) -> Result<bool> {
        self.delete(GLOSSARIES, id).await
    }

    async fn list_terms(&self, glossary_id: Uuid) -> Result<Vec<Term>> {
        self.select(TERMS, "glossary_id", glossary_id).await
    }

    async fn insert_term(&self, term: Term) -> Result<Term> {
        self.insert(TERMS, &term).await
    }

    async fn delete_term(&self, id: Uuid) -> Result<bool> {
        self.delete(TERMS, id).await
    }
}
