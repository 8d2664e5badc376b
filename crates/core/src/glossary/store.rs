//! Glossary store trait

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Glossary, Term};
use crate::Result;

#[async_trait]
pub trait GlossaryStore: Send + Sync {
    async fn list_glossaries(&self, organization_id: Uuid) -> Result<Vec<Glossary>>;

    async fn insert_glossary(&self, glossary: Glossary) -> Result<Glossary>;

    async fn delete_glossary(&self, id: Uuid) -> Result<bool>;

    async fn list_terms(&self, glossary_id: Uuid) -> Result<Vec<Term>>;

    async fn insert_term(&self, term: Term) -> Result<Term>;

    async fn delete_term(&self, id: Uuid) -> Result<bool>;
}
