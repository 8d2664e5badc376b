use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::model::{term_key, Glossary, Term};
use super::store::GlossaryStore;
use crate::validation::require_non_empty;
use crate::{Error, Result};

pub struct GlossaryCatalog<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for GlossaryCatalog<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: GlossaryStore + ?Sized> GlossaryCatalog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Glossaries of an organization, sorted by name.
    pub async fn glossaries(&self, organization_id: Uuid) -> Result<Vec<Glossary>> {
        let mut glossaries = self.store.list_glossaries(organization_id).await?;
        glossaries.sort_by_key(|glossary| glossary.name.to_lowercase());
        Ok(glossaries)
    }

    pub async fn create_glossary(
        &self,
        organization_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Glossary> {
        let name = require_non_empty(name, "Glossary name")?;
        let mut glossary = Glossary::new(organization_id, name);
        glossary.description = description
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let glossary = self.store.insert_glossary(glossary).await?;
        info!(organization_id = %organization_id, glossary_id = %glossary.id, "glossary created");
        Ok(glossary)
    }

    pub async fn delete_glossary(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_glossary(id).await? {
            return Err(Error::NotFound(format!("Glossary {}", id)));
        }
        Ok(())
    }

    /// Terms of a glossary, sorted alphabetically.
    pub async fn terms(&self, glossary_id: Uuid) -> Result<Vec<Term>> {
        let mut terms = self.store.list_terms(glossary_id).await?;
        terms.sort_by_key(Term::match_key);
        Ok(terms)
    }

    /// Add a term. The same term (ignoring case and surrounding spaces) may
    /// appear only once per glossary.
    pub async fn add_term(&self, glossary_id: Uuid, term: &str, definition: &str) -> Result<Term> {
        let term = require_non_empty(term, "Term")?;
        let definition = require_non_empty(definition, "Definition")?;

        let key = term_key(&term);
        let existing = self.store.list_terms(glossary_id).await?;
        if existing.iter().any(|item| item.match_key() == key) {
            return Err(Error::Conflict(format!(
                "'{}' is already in this glossary",
                term
            )));
        }

        self.store
            .insert_term(Term::new(glossary_id, term, definition))
            .await
    }

    pub async fn remove_term(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_term(id).await? {
            return Err(Error::NotFound(format!("Term {}", id)));
        }
        Ok(())
    }
}
