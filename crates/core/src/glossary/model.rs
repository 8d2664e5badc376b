//! Glossary model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of terms scoped to one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glossary {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Glossary {
    pub fn new(organization_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: Uuid,
    pub glossary_id: Uuid,
    pub term: String,
    pub definition: String,
    pub created_at: DateTime<Utc>,
}

impl Term {
    pub fn new(glossary_id: Uuid, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            glossary_id,
            term: term.into(),
            definition: definition.into(),
            created_at: Utc::now(),
        }
    }

    /// Key used to detect duplicates inside one glossary.
    pub fn match_key(&self) -> String {
        term_key(&self.term)
    }
}

pub(crate) fn term_key(term: &str) -> String {
    term.trim().to_lowercase()
}
