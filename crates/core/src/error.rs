//! Error types for the core library

use thiserror::Error;

/// Message shown when a provider failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    /// Detected locally before any network call (e.g. no active session).
    #[error("{0}")]
    Precondition(String),

    /// Reported by a managed collaborator (auth, tables, functions).
    /// An empty message means the provider gave none.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn not_logged_in(action: &str) -> Self {
        Self::Precondition(format!("You must be logged in to {}", action))
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Text for a user-facing notification.
    ///
    /// Provider failures surface the provider's own message when it has one and
    /// fall back to `fallback` otherwise. Local errors always carry their message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Provider(message) if message.trim().is_empty() => fallback.to_string(),
            Self::Provider(message) => message.clone(),
            Self::Serialization(_) => fallback.to_string(),
            Self::Precondition(message)
            | Self::InvalidInput(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.clone(),
        }
    }
}
