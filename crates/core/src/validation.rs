//! Input normalization shared by the flows.

use crate::{Error, Result};

/// Trim `value` and reject it when nothing is left.
pub fn require_non_empty(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Lowercase and trim an email address after a shape check.
pub fn normalize_email(email: &str) -> Result<String> {
    let normalized = email.trim().to_lowercase();
    if !is_valid_email(&normalized) {
        return Err(Error::InvalidInput(format!(
            "'{}' is not a valid email address",
            email.trim()
        )));
    }
    Ok(normalized)
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
