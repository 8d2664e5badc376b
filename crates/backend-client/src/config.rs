//! Backend connection settings

use candilingo_core::{Error, Result};
use url::Url;

pub const DEFAULT_CHECKOUT_FUNCTION: &str = "create-checkout-session";

const BACKEND_URL_VAR: &str = "CANDILINGO_BACKEND_URL";
const ANON_KEY_VAR: &str = "CANDILINGO_BACKEND_ANON_KEY";
const CHECKOUT_FUNCTION_VAR: &str = "CANDILINGO_CHECKOUT_FUNCTION";

/// Where the managed backend lives and how to identify this app to it.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL; `/auth/v1`, `/rest/v1` and `/functions/v1` hang off it
    pub url: Url,
    /// Public anonymous key sent as the `apikey` header
    pub anon_key: String,
    /// Name of the serverless function that mints checkout sessions
    pub checkout_function: String,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::InvalidInput(format!("Invalid backend URL '{}': {}", url, e)))?;
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(Error::InvalidInput("Backend anon key cannot be empty".to_string()));
        }
        Ok(Self {
            url,
            anon_key,
            checkout_function: DEFAULT_CHECKOUT_FUNCTION.to_string(),
        })
    }

    /// Read the configuration from `CANDILINGO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let url = required_var(BACKEND_URL_VAR)?;
        let anon_key = required_var(ANON_KEY_VAR)?;
        let checkout_function = std::env::var(CHECKOUT_FUNCTION_VAR)
            .unwrap_or_else(|_| DEFAULT_CHECKOUT_FUNCTION.to_string());
        Ok(Self::new(&url, anon_key)?.with_checkout_function(checkout_function))
    }

    pub fn with_checkout_function(mut self, name: impl Into<String>) -> Self {
        self.checkout_function = name.into();
        self
    }

    /// Absolute URL for `path` below the project base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::InvalidInput(format!("{} must be set", name)))
}
