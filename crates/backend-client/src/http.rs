//! Shared HTTP plumbing for the backend adapters

use std::sync::Arc;

use candilingo_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::BackendConfig;

/// Keys the backend services use for a human-readable failure.
const MESSAGE_FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

/// A reqwest client bound to one backend project. Cheap to clone.
#[derive(Clone)]
pub struct BackendHttp {
    client: Client,
    config: Arc<BackendConfig>,
}

impl BackendHttp {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("candilingo/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Start a request to `path`, authorized as the user behind
    /// `access_token` or anonymously.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!("backend request: {} {}", method, url);
        self.client
            .request(method, url)
            .headers(self.auth_headers(access_token))
    }

    fn auth_headers(&self, access_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = access_token.unwrap_or(&self.config.anon_key);
        if let Ok(value) = HeaderValue::from_str(&self.config.anon_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T> {
        let res = self.send(request, action).await?;
        res.json::<T>()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse {} response: {}", action, e)))
    }

    /// Send and discard the body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder, action: &str) -> Result<()> {
        self.send(request, action).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let res = request
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Failed to {}: {}", action, e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_else(|_| String::new());
            return Err(error_from_status(status, &body));
        }
        Ok(res)
    }
}

/// Turn a non-2xx reply into an [`Error`], keeping the backend's own message.
pub(crate) fn error_from_status(status: StatusCode, body: &str) -> Error {
    let message = extract_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    });
    match status {
        StatusCode::CONFLICT => Error::Conflict(message),
        _ => Error::Provider(message),
    }
}

pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    MESSAGE_FIELDS.iter().find_map(|field| {
        value
            .get(*field)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}
