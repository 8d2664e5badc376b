//! Checkout redirector
//!
//! Mints a hosted checkout session through a serverless function and sends
//! the browser there.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{error, info};
use url::Url;

use super::model::{CheckoutOptions, CheckoutSessionRequest, CheckoutSessionResponse};
use crate::busy::BusyFlag;
use crate::navigation::PAYMENT_CANCELED_PATH;
use crate::notify::{Notification, Notifier};
use crate::session::SessionContext;
use crate::{Error, Result};

pub const CHECKOUT_FAILED_MESSAGE: &str = "Failed to create checkout session";

/// The serverless function that creates hosted checkout sessions.
#[async_trait]
pub trait CheckoutFunction: Send + Sync {
    async fn create_checkout_session(
        &self,
        access_token: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSessionResponse>;
}

/// Full-page navigation. Once called, the current view is gone.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Remembers the last navigation target instead of performing it.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    target: Arc<Mutex<Option<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<String> {
        self.target.lock().ok().and_then(|target| target.clone())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        if let Ok(mut target) = self.target.lock() {
            *target = Some(url.to_string());
        }
    }
}

/// Reduce `raw` to its origin (scheme, host, port), dropping any path.
pub fn public_origin(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|err| Error::InvalidInput(format!("Invalid origin '{}': {}", raw, err)))?;
    Ok(url.origin().ascii_serialization())
}

pub struct CheckoutRedirector<F: ?Sized> {
    function: Arc<F>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    origin: String,
    loading: BusyFlag,
}

impl<F: CheckoutFunction + ?Sized> CheckoutRedirector<F> {
    /// `origin` is the public origin of the app (scheme, host, port); any path
    /// is ignored.
    pub fn new(
        function: Arc<F>,
        origin: &str,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let origin = public_origin(origin)?;
        Ok(Self {
            function,
            navigator,
            notifier,
            origin,
            loading: BusyFlag::new(),
        })
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn default_cancel_url(&self) -> String {
        format!("{}{}", self.origin, PAYMENT_CANCELED_PATH)
    }

    /// Create a checkout session and navigate to it.
    ///
    /// Returns the navigation target. Callers must treat `Ok` as the end of
    /// the current view. No retry is attempted on failure.
    pub async fn redirect_to_checkout(
        &self,
        session: &SessionContext,
        options: CheckoutOptions,
    ) -> Result<String> {
        match self.create_session_url(session, options).await {
            Ok(url) => {
                info!(checkout_url = %url, "redirecting to checkout");
                self.navigator.navigate(&url);
                Ok(url)
            }
            Err(err) => {
                error!("checkout failed: {}", err);
                self.notifier.notify(Notification::error(
                    "Checkout failed",
                    err.user_message(CHECKOUT_FAILED_MESSAGE),
                ));
                Err(err)
            }
        }
    }

    async fn create_session_url(
        &self,
        session: &SessionContext,
        mut options: CheckoutOptions,
    ) -> Result<String> {
        let session = session.require("checkout").await?;
        let _loading = self.loading.acquire("Checkout")?;

        if options.cancel_url.as_deref().map_or(true, |url| url.trim().is_empty()) {
            options.cancel_url = Some(self.default_cancel_url());
        }

        let request = CheckoutSessionRequest {
            options,
            user_id: session.user.id,
            user_email: session.user.email.clone(),
        };
        let response = self
            .function
            .create_checkout_session(&session.access_token, &request)
            .await?;

        if let Some(message) = response.error.filter(|message| !message.trim().is_empty()) {
            return Err(Error::Provider(message));
        }

        response
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::provider(CHECKOUT_FAILED_MESSAGE))
    }
}
