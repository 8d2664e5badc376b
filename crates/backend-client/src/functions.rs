//! Checkout function client (`/functions/v1`)

use async_trait::async_trait;
use candilingo_core::checkout::{CheckoutFunction, CheckoutSessionRequest, CheckoutSessionResponse};
use candilingo_core::Result;
use reqwest::Method;
use tracing::info;

use crate::http::BackendHttp;

pub struct FunctionsClient {
    http: BackendHttp,
}

impl FunctionsClient {
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }

    fn checkout_path(&self) -> String {
        format!(
            "/functions/v1/{}",
            urlencoding::encode(&self.http.config().checkout_function)
        )
    }
}

#[async_trait]
impl CheckoutFunction for FunctionsClient {
    async fn create_checkout_session(
        &self,
        access_token: &str,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSessionResponse> {
        info!(
            user_id = %request.user_id,
            function = %self.http.config().checkout_function,
            "invoking checkout function"
        );
        let call = self
            .http
            .request(Method::POST, &self.checkout_path(), Some(access_token))
            .json(request);
        self.http.send_json(call, "create checkout session").await
    }
}
