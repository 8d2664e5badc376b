//! Checkout request and response payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What is being bought: a fixed price or a product priced at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductRef {
    #[serde(rename = "priceId")]
    Price(String),
    #[serde(rename = "productId")]
    Product(String),
}

/// Options for one checkout. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOptions {
    #[serde(flatten)]
    pub product: ProductRef,
    pub product_name: String,
    /// Amount in the smallest currency unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_id: Option<String>,
    /// Trial length in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl CheckoutOptions {
    pub fn for_price(price_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self::new(ProductRef::Price(price_id.into()), product_name)
    }

    pub fn for_product(product_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self::new(ProductRef::Product(product_id.into()), product_name)
    }

    fn new(product: ProductRef, product_name: impl Into<String>) -> Self {
        Self {
            product,
            product_name: product_name.into(),
            custom_price: None,
            coupon_id: None,
            trial_period: None,
            cancel_url: None,
        }
    }

    pub fn with_custom_price(mut self, amount: u64) -> Self {
        self.custom_price = Some(amount);
        self
    }

    pub fn with_coupon(mut self, coupon_id: impl Into<String>) -> Self {
        self.coupon_id = Some(coupon_id.into());
        self
    }

    pub fn with_trial_period(mut self, days: u32) -> Self {
        self.trial_period = Some(days);
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }
}

/// Body sent to the checkout function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    #[serde(flatten)]
    pub options: CheckoutOptions,
    pub user_id: Uuid,
    pub user_email: String,
}

/// Reply of the checkout function. Only a non-empty `url` counts as success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutSessionResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
