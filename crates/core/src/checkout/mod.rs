//! Checkout module
//!
//! Extension licenses are bought on a hosted payment page; this module only
//! asks for a checkout session and redirects to it.

mod model;
mod redirector;

pub use model::*;
pub use redirector::{
    public_origin, CheckoutFunction, CheckoutRedirector, Navigator, RecordingNavigator,
    CHECKOUT_FAILED_MESSAGE,
};
