//! Session module
//!
//! Sessions are issued by the managed authentication service; this module
//! holds the model, the provider interface and the explicit context object
//! that flows receive.

mod context;
mod model;
mod provider;

pub use context::{sign_in, sign_out, SessionContext};
pub use model::*;
pub use provider::SessionProvider;
