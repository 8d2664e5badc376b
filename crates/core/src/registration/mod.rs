//! Registration module
//!
//! Two-step sign-up wizard: basic info, then additional profile info.

mod flow;
mod state;

pub use flow::{RegistrationFlow, RegistrationOutcome, EMAIL_CONFIRMATION_MESSAGE};
pub use state::{AdditionalInfo, BasicInfo, RegistrationEvent, RegistrationState, RegistrationStep};
