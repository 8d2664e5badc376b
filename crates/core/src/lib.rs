//! Core library for the Candilingo web portal
//!
//! This crate contains the portal's business logic, including:
//! - Session handling and registration
//! - Organizations, members and glossaries
//! - Navigation guards and the dashboard shell
//! - Checkout redirection

pub mod bootstrap;
pub mod busy;
pub mod checkout;
pub mod dashboard;
pub mod error;
pub mod glossary;
pub mod member;
pub mod navigation;
pub mod notify;
pub mod organization;
pub mod registration;
pub mod session;
pub mod validation;

#[cfg(test)]
mod fakes;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
