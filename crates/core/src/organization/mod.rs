//! Organization module
//!
//! An Organization is the tenant that owns glossaries and members. Each
//! owning user creates exactly one, at bootstrap time.

mod directory;
mod model;
mod store;

pub use directory::OrganizationDirectory;
pub use model::*;
pub use store::OrganizationStore;
