//! Member module
//!
//! Membership rows are created on invite, become active on acceptance and
//! are deleted on removal.

mod directory;
mod model;
mod store;

pub use directory::MemberDirectory;
pub use model::*;
pub use store::MemberStore;
