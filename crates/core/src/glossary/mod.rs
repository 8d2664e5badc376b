//! Glossary module
//!
//! Glossaries of technical terms, owned by an organization.

mod catalog;
mod model;
mod store;

pub use catalog::GlossaryCatalog;
pub use model::{Glossary, Term};
pub use store::GlossaryStore;
