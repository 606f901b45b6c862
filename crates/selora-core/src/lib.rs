//! selora-core
//!
//! Pure domain types, translation tables, and record key conventions.
//! No IO and no async — this is the shared vocabulary of the Selora
//! self-assessment system.

pub mod error;
pub mod i18n;
pub mod keys;
pub mod models;
