//! selora-storage
//!
//! Session and result persistence. A JSON-file-per-record directory
//! backend with a transparent in-memory fallback when no durable
//! directory is usable.

pub mod error;
pub mod store;

pub use store::SessionStore;
