//! # Connection Provider
//!
//! Owns the database location and open flags. Every request acquires its
//! own [`Session`] and releases it when the session is dropped.

mod errors;
mod provider;

pub use errors::{DbError, DbResult};
pub use provider::{ConnectionProvider, Session};
