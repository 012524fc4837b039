//! # Database Facade
//!
//! The four operations exposed to callers (HTTP handlers and the CLI).
//! Each call acquires its own session and releases it before returning.

mod database;
mod errors;

pub use database::DatabaseFacade;
pub use errors::{FacadeError, FacadeResult};
