//! # tracker-core
//!
//! Core crate for the issue tracker. Contains configuration schemas,
//! typed identifiers, domain events, pagination types, the search query
//! value model, the field-keyed
//! [`ErrorCollection`](types::ErrorCollection), the XML escape codec,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other tracker crates.

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod query;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
