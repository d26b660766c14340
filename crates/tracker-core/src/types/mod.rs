//! Core type definitions used across the tracker workspace.

pub mod error_collection;
pub mod id;
pub mod pagination;

pub use error_collection::ErrorCollection;
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
