//! # tracker-service
//!
//! Business logic service layer for the tracker. Services orchestrate the
//! store traits and the permission layer to implement application-level
//! use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod context;

pub use audit::{AuditEventHandler, AuditingManager};
pub use context::RequestContext;
