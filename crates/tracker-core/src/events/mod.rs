//! Domain events emitted by administrative operations.
//!
//! Events are consumed by the audit event handler, which turns them into
//! audit records, and by cache owners that must drop derived state when
//! the underlying schemes change.

pub mod scheme;

pub use scheme::{GrantDescriptor, SchemeEvent, SchemeKind};
