//! Audit log entities.

pub mod category;
pub mod item;
pub mod model;

pub use category::AuditingCategory;
pub use item::{AssociatedItem, AssociatedItemType, ChangedValue};
pub use model::{AuditRecord, RecordRequest};
