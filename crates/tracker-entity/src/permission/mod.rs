//! Project and global permission identifiers.

pub mod model;

pub use model::ProjectPermission;
