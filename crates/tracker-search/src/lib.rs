//! # tracker-search
//!
//! Builds the permission filter that every issue search is combined with:
//! the projects a user may act in for a permission, intersected with the
//! issue security levels the user may see in those projects.

pub mod permission;

pub use permission::{PermissionQueryFactory, RequestQueryCache};
