//! Route handlers organized by domain.

pub mod admin;
pub mod audit;
pub mod health;
pub mod permission;
