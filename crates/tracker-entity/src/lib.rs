//! # tracker-entity
//!
//! Domain entity models for the issue tracker. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and row-backed
//! entities additionally derive `sqlx::FromRow`.

pub mod audit;
pub mod permission;
pub mod project;
pub mod scheme;
pub mod security;
pub mod user;
