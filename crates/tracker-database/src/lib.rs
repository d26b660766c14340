//! # tracker-database
//!
//! Lookup traits for projects, schemes, security levels, the user
//! directory, project roles, and the audit log, together with their
//! PostgreSQL implementations and connection management.
//!
//! Higher layers depend only on the traits in [`store`]; the
//! [`repositories`] implement them on top of a shared `PgPool`.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
