//! Administration handlers.

pub mod mail;
pub mod scheme;
