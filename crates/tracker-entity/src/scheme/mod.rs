//! Scheme entities: permission and notification schemes and their grants.

pub mod entity;
pub mod model;

pub use entity::SchemeEntity;
pub use model::{Scheme, SchemeType};
