//! Project and project role entities.

pub mod model;
pub mod role;

pub use model::Project;
pub use role::ProjectRole;
