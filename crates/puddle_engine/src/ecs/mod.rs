//! Entities, transforms and the entity store
//!
//! Transforms are flat (no parent/child hierarchy): one per entity.

pub mod entity;
pub mod transform;
pub mod world;

pub use entity::Entity;
pub use transform::{compose_world_matrix, Transform};
pub use world::World;
pub use crate::foundation::collections::EntityId;
