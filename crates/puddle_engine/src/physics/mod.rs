//! Physics module for collision detection
//!
//! Brute-force pairwise collision tests between entity-owned volumes, plus
//! the play-area bounds used to cull entities. There is no broad phase and no
//! collision response; callers decide what a hit means.

pub mod bounds;
pub mod collider;

pub use bounds::PlayArea;
pub use collider::{Collider, ColliderKind, ColliderShape, CollisionError};
