//! Collision volumes and the pairwise test dispatch table
//!
//! A [`Collider`] does not store a position. It names its owning entity and
//! reads the owner's current transform from the [`World`] whenever it is
//! tested, so a test always reflects where the owner is this frame.

use std::fmt;

use thiserror::Error;

use crate::ecs::World;
use crate::foundation::collections::{EntityId, Key};
use crate::foundation::math::Vec3;

/// Collision errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollisionError {
    /// No intersection test exists for this pair of collider variants
    #[error("Unsupported collider pairing: {first} vs {second}")]
    UnsupportedPairing {
        /// Variant of the collider being asked
        first: ColliderKind,
        /// Variant of the collider passed in
        second: ColliderKind,
    },

    /// Sphere constructed with a negative (or NaN) radius
    #[error("Sphere radius must be non-negative, got {0}")]
    NegativeRadius(f32),

    /// Box constructed with a negative (or NaN) half extent
    #[error("Box half extents must be non-negative, got {0:?}")]
    InvalidExtents(Vec3),

    /// Collider constructed without an owning entity
    #[error("Collider requires an owning entity")]
    NullOwner,

    /// The owner handle no longer resolves to a live entity
    #[error("Collider owner {0:?} is not a live entity")]
    MissingOwner(EntityId),

    /// Collider attached to an entity other than its owner
    #[error("Collider owned by {owner:?} cannot be attached to {entity:?}")]
    OwnerMismatch {
        /// Owner recorded in the collider
        owner: EntityId,
        /// Entity it was attached to
        entity: EntityId,
    },
}

/// Collider variant tag, used for dispatch and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    /// Sphere around the owner's position
    Sphere,
    /// Axis-aligned box around the owner's position
    Box,
}

impl fmt::Display for ColliderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sphere => write!(f, "sphere"),
            Self::Box => write!(f, "box"),
        }
    }
}

/// Collision volume geometry, centered on the owner's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Sphere with the given radius
    Sphere {
        /// Radius in world units (not affected by the owner's scale)
        radius: f32,
    },
    /// Axis-aligned box with the given half extents
    Box {
        /// Half size along each world axis
        half_extents: Vec3,
    },
}

impl ColliderShape {
    /// Sphere shape; rejects negative or NaN radii
    pub fn sphere(radius: f32) -> Result<Self, CollisionError> {
        if radius >= 0.0 {
            Ok(Self::Sphere { radius })
        } else {
            Err(CollisionError::NegativeRadius(radius))
        }
    }

    /// Axis-aligned box shape; rejects negative or NaN half extents
    pub fn aabb(half_extents: Vec3) -> Result<Self, CollisionError> {
        if half_extents.iter().all(|extent| *extent >= 0.0) {
            Ok(Self::Box { half_extents })
        } else {
            Err(CollisionError::InvalidExtents(half_extents))
        }
    }

    /// Variant tag
    pub fn kind(&self) -> ColliderKind {
        match self {
            Self::Sphere { .. } => ColliderKind::Sphere,
            Self::Box { .. } => ColliderKind::Box,
        }
    }

    fn validate(self) -> Result<Self, CollisionError> {
        match self {
            Self::Sphere { radius } => Self::sphere(radius),
            Self::Box { half_extents } => Self::aabb(half_extents),
        }
    }
}

/// A collision volume attached to one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    owner: EntityId,
    shape: ColliderShape,
}

impl Collider {
    /// Create a collider for `owner`
    ///
    /// Fails if `owner` is the null handle or the shape is invalid.
    pub fn new(owner: EntityId, shape: ColliderShape) -> Result<Self, CollisionError> {
        if owner.is_null() {
            return Err(CollisionError::NullOwner);
        }
        Ok(Self {
            owner,
            shape: shape.validate()?,
        })
    }

    /// Sphere collider for `owner`
    pub fn sphere(owner: EntityId, radius: f32) -> Result<Self, CollisionError> {
        Self::new(owner, ColliderShape::sphere(radius)?)
    }

    /// Entity whose transform supplies this collider's center
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Collider geometry
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Variant tag
    pub fn kind(&self) -> ColliderKind {
        self.shape.kind()
    }

    /// Current center, read live from the owner's transform
    pub fn center(&self, world: &World) -> Result<Vec3, CollisionError> {
        world
            .transform(self.owner)
            .map(crate::ecs::Transform::position)
            .ok_or(CollisionError::MissingOwner(self.owner))
    }

    /// Test this collider against `other`
    ///
    /// Returns [`CollisionError::UnsupportedPairing`] when no test exists for
    /// the two variants; that is a missing implementation, not a miss.
    pub fn collides_with(&self, other: &Self, world: &World) -> Result<bool, CollisionError> {
        match (&self.shape, &other.shape) {
            (ColliderShape::Sphere { radius: a }, ColliderShape::Sphere { radius: b }) => {
                let distance = (self.center(world)? - other.center(world)?).norm();
                Ok(sphere_sphere(distance, *a, *b))
            }
            (ColliderShape::Box { half_extents: a }, ColliderShape::Box { half_extents: b }) => {
                let offset = self.center(world)? - other.center(world)?;
                Ok(box_box(&offset, a, b))
            }
            (first, second) => Err(CollisionError::UnsupportedPairing {
                first: first.kind(),
                second: second.kind(),
            }),
        }
    }
}

/// Inclusive: touching spheres collide
fn sphere_sphere(distance: f32, radius_a: f32, radius_b: f32) -> bool {
    distance <= radius_a + radius_b
}

/// Inclusive per-axis interval overlap
fn box_box(offset: &Vec3, half_a: &Vec3, half_b: &Vec3) -> bool {
    offset
        .iter()
        .zip(half_a.iter().zip(half_b.iter()))
        .all(|(delta, (a, b))| delta.abs() <= a + b)
}
