//! Entity implementation

use crate::ecs::Transform;
use crate::physics::Collider;
use crate::render::RenderPayload;

/// A game object: one transform, optionally a collider and something to draw
#[derive(Debug, Clone, Default)]
pub struct Entity {
    /// Spatial state, always present
    pub transform: Transform,
    collider: Option<Collider>,
    render: Option<RenderPayload>,
}

impl Entity {
    /// Create an entity with the given transform and nothing else
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            collider: None,
            render: None,
        }
    }

    /// Builder pattern: Attach a render payload
    #[must_use]
    pub fn with_render(mut self, payload: RenderPayload) -> Self {
        self.render = Some(payload);
        self
    }

    /// Collision volume, if this entity takes part in collision checks
    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    /// Mesh and texture to draw, if any
    pub fn render(&self) -> Option<&RenderPayload> {
        self.render.as_ref()
    }

    pub(crate) fn set_collider(&mut self, collider: Collider) {
        self.collider = Some(collider);
    }

    /// Detach the collider, returning it
    pub fn take_collider(&mut self) -> Option<Collider> {
        self.collider.take()
    }
}
