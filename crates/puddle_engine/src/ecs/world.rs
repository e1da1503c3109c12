//! Entity store

use crate::ecs::{Entity, Transform};
use crate::foundation::collections::{EntityId, EntityMap};
use crate::physics::{Collider, ColliderShape, CollisionError};
use crate::render::RenderPayload;

/// Arena of live entities addressed by generational [`EntityId`]s
#[derive(Debug, Default)]
pub struct World {
    entities: EntityMap<Entity>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity with only a transform
    pub fn spawn(&mut self, transform: Transform) -> EntityId {
        self.insert(Entity::new(transform))
    }

    /// Insert an entity that will be drawn with `payload`
    pub fn spawn_rendered(&mut self, transform: Transform, payload: RenderPayload) -> EntityId {
        self.insert(Entity::new(transform).with_render(payload))
    }

    /// Insert a pre-built entity
    ///
    /// Any collider already on `entity` is dropped; colliders must be attached
    /// with [`World::attach_collider`] so they point back at the right handle.
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        entity.take_collider();
        let id = self.entities.insert(entity);
        log::trace!("Spawned entity {:?}", id);
        id
    }

    /// Give `id` a collider of the given shape, owned by `id`
    pub fn attach_collider(&mut self, id: EntityId, shape: ColliderShape) -> Result<(), CollisionError> {
        let collider = Collider::new(id, shape)?;
        self.set_collider(id, collider)
    }

    /// Attach an existing collider; its owner must be `id`
    pub fn set_collider(&mut self, id: EntityId, collider: Collider) -> Result<(), CollisionError> {
        if collider.owner() != id {
            return Err(CollisionError::OwnerMismatch {
                owner: collider.owner(),
                entity: id,
            });
        }
        let entity = self.entities.get_mut(id).ok_or(CollisionError::MissingOwner(id))?;
        entity.set_collider(collider);
        Ok(())
    }

    /// Remove an entity; its handle never resolves again
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(id);
        if removed.is_some() {
            log::trace!("Despawned entity {:?}", id);
        }
        removed
    }

    /// Whether `id` refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity by handle
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutable entity by handle
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Transform of an entity
    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.entities.get(id).map(|entity| &entity.transform)
    }

    /// Mutable transform of an entity
    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.entities.get_mut(id).map(|entity| &mut entity.transform)
    }

    /// Snapshot of all live handles
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().collect()
    }

    /// Iterate over live entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Test two entities against each other
    ///
    /// Entities without a collider never collide. Missing entities and
    /// unsupported collider pairings are errors.
    pub fn check_collision(&self, a: EntityId, b: EntityId) -> Result<bool, CollisionError> {
        let first = self.entities.get(a).ok_or(CollisionError::MissingOwner(a))?;
        let second = self.entities.get(b).ok_or(CollisionError::MissingOwner(b))?;

        match (first.collider(), second.collider()) {
            (Some(first), Some(second)) => first.collides_with(second, self),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_spawn_and_despawn() {
        let mut world = World::new();
        let a = world.spawn(Transform::new());
        let b = world.spawn(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(world.len(), 2);
        assert_eq!(world.transform(b).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));

        assert!(world.despawn(a).is_some());
        assert!(world.despawn(a).is_none());
        assert!(!world.contains(a));
        assert_eq!(world.ids(), vec![b]);
    }

    #[test]
    fn test_stale_handle_does_not_resolve_after_slot_reuse() {
        let mut world = World::new();
        let old = world.spawn(Transform::new());
        world.despawn(old);
        let new = world.spawn(Transform::new());

        assert_ne!(old, new);
        assert!(world.get(old).is_none());
        assert!(world.get(new).is_some());
    }

    #[test]
    fn test_attach_collider_sets_back_reference() {
        let mut world = World::new();
        let id = world.spawn(Transform::new());
        world.attach_collider(id, ColliderShape::sphere(0.5).unwrap()).unwrap();

        assert_eq!(world.get(id).unwrap().collider().unwrap().owner(), id);
    }

    #[test]
    fn test_attach_collider_to_missing_entity_fails() {
        let mut world = World::new();
        let id = world.spawn(Transform::new());
        world.despawn(id);

        assert_eq!(
            world.attach_collider(id, ColliderShape::sphere(0.5).unwrap()),
            Err(CollisionError::MissingOwner(id))
        );
    }

    #[test]
    fn test_set_collider_rejects_foreign_owner() {
        let mut world = World::new();
        let a = world.spawn(Transform::new());
        let b = world.spawn(Transform::new());
        let collider = Collider::sphere(a, 1.0).unwrap();

        assert!(matches!(
            world.set_collider(b, collider),
            Err(CollisionError::OwnerMismatch { .. })
        ));
    }

    #[test]
    fn test_check_collision_without_colliders_is_false() {
        let mut world = World::new();
        let a = world.spawn(Transform::new());
        let b = world.spawn(Transform::new());
        world.attach_collider(a, ColliderShape::sphere(1.0).unwrap()).unwrap();

        assert_eq!(world.check_collision(a, b), Ok(false));
    }

    #[test]
    fn test_check_collision_overlapping_spheres() {
        let mut world = World::new();
        let a = world.spawn(Transform::new());
        let b = world.spawn(Transform::from_position(Vec3::new(0.3, 0.0, 0.0)));
        world.attach_collider(a, ColliderShape::sphere(0.5).unwrap()).unwrap();
        world.attach_collider(b, ColliderShape::sphere(0.3).unwrap()).unwrap();

        assert_eq!(world.check_collision(a, b), Ok(true));
        assert_eq!(world.check_collision(b, a), Ok(true));
    }
}
