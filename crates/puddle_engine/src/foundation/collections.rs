//! Specialized collection types

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Generational handle to an entity in a [`World`](crate::ecs::World)
    ///
    /// A handle to a despawned entity never resolves again, even if its slot
    /// is reused, which makes it safe to hold as a back-reference.
    pub struct EntityId;
}

/// Handle-based map keyed by entity handles
pub type EntityMap<T> = SlotMap<EntityId, T>;
