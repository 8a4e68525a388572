//! Entity trait: identity by natural key.

/// Entity marker + minimal interface.
///
/// Every persisted row type that owns a unique key (inventory items, suppliers,
/// hospitals) implements this so lookups can be written once.
pub trait Entity {
    /// Strongly-typed natural key.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity key.
    fn id(&self) -> &Self::Id;
}

/// Linear lookup by key; the first match wins.
pub fn find_by_id<'a, E: Entity>(entities: &'a [E], id: &E::Id) -> Option<&'a E> {
    entities.iter().find(|e| e.id() == id)
}
