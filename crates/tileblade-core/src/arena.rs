//! Arena storage for every entity in a level.
//!
//! The Arena provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Stable, never-reused [`EntityId`] handles
//! - Group queries ([`Arena::ids_in`]) over [`SpriteGroups`] flags
//! - A deferred-removal queue flushed at pass boundaries
//!
//! # Deferred Removal
//!
//! Passes iterate over a sorted list of IDs while mutating entities one at a
//! time. Removing an entity in the middle of such a pass would make later
//! lookups in the same pass disagree about what exists, so removal is split in
//! two:
//!
//! - [`Arena::queue_removal`] marks an entity; it stays fully accessible
//! - [`Arena::flush_removals`] drops every marked entity from storage, and
//!   therefore from every group, at once
//!
//! # Example
//!
//! ```
//! use tileblade_core::arena::Arena;
//! use tileblade_core::entity::{EntityInner, SpriteGroups, Tile, TileKind};
//! use glam::Vec2;
//!
//! let mut arena = Arena::new();
//! let shrink = Vec2::new(-2.0, -10.0);
//! let wall = arena.spawn(EntityInner::Tile(Tile::new(TileKind::Boundary, Vec2::ZERO, 64.0, shrink)));
//! let grass = arena.spawn(EntityInner::Tile(Tile::new(TileKind::Grass, Vec2::new(64.0, 0.0), 64.0, shrink)));
//!
//! assert_eq!(arena.ids_in(SpriteGroups::OBSTACLE), vec![wall, grass]);
//! assert_eq!(arena.ids_in(SpriteGroups::ATTACKABLE), vec![grass]);
//!
//! arena.queue_removal(grass);
//! assert!(arena.get(grass).is_some());
//! arena.flush_removals();
//! assert!(arena.get(grass).is_none());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::body::HasHitbox;
use crate::entity::{Entity, EntityId, EntityInner, SpriteGroups};
use crate::geometry::Rect;

/// Container for all entities of a level.
///
/// # Determinism
///
/// Entity IDs are assigned monotonically and storage is a `BTreeMap`, so every
/// iteration and every group query yields IDs in ascending order.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// Entities marked for removal at the next flush.
    pending_removal: BTreeSet<EntityId>,
}

impl Arena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns an entity with the default groups for its kind.
    ///
    /// # Returns
    ///
    /// The unique ID assigned to the new entity.
    pub fn spawn(&mut self, inner: EntityInner) -> EntityId {
        let groups = inner.default_groups();
        self.spawn_in(inner, groups)
    }

    /// Spawns an entity with explicit group membership.
    ///
    /// # Arguments
    ///
    /// * `inner` - The entity's state
    /// * `groups` - Groups the entity joins
    pub fn spawn_in(&mut self, inner: EntityInner, groups: SpriteGroups) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::with_groups(id, inner, groups));
        id
    }

    /// Removes an entity immediately.
    ///
    /// Prefer [`Arena::queue_removal`] while a pass is iterating.
    ///
    /// # Returns
    ///
    /// The removed entity, if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.pending_removal.remove(&id);
        self.entities.remove(&id)
    }

    /// Returns a reference to an entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity by ID.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns `true` if an entity with this ID exists.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// IDs of every entity belonging to all of `groups`, in ascending order.
    #[must_use]
    pub fn ids_in(&self, groups: SpriteGroups) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|entity| entity.in_groups(groups))
            .map(Entity::id)
            .collect()
    }

    /// Hitboxes of every entity belonging to all of `groups`.
    #[must_use]
    pub fn hitboxes_in(&self, groups: SpriteGroups) -> Vec<Rect> {
        self.entities
            .values()
            .filter(|entity| entity.in_groups(groups))
            .map(HasHitbox::hitbox)
            .collect()
    }

    /// Returns an iterator over entity IDs in ascending order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Returns an iterator over entities in ascending ID order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns an iterator over mutable entities in ascending ID order.
    pub fn entities_sorted_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut()
    }

    /// Marks an entity for removal at the next [`Arena::flush_removals`].
    ///
    /// Returns `true` if the entity exists and was not already queued.
    pub fn queue_removal(&mut self, id: EntityId) -> bool {
        self.entities.contains_key(&id) && self.pending_removal.insert(id)
    }

    /// Returns `true` if the entity is queued for removal.
    #[must_use]
    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending_removal.contains(&id)
    }

    /// Removes every queued entity.
    ///
    /// # Returns
    ///
    /// The removed entities in ascending ID order.
    pub fn flush_removals(&mut self) -> Vec<Entity> {
        let pending = std::mem::take(&mut self.pending_removal);
        pending
            .into_iter()
            .filter_map(|id| self.entities.remove(&id))
            .collect()
    }

    /// Returns the number of entities in the arena.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the arena has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
