//! Entity storage types.
//!
//! This module provides the types the [`Arena`](crate::arena::Arena) stores:
//! - [`EntityId`]: Stable handle for an entity
//! - [`EntityTag`]: Kind classification
//! - [`SpriteGroups`]: Which collections (obstacles, attackables, ...) an entity belongs to
//! - [`EntityInner`]: Type-safe storage for the kind-specific state
//! - [`Entity`]: The complete entity container
//!
//! # Groups
//!
//! Group membership is a set of flags on the entity rather than separate
//! collections. Removing an entity from the arena therefore removes it from
//! every group at once.
//!
//! # Example
//!
//! ```
//! use tileblade_core::entity::{Entity, EntityId, EntityInner, SpriteGroups, Tile, TileKind};
//! use glam::Vec2;
//!
//! let grass = Tile::new(TileKind::Grass, Vec2::ZERO, 64.0, Vec2::new(-2.0, -10.0));
//! let entity = Entity::new(EntityId::new(7), EntityInner::Tile(grass));
//!
//! assert!(entity.groups().contains(SpriteGroups::ATTACKABLE | SpriteGroups::OBSTACLE));
//! assert!(entity.is_tile());
//! ```

pub mod components;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actor::{Actor, Enemy, Player};
use crate::body::HasHitbox;
use crate::geometry::Rect;

pub use components::{AttackHitbox, AttackKind, Tile, TileKind};

/// Stable identifier for an entity.
///
/// IDs are assigned monotonically by the arena and never reused, so a stale
/// handle simply fails to resolve after its entity is removed.
///
/// # Example
///
/// ```
/// use tileblade_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Entity kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// The player character
    Player,
    /// A hostile creature
    Enemy,
    /// A static map tile
    Tile,
    /// An active player attack area
    Attack,
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Tile => write!(f, "Tile"),
            Self::Attack => write!(f, "Attack"),
        }
    }
}

bitflags! {
    /// Collections an entity is a member of.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SpriteGroups: u8 {
        /// Drawn by the renderer
        const VISIBLE = 1 << 0;
        /// Blocks movement
        const OBSTACLE = 1 << 1;
        /// Can be hit by player attacks
        const ATTACKABLE = 1 << 2;
        /// Is a player attack area
        const ATTACK = 1 << 3;
    }
}

/// Type-safe storage for kind-specific state.
#[derive(Debug, Clone)]
pub enum EntityInner {
    /// Player state machine
    Player(Player),
    /// Enemy state machine
    Enemy(Enemy),
    /// Map tile
    Tile(Tile),
    /// Attack hitbox
    Attack(AttackHitbox),
}

impl EntityInner {
    /// Returns the tag matching this variant.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Player(_) => EntityTag::Player,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Tile(_) => EntityTag::Tile,
            Self::Attack(_) => EntityTag::Attack,
        }
    }

    /// Default group membership for this variant.
    ///
    /// Boundary tiles are invisible; grass is the only attackable scenery.
    #[must_use]
    pub const fn default_groups(&self) -> SpriteGroups {
        match self {
            Self::Player(_) => SpriteGroups::VISIBLE,
            Self::Enemy(_) => SpriteGroups::VISIBLE.union(SpriteGroups::ATTACKABLE),
            Self::Tile(tile) => match tile.kind() {
                TileKind::Boundary => SpriteGroups::OBSTACLE,
                TileKind::Grass => SpriteGroups::VISIBLE
                    .union(SpriteGroups::OBSTACLE)
                    .union(SpriteGroups::ATTACKABLE),
                TileKind::Object => SpriteGroups::VISIBLE.union(SpriteGroups::OBSTACLE),
            },
            Self::Attack(_) => SpriteGroups::VISIBLE.union(SpriteGroups::ATTACK),
        }
    }

    /// Returns a reference to the player state, if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&Player> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Returns a mutable reference to the player state, if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Returns a reference to the enemy state, if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Self::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    /// Returns a mutable reference to the enemy state, if this is an enemy.
    #[must_use]
    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match self {
            Self::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    /// Returns a reference to the tile, if this is a tile.
    #[must_use]
    pub const fn as_tile(&self) -> Option<&Tile> {
        match self {
            Self::Tile(tile) => Some(tile),
            _ => None,
        }
    }

    /// Returns a reference to the attack hitbox, if this is one.
    #[must_use]
    pub const fn as_attack(&self) -> Option<&AttackHitbox> {
        match self {
            Self::Attack(attack) => Some(attack),
            _ => None,
        }
    }

    /// Returns a mutable reference to the attack hitbox, if this is one.
    #[must_use]
    pub fn as_attack_mut(&mut self) -> Option<&mut AttackHitbox> {
        match self {
            Self::Attack(attack) => Some(attack),
            _ => None,
        }
    }
}

impl HasHitbox for EntityInner {
    fn hitbox(&self) -> Rect {
        match self {
            Self::Player(player) => player.body().hitbox(),
            Self::Enemy(enemy) => enemy.body().hitbox(),
            Self::Tile(tile) => tile.hitbox(),
            Self::Attack(attack) => attack.hitbox(),
        }
    }
}

/// A stored entity: handle, kind, group membership and state.
///
/// # Invariants
///
/// - The `EntityId` is unique within an arena
/// - The tag always matches the `EntityInner` variant
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tag: EntityTag,
    groups: SpriteGroups,
    inner: EntityInner,
}

impl Entity {
    /// Creates an entity with the default groups for its variant.
    #[must_use]
    pub const fn new(id: EntityId, inner: EntityInner) -> Self {
        let groups = inner.default_groups();
        Self::with_groups(id, inner, groups)
    }

    /// Creates an entity with explicit group membership.
    #[must_use]
    pub const fn with_groups(id: EntityId, inner: EntityInner, groups: SpriteGroups) -> Self {
        Self {
            id,
            tag: inner.tag(),
            groups,
            inner,
        }
    }

    /// Returns the entity's handle.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's kind.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    /// Returns the groups this entity belongs to.
    #[must_use]
    pub const fn groups(&self) -> SpriteGroups {
        self.groups
    }

    /// Returns `true` if the entity belongs to every group in `groups`.
    #[must_use]
    pub const fn in_groups(&self, groups: SpriteGroups) -> bool {
        self.groups.contains(groups)
    }

    /// Returns a reference to the kind-specific state.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns a mutable reference to the kind-specific state.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Returns `true` if this entity is the player.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.tag, EntityTag::Player)
    }

    /// Returns `true` if this entity is an enemy.
    #[must_use]
    pub const fn is_enemy(&self) -> bool {
        matches!(self.tag, EntityTag::Enemy)
    }

    /// Returns `true` if this entity is a tile.
    #[must_use]
    pub const fn is_tile(&self) -> bool {
        matches!(self.tag, EntityTag::Tile)
    }

    /// Returns the player state if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&Player> {
        self.inner.as_player()
    }

    /// Returns mutable player state if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        self.inner.as_player_mut()
    }

    /// Returns the enemy state if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&Enemy> {
        self.inner.as_enemy()
    }

    /// Returns mutable enemy state if this is an enemy.
    #[must_use]
    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        self.inner.as_enemy_mut()
    }

    /// Returns the tile if this is a tile.
    #[must_use]
    pub const fn as_tile(&self) -> Option<&Tile> {
        self.inner.as_tile()
    }

    /// Returns the attack hitbox if this is one.
    #[must_use]
    pub const fn as_attack(&self) -> Option<&AttackHitbox> {
        self.inner.as_attack()
    }

    /// Returns the mutable attack hitbox if this is one.
    #[must_use]
    pub fn as_attack_mut(&mut self) -> Option<&mut AttackHitbox> {
        self.inner.as_attack_mut()
    }
}

impl HasHitbox for Entity {
    fn hitbox(&self) -> Rect {
        self.inner.hitbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn tile(kind: TileKind) -> EntityInner {
        EntityInner::Tile(Tile::new(kind, Vec2::ZERO, 64.0, Vec2::new(-2.0, -10.0)))
    }

    mod entity_id_tests {
        use super::*;

        #[test]
        fn ordering() {
            let mut ids = vec![EntityId::new(3), EntityId::new(1), EntityId::new(2)];
            ids.sort();
            assert_eq!(ids, vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]);
        }

        #[test]
        fn debug_and_display_format() {
            let id = EntityId::new(42);
            assert_eq!(format!("{id:?}"), "EntityId(42)");
            assert_eq!(format!("{id}"), "42");
        }

        #[test]
        fn u64_conversions() {
            let id: EntityId = 42u64.into();
            let raw: u64 = id.into();
            assert_eq!(raw, 42);
        }
    }

    mod group_tests {
        use super::*;

        #[test]
        fn boundary_is_invisible_obstacle() {
            let groups = tile(TileKind::Boundary).default_groups();
            assert_eq!(groups, SpriteGroups::OBSTACLE);
        }

        #[test]
        fn grass_is_attackable_obstacle() {
            let groups = tile(TileKind::Grass).default_groups();
            assert!(groups.contains(SpriteGroups::OBSTACLE | SpriteGroups::ATTACKABLE));
            assert!(groups.contains(SpriteGroups::VISIBLE));
        }

        #[test]
        fn object_is_not_attackable() {
            let groups = tile(TileKind::Object).default_groups();
            assert!(!groups.contains(SpriteGroups::ATTACKABLE));
        }

        #[test]
        fn attack_hitbox_is_never_an_obstacle() {
            let inner = EntityInner::Attack(AttackHitbox::weapon(Rect::new(0.0, 0.0, 8.0, 8.0)));
            let groups = inner.default_groups();
            assert!(groups.contains(SpriteGroups::ATTACK));
            assert!(!groups.contains(SpriteGroups::OBSTACLE));
        }
    }

    mod entity_tests {
        use super::*;

        #[test]
        fn tag_follows_inner() {
            let entity = Entity::new(EntityId::new(1), tile(TileKind::Grass));
            assert_eq!(entity.tag(), EntityTag::Tile);
            assert!(entity.is_tile());
            assert!(!entity.is_enemy());
        }

        #[test]
        fn accessors_match_variant() {
            let mut entity = Entity::new(EntityId::new(1), tile(TileKind::Grass));
            assert!(entity.as_tile().is_some());
            assert!(entity.as_enemy().is_none());
            assert!(entity.as_attack_mut().is_none());
        }

        #[test]
        fn actors_report_their_body_hitbox() {
            use crate::actor::EnemyKind;
            use crate::config::GameConfig;

            let config = GameConfig::default();
            let player = Player::new(Vec2::new(64.0, 64.0), &config).unwrap();
            let enemy = Enemy::new(EnemyKind::Squid, Vec2::new(192.0, 64.0), &config).unwrap();
            let player_hitbox = player.body().hitbox();
            let enemy_hitbox = enemy.body().hitbox();

            let player = Entity::new(EntityId::new(1), EntityInner::Player(player));
            let enemy = Entity::new(EntityId::new(2), EntityInner::Enemy(enemy));
            assert_eq!(player.hitbox(), player_hitbox);
            assert_eq!(enemy.hitbox(), enemy_hitbox);
            assert!(player_hitbox.height < 64.0);
        }

        #[test]
        fn explicit_groups_override_defaults() {
            let entity = Entity::with_groups(
                EntityId::new(1),
                tile(TileKind::Grass),
                SpriteGroups::VISIBLE,
            );
            assert!(!entity.in_groups(SpriteGroups::OBSTACLE));
        }
    }
}
