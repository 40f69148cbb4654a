//! Combat resolver for player attacks.
//!
//! The `CombatResolver` handles:
//! - Hit detection: attack hitboxes against attackable targets
//! - Scenery destruction: grass is cut instead of damaged
//! - Enemy damage: routed through [`Enemy::take_damage`](crate::actor::Enemy::take_damage),
//!   which applies the invincibility window and knockback
//!
//! # Hit Order
//!
//! Attack hitboxes and targets are both visited in ascending ID order. A
//! target is hit at most once per pass, by the lowest-ID attack hitbox that
//! overlaps it, even when several hitboxes (the five flames of one cast, say)
//! cover it.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::actor::{Actor, Player};
use crate::arena::Arena;
use crate::body::HasHitbox;
use crate::entity::{AttackKind, EntityId, SpriteGroups};
use crate::event::{Event, EventLog};
use crate::gate::Timestamp;

/// How far above a cut grass tile's center the leaf particles spawn.
const LEAF_OFFSET: Vec2 = Vec2::new(0.0, 75.0);

/// The attacker's numbers for one combat pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerProfile {
    /// Attacker center; knockback points away from it
    pub center: Vec2,
    /// Damage dealt by weapon hitboxes
    pub weapon_damage: f32,
    /// Damage dealt by magic hitboxes
    pub magic_damage: f32,
}

impl AttackerProfile {
    /// Captures the player's current position and damage values.
    #[must_use]
    pub fn of(player: &Player) -> Self {
        Self {
            center: player.body().center(),
            weapon_damage: player.damage_for(AttackKind::Weapon),
            magic_damage: player.damage_for(AttackKind::Magic),
        }
    }

    /// Damage for a hit of the given kind.
    #[must_use]
    pub const fn damage(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Weapon => self.weapon_damage,
            AttackKind::Magic => self.magic_damage,
        }
    }
}

/// An attack hitbox overlapping an attackable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// The attack hitbox
    pub attack: EntityId,
    /// The target it overlaps
    pub target: EntityId,
    /// Damage source of the hitbox
    pub kind: AttackKind,
}

/// Resolver for player attacks against scenery and enemies.
///
/// # Example
///
/// ```
/// use tileblade_core::arena::Arena;
/// use tileblade_core::entity::{AttackHitbox, EntityInner, Tile, TileKind};
/// use tileblade_core::geometry::Rect;
/// use tileblade_core::resolver::CombatResolver;
/// use glam::Vec2;
///
/// let mut arena = Arena::new();
/// let grass = arena.spawn(EntityInner::Tile(Tile::new(
///     TileKind::Grass, Vec2::ZERO, 64.0, Vec2::new(-2.0, -10.0),
/// )));
/// arena.spawn(EntityInner::Attack(AttackHitbox::weapon(Rect::new(10.0, 10.0, 16.0, 40.0))));
///
/// let hits = CombatResolver::new().find_hits(&arena);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].target, grass);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a new combat resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Finds every hit of this pass, at most one per target.
    ///
    /// Entities already queued for removal neither hit nor get hit.
    #[must_use]
    pub fn find_hits(&self, arena: &Arena) -> Vec<Hit> {
        let targets = arena.ids_in(SpriteGroups::ATTACKABLE);
        let mut struck = BTreeSet::new();
        let mut hits = Vec::new();

        for attack_id in arena.ids_in(SpriteGroups::ATTACK) {
            if arena.is_pending_removal(attack_id) {
                continue;
            }
            let Some(attack) = arena.get(attack_id).and_then(|e| e.as_attack()) else {
                continue;
            };
            let area = attack.hitbox();

            for &target_id in &targets {
                if struck.contains(&target_id) || arena.is_pending_removal(target_id) {
                    continue;
                }
                let Some(target) = arena.get(target_id) else {
                    continue;
                };
                if area.intersects(&target.hitbox()) {
                    struck.insert(target_id);
                    hits.push(Hit {
                        attack: attack_id,
                        target: target_id,
                        kind: attack.kind(),
                    });
                }
            }
        }
        hits
    }

    /// Applies this pass's hits.
    ///
    /// Grass is queued for removal with a [`Event::GrassCut`]; enemies take
    /// damage and emit [`Event::EnemyHit`] when the hit lands. The caller
    /// flushes removals afterwards.
    ///
    /// # Returns
    ///
    /// The number of hits that had an effect.
    pub fn resolve<R: Rng>(
        &self,
        arena: &mut Arena,
        attacker: &AttackerProfile,
        now: Timestamp,
        rng: &mut R,
        events: &mut EventLog,
    ) -> usize {
        let mut applied = 0;

        for hit in self.find_hits(arena) {
            let Some(target) = arena.get_mut(hit.target) else {
                continue;
            };

            if let Some(tile) = target.as_tile() {
                if !tile.is_breakable() {
                    continue;
                }
                let position = tile.bounds().center() - LEAF_OFFSET;
                let leaves: u8 = rng.gen_range(3..=6);
                arena.queue_removal(hit.target);
                debug!(tile = %hit.target, leaves, "grass cut");
                events.push(Event::GrassCut {
                    tile: hit.target,
                    position,
                    leaves,
                });
                applied += 1;
            } else if let Some(enemy) = target.as_enemy_mut() {
                let damage = attacker.damage(hit.kind);
                if enemy.take_damage(hit.kind, damage, attacker.center, now) {
                    events.push(Event::EnemyHit {
                        enemy: hit.target,
                        kind: hit.kind,
                        damage,
                        health: enemy.health(),
                    });
                    applied += 1;
                } else {
                    trace!(enemy = %hit.target, "hit ignored, enemy invincible");
                }
            }
        }
        applied
    }
}
