//! Simulation module with the 6-phase frame loop.
//!
//! The `Simulation` owns a level: the arena of entities, the event log and the
//! random number generator. Each call to [`Simulation::step`] runs one frame:
//!
//! 1. **DECIDE**: The player reads its input; every enemy picks a status and
//!    may strike the player
//! 2. **MOVE**: Every actor snapshots its body and moves speculatively
//! 3. **COLLIDE**: Actors overlapping an obstacle are reverted to the snapshot
//! 4. **COMBAT**: Attack hitboxes hit attackable targets; removals are flushed
//! 5. **COOL DOWN**: Gates advance, energy regenerates, animations advance,
//!    expired hitboxes are queued for removal
//! 6. **DEATH SWEEP**: Dead enemies are removed and their exp credited;
//!    removals are flushed
//!
//! # Time
//!
//! The simulation never reads a clock. The driver passes a monotonic
//! millisecond timestamp to every step and that single `now` is threaded into
//! every gate.
//!
//! # Determinism
//!
//! Entities are visited in ascending ID order and all randomness comes from a
//! `ChaCha8Rng` seeded at construction, so the same seed, spawns and inputs
//! produce the same event stream.
//!
//! # Example
//!
//! ```
//! use tileblade_core::actor::{Actor, EnemyKind, PlayerInput};
//! use tileblade_core::config::GameConfig;
//! use tileblade_core::entity::TileKind;
//! use tileblade_core::simulation::Simulation;
//! use glam::Vec2;
//!
//! let mut sim = Simulation::new(GameConfig::default(), 42).unwrap();
//! sim.spawn_player(Vec2::new(128.0, 128.0)).unwrap();
//! sim.spawn_enemy(EnemyKind::Bamboo, Vec2::new(640.0, 128.0)).unwrap();
//! sim.spawn_tile(TileKind::Boundary, Vec2::new(0.0, 0.0));
//!
//! for frame in 0..10 {
//!     sim.step(frame * 16, &PlayerInput::moving(1, 0));
//! }
//!
//! assert_eq!(sim.frame(), 10);
//! assert!(sim.player().unwrap().body().position().x > 128.0);
//! ```

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use crate::actor::{Actor, Enemy, EnemyKind, MagicCast, Player, PlayerInput};
use crate::arena::Arena;
use crate::config::{GameConfig, MagicStyle};
use crate::entity::{AttackHitbox, Entity, EntityId, EntityInner, SpriteGroups, Tile, TileKind};
use crate::error::{ActionError, ActionResult, ConfigResult};
use crate::event::{Event, EventLog};
use crate::gate::Timestamp;
use crate::geometry::Rect;
use crate::resolver::{AttackerProfile, CollisionResolver, CombatResolver};

/// Number of flame hitboxes spawned by one flame cast.
pub const FLAME_COUNT: u16 = 5;

// =============================================================================
// Simulation
// =============================================================================

/// A running level.
///
/// `Simulation` manages:
/// - The arena holding the player, enemies, tiles and attack hitboxes
/// - The event log drained by the driver
/// - The seeded RNG used for leaf counts and flame placement
/// - The handles of the player and of the active weapon hitbox
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    arena: Arena,
    events: EventLog,
    rng: ChaCha8Rng,
    seed: u64,
    frame: u64,
    player: Option<EntityId>,
    weapon_hitbox: Option<EntityId>,
    collision: CollisionResolver,
    combat: CombatResolver,
}

impl Simulation {
    /// Creates an empty level.
    ///
    /// # Arguments
    ///
    /// * `config` - Static tables; validated before use
    /// * `seed` - Seed for the level's RNG
    ///
    /// # Errors
    ///
    /// Returns the first problem [`GameConfig::validate`] finds.
    pub fn new(config: GameConfig, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            arena: Arena::new(),
            events: EventLog::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            frame: 0,
            player: None,
            weapon_hitbox: None,
            collision: CollisionResolver::new(),
            combat: CombatResolver::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------------

    /// Spawns the player with its bounds' top-left corner at `position`.
    ///
    /// A level has one player; spawning another replaces the previous one
    /// and retracts its weapon hitbox.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if a catalogue is
    /// empty.
    pub fn spawn_player(&mut self, position: Vec2) -> ConfigResult<EntityId> {
        let player = Player::new(position, &self.config)?;
        if let Some(previous) = self.player.take() {
            warn!(player = %previous, "replacing existing player");
            self.arena.despawn(previous);
            self.retract_weapon_hitbox();
        }
        let id = self.arena.spawn(EntityInner::Player(player));
        self.player = Some(id);
        debug!(player = %id, x = position.x, y = position.y, "spawned player");
        Ok(id)
    }

    /// Spawns an enemy with its bounds' top-left corner at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnemy`](crate::error::ConfigError::MissingEnemy)
    /// if the config has no stats for `kind`.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec2) -> ConfigResult<EntityId> {
        let enemy = Enemy::new(kind, position, &self.config)?;
        let id = self.arena.spawn(EntityInner::Enemy(enemy));
        debug!(enemy = %id, %kind, x = position.x, y = position.y, "spawned enemy");
        Ok(id)
    }

    /// Spawns a tile anchored at the grid cell whose top-left corner is `cell`.
    pub fn spawn_tile(&mut self, kind: TileKind, cell: Vec2) -> EntityId {
        let tile = Tile::new(kind, cell, self.config.tile_size, self.config.hitboxes.tile);
        let id = self.arena.spawn(EntityInner::Tile(tile));
        trace!(tile = %id, ?kind, "spawned tile");
        id
    }

    /// Removes an entity immediately.
    ///
    /// Despawning the player also retracts its weapon hitbox.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownEntity`] if no entity has this ID.
    pub fn despawn(&mut self, id: EntityId) -> ActionResult<Entity> {
        let entity = self
            .arena
            .despawn(id)
            .ok_or(ActionError::UnknownEntity(id))?;
        if self.player == Some(id) {
            self.player = None;
            self.retract_weapon_hitbox();
        }
        if self.weapon_hitbox == Some(id) {
            self.weapon_hitbox = None;
        }
        Ok(entity)
    }

    /// Removes the active weapon hitbox, if any, and reports the attack as
    /// ended.
    fn retract_weapon_hitbox(&mut self) {
        if let Some(hitbox) = self.weapon_hitbox.take() {
            self.arena.despawn(hitbox);
            debug!(%hitbox, "weapon hitbox retracted with its player");
            self.events.push(Event::AttackEnded { hitbox });
        }
    }

    // -------------------------------------------------------------------------
    // Frame loop
    // -------------------------------------------------------------------------

    /// Runs one frame at time `now`.
    ///
    /// Events returned by the previous step are dropped from the buffer
    /// first.
    ///
    /// # Returns
    ///
    /// The events emitted during this frame, preceded by any emitted by
    /// driver calls (such as [`Simulation::despawn`]) since the last step.
    pub fn step(&mut self, now: Timestamp, input: &PlayerInput) -> &[Event] {
        self.events.begin_frame();
        self.frame += 1;

        let Some(player_id) = self.player.filter(|id| self.arena.contains(*id)) else {
            warn!(frame = self.frame, "step without a player");
            return self.events.deliver();
        };
        trace!(frame = self.frame, now, "step");

        // PHASE 1: DECIDE
        self.decide_player(input, now);
        self.decide_enemies(player_id, now);

        // PHASE 2: MOVE
        for entity in self.arena.entities_sorted_mut() {
            match entity.inner_mut() {
                EntityInner::Player(player) => player.move_speculatively(now),
                EntityInner::Enemy(enemy) => enemy.move_speculatively(now),
                EntityInner::Tile(_) | EntityInner::Attack(_) => {}
            }
        }

        // PHASE 3: COLLIDE
        self.resolve_collisions();

        // PHASE 4: COMBAT
        if let Some(attacker) = self.player().map(AttackerProfile::of) {
            let applied =
                self.combat
                    .resolve(&mut self.arena, &attacker, now, &mut self.rng, &mut self.events);
            trace!(applied, "combat pass");
        }
        self.arena.flush_removals();

        // PHASE 5: COOL DOWN
        self.cool_down(now);

        // PHASE 6: DEATH SWEEP
        self.sweep_dead();
        self.arena.flush_removals();

        self.events.deliver()
    }

    fn decide_player(&mut self, input: &PlayerInput, now: Timestamp) {
        let Some(actions) = self.player_mut().map(|player| player.tick(input, now)) else {
            return;
        };

        if actions.weapon_switched {
            if let Some(event) = self.player().map(|p| Event::WeaponSwitched {
                index: p.weapon_index(),
                name: p.weapon().name.clone(),
            }) {
                self.events.push(event);
            }
        }
        if actions.magic_switched {
            if let Some(event) = self.player().map(|p| Event::MagicSwitched {
                index: p.magic_index(),
                name: p.spell().name.clone(),
            }) {
                self.events.push(event);
            }
        }

        if let Some(rect) = actions.weapon_attack {
            self.start_weapon_attack(rect);
        }

        match actions.cast {
            Some(Ok(cast)) => self.apply_magic(cast, now),
            Some(Err(ActionError::InsufficientEnergy {
                required,
                available,
            })) => {
                let spell = self
                    .player()
                    .map(|p| p.spell().name.clone())
                    .unwrap_or_default();
                debug!(%spell, required, available, "cast rejected");
                self.events.push(Event::MagicRejected {
                    spell,
                    required,
                    available,
                });
            }
            Some(Err(err)) => warn!(%err, "cast failed"),
            None => {}
        }
    }

    fn start_weapon_attack(&mut self, rect: Rect) {
        if let Some(stale) = self.weapon_hitbox.take() {
            self.arena.despawn(stale);
        }
        let hitbox = self
            .arena
            .spawn(EntityInner::Attack(AttackHitbox::weapon(rect)));
        self.weapon_hitbox = Some(hitbox);

        let weapon = self
            .player()
            .map(|p| p.weapon().name.clone())
            .unwrap_or_default();
        self.events.push(Event::AttackStarted { weapon, hitbox });
    }

    fn apply_magic(&mut self, cast: MagicCast, now: Timestamp) {
        debug!(spell = %cast.spell, cost = cast.cost, "magic cast");
        let style = cast.style;
        let strength = cast.strength;
        self.events.push(Event::MagicCast {
            spell: cast.spell,
            style: cast.style,
            strength: cast.strength,
            cost: cast.cost,
        });

        match style {
            MagicStyle::Heal => {
                let Some(player) = self.player_mut() else {
                    return;
                };
                let amount = player.heal(strength);
                let event = Event::PlayerHealed {
                    amount,
                    health: player.health(),
                    position: player.body().center(),
                };
                self.events.push(event);
            }
            MagicStyle::Flame => self.spawn_flames(now),
        }
    }

    /// Spawns a line of flame hitboxes, one tile apart, ahead of the player.
    fn spawn_flames(&mut self, now: Timestamp) {
        let Some((center, heading)) = self
            .player()
            .map(|p| (p.body().center(), p.facing().vector()))
        else {
            return;
        };
        let tile = self.config.tile_size;
        let jitter = tile / 3.0;
        let lifetime = self.config.timings.flame_lifetime;

        for step in 1..=FLAME_COUNT {
            let offset = heading * (f32::from(step) * tile);
            let scatter = Vec2::new(
                self.rng.gen_range(-jitter..=jitter),
                self.rng.gen_range(-jitter..=jitter),
            );
            let rect = Rect::from_center(center + offset + scatter, Vec2::splat(tile));
            self.arena
                .spawn(EntityInner::Attack(AttackHitbox::magic(rect, lifetime, now)));
        }
    }

    fn decide_enemies(&mut self, player_id: EntityId, now: Timestamp) {
        let Some(target) = self.player().map(|p| p.body().center()) else {
            return;
        };

        for id in self.enemy_ids() {
            let Some(enemy) = self.arena.get_mut(id).and_then(Entity::as_enemy_mut) else {
                continue;
            };
            let Some(strike) = enemy.tick(&target, now) else {
                continue;
            };
            debug!(enemy = %id, damage = strike.damage, attack_type = %strike.attack_type, "enemy strike");

            let Some(player) = self.arena.get_mut(player_id).and_then(Entity::as_player_mut) else {
                continue;
            };
            if player.receive_strike(strike.damage, now) {
                let event = Event::PlayerDamaged {
                    source: id,
                    amount: strike.damage,
                    attack_type: strike.attack_type,
                    position: player.body().center(),
                    health: player.health(),
                };
                self.events.push(event);
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let obstacles = self.arena.hitboxes_in(SpriteGroups::OBSTACLE);
        let collision = self.collision;

        for entity in self.arena.entities_sorted_mut() {
            let id = entity.id();
            let reverted = match entity.inner_mut() {
                EntityInner::Player(player) => collision.resolve(player.body_mut(), &obstacles),
                EntityInner::Enemy(enemy) => collision.resolve(enemy.body_mut(), &obstacles),
                EntityInner::Tile(_) | EntityInner::Attack(_) => false,
            };
            if reverted {
                trace!(entity = %id, "movement reverted");
            }
        }
    }

    fn cool_down(&mut self, now: Timestamp) {
        let attack_ended = self.player_mut().is_some_and(|player| {
            let ended = player.cool_down(now);
            player.recover_energy();
            player.animate();
            ended
        });
        if attack_ended {
            if let Some(hitbox) = self.weapon_hitbox.take() {
                self.arena.queue_removal(hitbox);
                self.events.push(Event::AttackEnded { hitbox });
            }
        }

        let mut expired = Vec::new();
        for entity in self.arena.entities_sorted_mut() {
            let id = entity.id();
            match entity.inner_mut() {
                EntityInner::Enemy(enemy) => {
                    enemy.cool_down(now);
                    enemy.animate();
                }
                EntityInner::Attack(attack) => {
                    if attack.tick(now) {
                        expired.push(id);
                    }
                }
                EntityInner::Player(_) | EntityInner::Tile(_) => {}
            }
        }
        for id in expired {
            self.arena.queue_removal(id);
        }
    }

    fn sweep_dead(&mut self) {
        let dead: Vec<_> = self
            .arena
            .entities_sorted()
            .filter_map(|entity| {
                let enemy = entity.as_enemy().filter(|enemy| enemy.is_dead())?;
                Some((entity.id(), enemy.kind(), enemy.body().center(), enemy.exp()))
            })
            .collect();

        for (id, kind, position, exp) in dead {
            if !self.arena.queue_removal(id) {
                continue;
            }
            if let Some(player) = self.player_mut() {
                player.gain_exp(exp);
            }
            debug!(enemy = %id, %kind, exp, "enemy died");
            self.events.push(Event::EnemyDied {
                enemy: id,
                kind,
                position,
                exp,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Drains the buffer: the last step's events plus any emitted since.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    /// The last step's events plus any emitted since, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    /// Returns a reference to the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Returns a mutable reference to the arena, for test setup.
    #[must_use]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Handle of the player, if one is spawned.
    #[must_use]
    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// The player, if one is spawned.
    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.player
            .and_then(|id| self.arena.get(id))
            .and_then(Entity::as_player)
    }

    fn player_mut(&mut self) -> Option<&mut Player> {
        self.player
            .and_then(|id| self.arena.get_mut(id))
            .and_then(Entity::as_player_mut)
    }

    /// Looks up an enemy.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnknownEntity`] if `id` is not a live enemy.
    pub fn enemy(&self, id: EntityId) -> ActionResult<&Enemy> {
        self.arena
            .get(id)
            .and_then(Entity::as_enemy)
            .ok_or(ActionError::UnknownEntity(id))
    }

    /// IDs of every live enemy, ascending.
    #[must_use]
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.arena
            .entities_sorted()
            .filter(|entity| entity.is_enemy())
            .map(Entity::id)
            .collect()
    }

    /// Handle of the active weapon hitbox, if an attack is in progress.
    #[must_use]
    pub fn weapon_hitbox(&self) -> Option<EntityId> {
        self.weapon_hitbox
    }

    /// The static tables this level runs on.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The RNG seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of frames stepped so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(GameConfig::default(), 7).unwrap()
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn new_simulation_is_empty() {
            let sim = sim();
            assert!(sim.arena().is_empty());
            assert_eq!(sim.frame(), 0);
            assert_eq!(sim.seed(), 7);
            assert!(sim.player().is_none());
        }

        #[test]
        fn invalid_config_is_rejected() {
            let mut config = GameConfig::default();
            config.spells.clear();
            assert!(Simulation::new(config, 0).is_err());
        }

        #[test]
        fn replacing_player_retracts_weapon_hitbox() {
            let mut sim = sim();
            sim.spawn_player(Vec2::new(64.0, 64.0)).unwrap();
            let attack = PlayerInput {
                attack: true,
                ..PlayerInput::default()
            };
            sim.step(0, &attack);
            let hitbox = sim.weapon_hitbox().unwrap();

            sim.spawn_player(Vec2::new(640.0, 640.0)).unwrap();
            assert!(!sim.arena().contains(hitbox));
            assert!(sim.weapon_hitbox().is_none());
            assert!(sim.events().contains(&Event::AttackEnded { hitbox }));

            // grass under the old swing
            let grass = sim.spawn_tile(TileKind::Grass, Vec2::new(64.0, 128.0));
            let mut cut = false;
            for frame in 1..=200 {
                cut |= sim
                    .step(frame * 16, &PlayerInput::default())
                    .iter()
                    .any(|event| matches!(event, Event::GrassCut { .. }));
            }
            assert!(!cut);
            assert!(sim.arena().contains(grass));
        }

        #[test]
        fn despawning_player_retracts_weapon_hitbox() {
            let mut sim = sim();
            let player = sim.spawn_player(Vec2::ZERO).unwrap();
            let attack = PlayerInput {
                attack: true,
                ..PlayerInput::default()
            };
            sim.step(0, &attack);
            let hitbox = sim.weapon_hitbox().unwrap();

            sim.despawn(player).unwrap();
            assert!(!sim.arena().contains(hitbox));
            assert!(sim.weapon_hitbox().is_none());
            assert!(sim.arena().is_empty());

            let events = sim.step(16, &PlayerInput::default()).to_vec();
            assert_eq!(events, vec![Event::AttackEnded { hitbox }]);
        }

        #[test]
        fn respawning_player_replaces_it() {
            let mut sim = sim();
            let first = sim.spawn_player(Vec2::ZERO).unwrap();
            let second = sim.spawn_player(Vec2::new(64.0, 0.0)).unwrap();

            assert!(sim.arena().get(first).is_none());
            assert_eq!(sim.player_id(), Some(second));
            assert_eq!(sim.arena().entity_count(), 1);
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn step_without_player_only_counts_frames() {
            let mut sim = sim();
            sim.spawn_enemy(EnemyKind::Squid, Vec2::ZERO).unwrap();
            assert!(sim.step(0, &PlayerInput::default()).is_empty());
            assert_eq!(sim.frame(), 1);
        }

        #[test]
        fn step_returns_only_this_frames_events() {
            let mut sim = sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            let switch = PlayerInput {
                switch_weapon: true,
                ..PlayerInput::default()
            };

            assert_eq!(sim.step(0, &switch).len(), 1);
            assert_eq!(sim.events().len(), 1);
            assert!(sim.step(16, &PlayerInput::default()).is_empty());
            assert!(sim.events().is_empty());
        }

        #[test]
        fn take_events_drains_last_step() {
            let mut sim = sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            let switch = PlayerInput {
                switch_magic: true,
                ..PlayerInput::default()
            };

            sim.step(0, &switch);
            assert_eq!(sim.take_events().len(), 1);
            assert!(sim.events().is_empty());
            assert!(sim.step(16, &PlayerInput::default()).is_empty());
        }

        #[test]
        fn event_buffer_stays_bounded_without_draining() {
            let mut sim = sim();
            sim.spawn_player(Vec2::ZERO).unwrap();
            let switch = PlayerInput {
                switch_weapon: true,
                ..PlayerInput::default()
            };

            let mut emitted = 0;
            for frame in 0..10_000 {
                emitted += sim.step(frame * 16, &switch).len();
                assert!(sim.events().len() <= 1);
            }
            assert!(emitted > 500);
        }

        #[test]
        fn unknown_entity_lookups_fail() {
            let mut sim = sim();
            let tile = sim.spawn_tile(TileKind::Grass, Vec2::ZERO);

            assert_eq!(sim.enemy(tile).unwrap_err(), ActionError::UnknownEntity(tile));
            sim.despawn(tile).unwrap();
            assert!(matches!(sim.despawn(tile), Err(ActionError::UnknownEntity(_))));
        }
    }
}
