//! Enemy state machine.
//!
//! Each frame an enemy measures the distance to the player and picks one of
//! three states:
//!
//! | Condition                                   | Status   | Direction         |
//! |---------------------------------------------|----------|-------------------|
//! | `distance <= attack_radius` and gate ready  | `Attack` | zero              |
//! | `distance <= notice_radius`                 | `Move`   | towards player    |
//! | otherwise                                   | `Idle`   | zero              |
//!
//! The attack check runs first, so an enemy whose attack radius exceeds its
//! notice radius still attacks. Entering `Attack` triggers the attack gate and
//! produces a single [`Strike`]; the gate stays closed for the enemy attack
//! cooldown, so the next frame falls through to `Move` or `Idle`.
//!
//! # Knockback
//!
//! A successful hit closes the invincibility gate and records a knockback
//! direction pointing away from the attacker. Until the gate reopens the enemy
//! ignores its AI direction and recoils along the knockback at
//! `speed * resistance`, decaying linearly to zero.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::AnimationCursor;
use crate::body::SpatialBody;
use crate::config::{EnemyStats, GameConfig};
use crate::entity::AttackKind;
use crate::error::ConfigResult;
use crate::gate::{CooldownGate, Timestamp};
use crate::geometry::{distance_and_direction, Rect};

use super::Actor;

/// Enemy species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Squid
    Squid,
    /// Raccoon
    Raccoon,
    /// Spirit
    Spirit,
    /// Bamboo
    Bamboo,
}

impl EnemyKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 4] = [Self::Squid, Self::Raccoon, Self::Spirit, Self::Bamboo];

    /// Lowercase name, as used in config keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Squid => "squid",
            Self::Raccoon => "raccoon",
            Self::Spirit => "spirit",
            Self::Bamboo => "bamboo",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enemy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyStatus {
    /// Player out of notice range
    #[default]
    Idle,
    /// Chasing the player
    Move,
    /// Striking the player
    Attack,
}

impl EnemyStatus {
    /// Lowercase name, doubling as the animation key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Attack => "attack",
        }
    }
}

/// One enemy attack aimed at the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    /// Health the player loses if the strike lands
    pub damage: f32,
    /// Damage source tag for the particle layer
    pub attack_type: String,
}

/// Frame counts per enemy status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct EnemyFrames {
    idle: usize,
    moving: usize,
    attack: usize,
}

/// A hostile creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    kind: EnemyKind,
    stats: EnemyStats,
    body: SpatialBody,
    health: f32,
    direction: Vec2,
    status: EnemyStatus,
    attack_gate: CooldownGate,
    invincibility: CooldownGate,
    knockback: Vec2,
    cursor: AnimationCursor,
    frames: EnemyFrames,
}

impl Enemy {
    /// Creates an enemy of `kind` whose bounds' top-left corner is `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnemy`](crate::error::ConfigError::MissingEnemy)
    /// if the config has no stats for `kind`.
    pub fn new(kind: EnemyKind, position: Vec2, config: &GameConfig) -> ConfigResult<Self> {
        let stats = config.enemy(kind)?.clone();
        let size = Vec2::splat(config.tile_size);
        let body = SpatialBody::new(Rect::from_topleft(position, size), config.hitboxes.enemy);
        Ok(Self {
            kind,
            health: stats.health,
            stats,
            body,
            direction: Vec2::ZERO,
            status: EnemyStatus::Idle,
            attack_gate: CooldownGate::new(config.timings.enemy_attack_cooldown),
            invincibility: CooldownGate::new(config.timings.enemy_invincibility),
            knockback: Vec2::ZERO,
            cursor: AnimationCursor::new(config.animation.speed),
            frames: EnemyFrames {
                idle: config.animation.enemy_idle_frames,
                moving: config.animation.enemy_move_frames,
                attack: config.animation.enemy_attack_frames,
            },
        })
    }

    /// Species.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Stat row this enemy was created from.
    #[must_use]
    pub const fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    /// Current health; zero or below means dead.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Experience awarded when this enemy dies.
    #[must_use]
    pub const fn exp(&self) -> u32 {
        self.stats.exp
    }

    /// Returns `true` once health has dropped to zero or below.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Returns `true` if a hit would currently land.
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        self.invincibility.is_ready()
    }

    /// Returns `true` if the enemy may attack.
    #[must_use]
    pub const fn can_attack(&self) -> bool {
        self.attack_gate.is_ready()
    }

    /// Direction of the current recoil; zero when not recoiling.
    #[must_use]
    pub const fn knockback(&self) -> Vec2 {
        self.knockback
    }

    /// The invincibility window, for flicker rendering.
    #[must_use]
    pub const fn invincibility(&self) -> &CooldownGate {
        &self.invincibility
    }

    /// Applies a player hit.
    ///
    /// Does nothing and returns `false` while the invincibility window is
    /// open. Otherwise subtracts `amount` from health, closes the window and
    /// starts a recoil away from `attacker_center`.
    pub fn take_damage(
        &mut self,
        kind: AttackKind,
        amount: f32,
        attacker_center: Vec2,
        now: Timestamp,
    ) -> bool {
        if !self.invincibility.is_ready() {
            return false;
        }
        let (_, towards_attacker) = distance_and_direction(self.body.center(), attacker_center);
        self.knockback = -towards_attacker;
        self.health -= amount;
        self.invincibility.trigger(now);
        debug!(
            enemy = %self.kind,
            source = ?kind,
            amount,
            health = self.health,
            "enemy hit"
        );
        true
    }

    /// Advances the attack and invincibility gates.
    pub fn cool_down(&mut self, now: Timestamp) {
        self.attack_gate.tick(now);
        if self.invincibility.tick(now) {
            self.knockback = Vec2::ZERO;
        }
    }

    fn frames_for(&self, status: EnemyStatus) -> usize {
        match status {
            EnemyStatus::Idle => self.frames.idle,
            EnemyStatus::Move => self.frames.moving,
            EnemyStatus::Attack => self.frames.attack,
        }
    }
}

impl Actor for Enemy {
    type Status = EnemyStatus;
    type Input = Vec2;
    type Output = Option<Strike>;

    fn status(&self) -> EnemyStatus {
        self.status
    }

    fn direction(&self) -> Vec2 {
        self.direction
    }

    fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    fn body(&self) -> &SpatialBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut SpatialBody {
        &mut self.body
    }

    /// Picks a status from the distance to `player_center`.
    ///
    /// Returns the strike to deliver when the enemy attacks this frame.
    fn tick(&mut self, player_center: &Vec2, now: Timestamp) -> Option<Strike> {
        let (distance, towards_player) = distance_and_direction(self.body.center(), *player_center);

        let next = if distance <= self.stats.attack_radius && self.attack_gate.is_ready() {
            EnemyStatus::Attack
        } else if distance <= self.stats.notice_radius {
            EnemyStatus::Move
        } else {
            EnemyStatus::Idle
        };

        if next == EnemyStatus::Attack && self.status != EnemyStatus::Attack {
            self.cursor.reset();
        }
        self.status = next;

        match next {
            EnemyStatus::Attack => {
                self.direction = Vec2::ZERO;
                self.attack_gate.trigger(now);
                Some(Strike {
                    damage: self.stats.damage,
                    attack_type: self.stats.attack_type.clone(),
                })
            }
            EnemyStatus::Move => {
                self.direction = towards_player;
                None
            }
            EnemyStatus::Idle => {
                self.direction = Vec2::ZERO;
                None
            }
        }
    }

    fn motion(&self, now: Timestamp) -> (Vec2, f32) {
        if self.invincibility.is_ready() {
            (self.direction, self.stats.speed)
        } else {
            let decay = self.invincibility.remaining_fraction(now);
            (self.knockback, self.stats.speed * self.stats.resistance * decay)
        }
    }

    fn animate(&mut self) -> bool {
        let frames = self.frames_for(self.status);
        self.cursor.advance(frames)
    }

    fn animation_key(&self) -> String {
        self.status.name().to_string()
    }

    fn frame(&self) -> usize {
        self.cursor.frame(self.frames_for(self.status))
    }
}
