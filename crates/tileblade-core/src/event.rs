//! Gameplay events emitted by the simulation.
//!
//! Events replace callbacks: instead of the simulation calling into the
//! renderer or the particle layer, every notable thing that happened during a
//! step is appended to an [`EventLog`]. The driver reads them from the slice
//! returned by [`Simulation::step`](crate::simulation::Simulation::step).
//!
//! The log only ever holds one delivery: events handed out by a step are
//! dropped when the next step begins, so a driver that never drains the log
//! does not grow it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::EnemyKind;
use crate::config::MagicStyle;
use crate::entity::{AttackKind, EntityId};

/// Something that happened during a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The player swung a weapon.
    AttackStarted {
        /// Weapon name
        weapon: String,
        /// The spawned weapon hitbox
        hitbox: EntityId,
    },
    /// The weapon gate reopened and the weapon hitbox was retracted.
    AttackEnded {
        /// The retracted weapon hitbox
        hitbox: EntityId,
    },
    /// A spell was cast and paid for.
    MagicCast {
        /// Spell name
        spell: String,
        /// Effect kind
        style: MagicStyle,
        /// Heal amount or damage bonus
        strength: f32,
        /// Energy consumed
        cost: f32,
    },
    /// A cast was refused for lack of energy. Nothing was consumed.
    MagicRejected {
        /// Spell name
        spell: String,
        /// Energy the spell costs
        required: f32,
        /// Energy the player had
        available: f32,
    },
    /// An enemy strike landed on the player.
    PlayerDamaged {
        /// The striking enemy
        source: EntityId,
        /// Health lost
        amount: f32,
        /// Damage source tag for the particle layer
        attack_type: String,
        /// Where to spawn hit particles
        position: Vec2,
        /// Health left
        health: f32,
    },
    /// A heal spell restored health.
    PlayerHealed {
        /// Health actually restored
        amount: f32,
        /// Health after healing
        health: f32,
        /// Where to spawn heal particles
        position: Vec2,
    },
    /// A player attack damaged an enemy.
    EnemyHit {
        /// The damaged enemy
        enemy: EntityId,
        /// Damage source
        kind: AttackKind,
        /// Health lost
        damage: f32,
        /// Health left
        health: f32,
    },
    /// An enemy died and was removed.
    EnemyDied {
        /// The removed enemy
        enemy: EntityId,
        /// Species
        kind: EnemyKind,
        /// Center of the enemy when it died
        position: Vec2,
        /// Experience credited to the player
        exp: u32,
    },
    /// A grass tile was cut and removed.
    GrassCut {
        /// The removed tile
        tile: EntityId,
        /// Where to spawn leaf particles
        position: Vec2,
        /// Number of leaf particles, in `[3, 6]`
        leaves: u8,
    },
    /// The player cycled to another weapon.
    WeaponSwitched {
        /// Index in the weapon catalogue
        index: usize,
        /// Weapon name
        name: String,
    },
    /// The player cycled to another spell.
    MagicSwitched {
        /// Index in the spell catalogue
        index: usize,
        /// Spell name
        name: String,
    },
}

impl Event {
    /// Short name of the variant, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AttackStarted { .. } => "attack_started",
            Self::AttackEnded { .. } => "attack_ended",
            Self::MagicCast { .. } => "magic_cast",
            Self::MagicRejected { .. } => "magic_rejected",
            Self::PlayerDamaged { .. } => "player_damaged",
            Self::PlayerHealed { .. } => "player_healed",
            Self::EnemyHit { .. } => "enemy_hit",
            Self::EnemyDied { .. } => "enemy_died",
            Self::GrassCut { .. } => "grass_cut",
            Self::WeaponSwitched { .. } => "weapon_switched",
            Self::MagicSwitched { .. } => "magic_switched",
        }
    }
}

/// Event buffer holding the current delivery.
///
/// Events pushed since the last [`EventLog::deliver`] are pending. Calling
/// [`EventLog::begin_frame`] drops whatever was delivered before, so the
/// buffer never outgrows one frame plus the events pushed between frames.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    delivered: usize,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Drops every event handed out by the previous [`EventLog::deliver`].
    pub fn begin_frame(&mut self) {
        self.events.drain(..self.delivered);
        self.delivered = 0;
    }

    /// Marks every buffered event as delivered and returns them.
    pub fn deliver(&mut self) -> &[Event] {
        self.delivered = self.events.len();
        &self.events
    }

    /// Every buffered event, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Drains and returns every buffered event.
    pub fn take(&mut self) -> Vec<Event> {
        self.delivered = 0;
        std::mem::take(&mut self.events)
    }

    /// Number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switched(index: usize) -> Event {
        Event::WeaponSwitched {
            index,
            name: "lance".to_string(),
        }
    }

    #[test]
    fn begin_frame_drops_delivered_events() {
        let mut log = EventLog::new();
        log.push(switched(1));
        assert_eq!(log.deliver(), &[switched(1)]);

        log.push(switched(2));
        log.begin_frame();
        assert_eq!(log.as_slice(), &[switched(2)]);
        assert_eq!(log.deliver(), &[switched(2)]);
    }

    #[test]
    fn undelivered_events_survive_begin_frame() {
        let mut log = EventLog::new();
        log.push(switched(1));
        log.begin_frame();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn repeated_frames_stay_bounded() {
        let mut log = EventLog::new();
        for index in 0..1_000 {
            log.begin_frame();
            log.push(switched(index));
            assert_eq!(log.deliver().len(), 1);
        }
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn take_drains() {
        let mut log = EventLog::new();
        log.push(switched(1));
        log.deliver();

        assert_eq!(log.take().len(), 1);
        assert!(log.is_empty());
        log.begin_frame();
        assert!(log.is_empty());
    }

    #[test]
    fn events_serialize_with_variant_name() {
        let text = serde_json::to_string(&Event::AttackEnded {
            hitbox: EntityId::new(3),
        })
        .unwrap();
        assert_eq!(text, r#"{"AttackEnded":{"hitbox":3}}"#);
    }
}
