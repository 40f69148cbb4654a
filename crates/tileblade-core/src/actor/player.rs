//! Player state machine.
//!
//! The player reads a [`PlayerInput`] each frame. Outside an attack the input
//! sets the movement direction and facing, and may switch weapon/spell. While
//! either attack gate is closed the player is locked in place: movement input
//! is ignored, facing is frozen and the status is [`PlayerStatus::Attacking`].
//!
//! The weapon and magic gates are independent: a swing may start while a
//! spell is cooling down and a spell may be cast mid-swing.
//!
//! # Gates
//!
//! | Gate           | Duration                          | On reopen               |
//! |----------------|-----------------------------------|-------------------------|
//! | weapon         | base attack cooldown + weapon's   | attack ends, hitbox out |
//! | magic          | magic cooldown                    | -                       |
//! | hurt           | invulnerability window            | strikes land again      |
//! | weapon switch  | switch cooldown                   | may switch again        |
//! | magic switch   | switch cooldown                   | may switch again        |

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{flicker_alpha, AnimationCursor};
use crate::body::SpatialBody;
use crate::config::{GameConfig, MagicStyle, PlayerStats, SpellStats, WeaponStats};
use crate::entity::AttackKind;
use crate::error::{ActionError, ActionResult, ConfigError, ConfigResult};
use crate::gate::{CooldownGate, Timestamp};
use crate::geometry::Rect;

use super::{Actor, Facing};

/// Vertical offset of a sideways weapon swing from the player's mid-line.
const SIDE_SWING_OFFSET: f32 = 16.0;
/// Horizontal offset of an up/down weapon swing from the player's mid-line.
const VERTICAL_SWING_OFFSET: f32 = -10.0;

/// Player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Standing still
    #[default]
    Idle,
    /// Walking up
    MovingUp,
    /// Walking down
    MovingDown,
    /// Walking left
    MovingLeft,
    /// Walking right
    MovingRight,
    /// Locked in a weapon or spell attack
    Attacking,
}

impl PlayerStatus {
    /// Walking status for a facing.
    #[must_use]
    pub const fn moving(facing: Facing) -> Self {
        match facing {
            Facing::Up => Self::MovingUp,
            Facing::Down => Self::MovingDown,
            Facing::Left => Self::MovingLeft,
            Facing::Right => Self::MovingRight,
        }
    }
}

/// One frame of player intent.
///
/// Axis values are clamped to their sign, so any positive `move_x` means
/// "right".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// -1 left, 0 none, +1 right
    pub move_x: i8,
    /// -1 up, 0 none, +1 down
    pub move_y: i8,
    /// Swing the current weapon
    pub attack: bool,
    /// Cast the current spell
    pub cast: bool,
    /// Cycle to the next weapon
    pub switch_weapon: bool,
    /// Cycle to the next spell
    pub switch_magic: bool,
}

impl PlayerInput {
    /// Movement intent only.
    #[must_use]
    pub const fn moving(move_x: i8, move_y: i8) -> Self {
        Self {
            move_x,
            move_y,
            attack: false,
            cast: false,
            switch_weapon: false,
            switch_magic: false,
        }
    }

    /// Unnormalised intent vector with components in `{-1, 0, 1}`.
    #[must_use]
    pub fn intent(&self) -> Vec2 {
        Vec2::new(f32::from(self.move_x.signum()), f32::from(self.move_y.signum()))
    }
}

/// A successful spell cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicCast {
    /// Spell name
    pub spell: String,
    /// Effect kind
    pub style: MagicStyle,
    /// Heal amount or damage bonus
    pub strength: f32,
    /// Energy consumed
    pub cost: f32,
}

/// What the player asked for this frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerActions {
    /// Weapon hitbox to spawn, if an attack started
    pub weapon_attack: Option<Rect>,
    /// Outcome of a cast attempt, if one was made
    pub cast: Option<ActionResult<MagicCast>>,
    /// The weapon was cycled
    pub weapon_switched: bool,
    /// The spell was cycled
    pub magic_switched: bool,
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    stats: PlayerStats,
    weapons: Vec<WeaponStats>,
    spells: Vec<SpellStats>,
    body: SpatialBody,
    health: f32,
    energy: f32,
    exp: u32,
    direction: Vec2,
    intent: Vec2,
    facing: Facing,
    status: PlayerStatus,
    attacking: bool,
    weapon_index: usize,
    magic_index: usize,
    base_attack_cooldown: u64,
    weapon_gate: CooldownGate,
    magic_gate: CooldownGate,
    hurt_gate: CooldownGate,
    weapon_switch_gate: CooldownGate,
    magic_switch_gate: CooldownGate,
    cursor: AnimationCursor,
    frames: usize,
}

impl Player {
    /// Creates a player whose bounds' top-left corner is `position`, at full
    /// health and energy, facing down, holding the first weapon and spell.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoWeapons`] or [`ConfigError::NoSpells`] if a
    /// catalogue is empty.
    pub fn new(position: Vec2, config: &GameConfig) -> ConfigResult<Self> {
        if config.weapons.is_empty() {
            return Err(ConfigError::NoWeapons);
        }
        if config.spells.is_empty() {
            return Err(ConfigError::NoSpells);
        }
        let timings = &config.timings;
        let size = Vec2::splat(config.tile_size);
        Ok(Self {
            stats: config.player.clone(),
            weapons: config.weapons.clone(),
            spells: config.spells.clone(),
            body: SpatialBody::new(Rect::from_topleft(position, size), config.hitboxes.player),
            health: config.player.health,
            energy: config.player.energy,
            exp: 0,
            direction: Vec2::ZERO,
            intent: Vec2::ZERO,
            facing: Facing::Down,
            status: PlayerStatus::Idle,
            attacking: false,
            weapon_index: 0,
            magic_index: 0,
            base_attack_cooldown: timings.player_attack_cooldown,
            weapon_gate: CooldownGate::new(timings.player_attack_cooldown),
            magic_gate: CooldownGate::new(timings.player_magic_cooldown),
            hurt_gate: CooldownGate::new(timings.player_invulnerability),
            weapon_switch_gate: CooldownGate::new(timings.switch_cooldown),
            magic_switch_gate: CooldownGate::new(timings.switch_cooldown),
            cursor: AnimationCursor::new(config.animation.speed),
            frames: config.animation.player_frames,
        })
    }

    /// Base stats; health and energy here are the maxima.
    #[must_use]
    pub const fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Current energy.
    #[must_use]
    pub const fn energy(&self) -> f32 {
        self.energy
    }

    /// Experience collected so far.
    #[must_use]
    pub const fn exp(&self) -> u32 {
        self.exp
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Returns `true` while a weapon or spell attack is in progress.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Returns `true` if an enemy strike would currently land.
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        self.hurt_gate.is_ready()
    }

    /// Index of the held weapon.
    #[must_use]
    pub const fn weapon_index(&self) -> usize {
        self.weapon_index
    }

    /// Index of the selected spell.
    #[must_use]
    pub const fn magic_index(&self) -> usize {
        self.magic_index
    }

    /// The held weapon.
    #[must_use]
    pub fn weapon(&self) -> &WeaponStats {
        &self.weapons[self.weapon_index]
    }

    /// The selected spell.
    #[must_use]
    pub fn spell(&self) -> &SpellStats {
        &self.spells[self.magic_index]
    }

    /// Damage dealt by a hit of the given kind.
    #[must_use]
    pub fn damage_for(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Weapon => self.stats.attack + self.weapon().damage,
            AttackKind::Magic => self.stats.magic + self.spell().strength,
        }
    }

    /// Sprite alpha; blinks while the hurt gate is closed.
    #[must_use]
    pub fn alpha(&self, now: Timestamp) -> u8 {
        flicker_alpha(&self.hurt_gate, now)
    }

    /// Where the held weapon's hitbox goes for the current facing.
    ///
    /// Sideways swings sit against the bounds' side, 16 units below the
    /// mid-line; up/down swings sit against the top or bottom edge, 10 units
    /// left of center. The hitbox is `length` along the facing and `width`
    /// across it.
    #[must_use]
    pub fn weapon_rect(&self) -> Rect {
        let weapon = self.weapon();
        let bounds = self.body.bounds();
        let size = if self.facing.is_horizontal() {
            Vec2::new(weapon.length, weapon.width)
        } else {
            Vec2::new(weapon.width, weapon.length)
        };
        let topleft = match self.facing {
            Facing::Right => {
                let anchor = bounds.midright() + Vec2::new(0.0, SIDE_SWING_OFFSET);
                Vec2::new(anchor.x, anchor.y - size.y * 0.5)
            }
            Facing::Left => {
                let anchor = bounds.midleft() + Vec2::new(0.0, SIDE_SWING_OFFSET);
                Vec2::new(anchor.x - size.x, anchor.y - size.y * 0.5)
            }
            Facing::Down => {
                let anchor = bounds.midbottom() + Vec2::new(VERTICAL_SWING_OFFSET, 0.0);
                Vec2::new(anchor.x - size.x * 0.5, anchor.y)
            }
            Facing::Up => {
                let anchor = bounds.midtop() + Vec2::new(VERTICAL_SWING_OFFSET, 0.0);
                Vec2::new(anchor.x - size.x * 0.5, anchor.y - size.y)
            }
        };
        Rect::from_topleft(topleft, size)
    }

    /// Starts a weapon attack and returns the hitbox to spawn.
    fn start_weapon_attack(&mut self, now: Timestamp) -> Rect {
        let duration = self.base_attack_cooldown + self.weapon().cooldown;
        self.weapon_gate.set_duration(duration);
        self.weapon_gate.trigger(now);
        self.attacking = true;
        self.weapon_rect()
    }

    /// Casts the selected spell.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientEnergy`] if energy is below the
    /// spell's cost. Nothing is consumed and no gate is closed.
    pub fn cast_magic(&mut self, now: Timestamp) -> ActionResult<MagicCast> {
        let spell = self.spell();
        if self.energy < spell.cost {
            return Err(ActionError::InsufficientEnergy {
                required: spell.cost,
                available: self.energy,
            });
        }
        let cast = MagicCast {
            spell: spell.name.clone(),
            style: spell.style,
            strength: spell.strength,
            cost: spell.cost,
        };
        self.energy -= cast.cost;
        self.magic_gate.trigger(now);
        self.attacking = true;
        Ok(cast)
    }

    fn switch_weapon(&mut self, now: Timestamp) -> bool {
        if !self.weapon_switch_gate.is_ready() {
            return false;
        }
        self.weapon_index = (self.weapon_index + 1) % self.weapons.len();
        self.weapon_switch_gate.trigger(now);
        true
    }

    fn switch_magic(&mut self, now: Timestamp) -> bool {
        if !self.magic_switch_gate.is_ready() {
            return false;
        }
        self.magic_index = (self.magic_index + 1) % self.spells.len();
        self.magic_switch_gate.trigger(now);
        true
    }

    /// Applies an enemy strike if the hurt gate is open.
    ///
    /// Returns `true` if the strike landed. Health never drops below zero.
    pub fn receive_strike(&mut self, damage: f32, now: Timestamp) -> bool {
        if !self.hurt_gate.is_ready() {
            return false;
        }
        self.health = (self.health - damage).max(0.0);
        self.hurt_gate.trigger(now);
        true
    }

    /// Restores up to `amount` health, capped at the maximum.
    ///
    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.stats.health);
        self.health - before
    }

    /// Regains one frame's worth of energy, capped at the maximum.
    pub fn recover_energy(&mut self) {
        let gain = self.stats.energy_recovery * self.stats.magic;
        self.energy = (self.energy + gain).min(self.stats.energy);
    }

    /// Adds experience.
    pub fn gain_exp(&mut self, exp: u32) {
        self.exp = self.exp.saturating_add(exp);
    }

    /// Advances every gate.
    ///
    /// Returns `true` on the frame the weapon gate reopens, which is when the
    /// weapon hitbox must be retracted.
    pub fn cool_down(&mut self, now: Timestamp) -> bool {
        let attack_ended = self.weapon_gate.tick(now);
        self.magic_gate.tick(now);
        self.hurt_gate.tick(now);
        self.weapon_switch_gate.tick(now);
        self.magic_switch_gate.tick(now);

        let was_attacking = self.attacking;
        self.attacking = !self.weapon_gate.is_ready() || !self.magic_gate.is_ready();
        if was_attacking && !self.attacking {
            self.status = if self.intent == Vec2::ZERO {
                PlayerStatus::Idle
            } else {
                PlayerStatus::moving(self.facing)
            };
        }
        attack_ended
    }

    fn update_facing(&mut self, intent: Vec2) {
        if intent.y < 0.0 {
            self.facing = Facing::Up;
        } else if intent.y > 0.0 {
            self.facing = Facing::Down;
        } else if intent.x < 0.0 {
            self.facing = Facing::Left;
        } else if intent.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    fn update_status(&mut self) {
        if self.attacking {
            self.direction = Vec2::ZERO;
            if self.status != PlayerStatus::Attacking {
                self.cursor.reset();
                self.status = PlayerStatus::Attacking;
            }
        } else if self.direction == Vec2::ZERO {
            self.status = PlayerStatus::Idle;
        } else {
            self.status = PlayerStatus::moving(self.facing);
        }
    }
}

impl Actor for Player {
    type Status = PlayerStatus;
    type Input = PlayerInput;
    type Output = PlayerActions;

    fn status(&self) -> PlayerStatus {
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

    fn tick(&mut self, input: &PlayerInput, now: Timestamp) -> PlayerActions {
        let mut actions = PlayerActions::default();
        self.intent = input.intent();

        if !self.attacking {
            self.direction = self.intent;
            self.update_facing(self.intent);
        }

        if input.attack && self.weapon_gate.is_ready() {
            actions.weapon_attack = Some(self.start_weapon_attack(now));
            debug!(weapon = %self.weapon().name, facing = %self.facing, "weapon attack");
        }
        if input.cast && self.magic_gate.is_ready() {
            actions.cast = Some(self.cast_magic(now));
        }

        if !self.attacking {
            if input.switch_weapon {
                actions.weapon_switched = self.switch_weapon(now);
            }
            if input.switch_magic {
                actions.magic_switched = self.switch_magic(now);
            }
        }

        self.update_status();
        actions
    }

    fn motion(&self, _now: Timestamp) -> (Vec2, f32) {
        (self.direction, self.stats.speed)
    }

    fn animate(&mut self) -> bool {
        self.cursor.advance(self.frames)
    }

    fn animation_key(&self) -> String {
        match self.status {
            PlayerStatus::Idle => format!("{}_idle", self.facing),
            PlayerStatus::Attacking => format!("{}_attack", self.facing),
            PlayerStatus::MovingUp
            | PlayerStatus::MovingDown
            | PlayerStatus::MovingLeft
            | PlayerStatus::MovingRight => self.facing.to_string(),
        }
    }

    fn frame(&self) -> usize {
        self.cursor.frame(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Vec2::new(100.0, 100.0), &GameConfig::default()).unwrap()
    }

    fn attack() -> PlayerInput {
        PlayerInput {
            attack: true,
            ..PlayerInput::default()
        }
    }

    fn cast() -> PlayerInput {
        PlayerInput {
            cast: true,
            ..PlayerInput::default()
        }
    }

    mod input_tests {
        use super::*;

        #[test]
        fn starts_idle_facing_down() {
            let player = player();
            assert_eq!(player.status(), PlayerStatus::Idle);
            assert_eq!(player.facing(), Facing::Down);
            assert_eq!(player.animation_key(), "down_idle");
        }

        #[test]
        fn vertical_intent_wins_facing() {
            let mut player = player();
            player.tick(&PlayerInput::moving(1, -1), 0);

            assert_eq!(player.facing(), Facing::Up);
            assert_eq!(player.status(), PlayerStatus::MovingUp);
            assert_eq!(player.direction(), Vec2::new(1.0, -1.0));
        }

        #[test]
        fn facing_kept_when_intent_stops() {
            let mut player = player();
            player.tick(&PlayerInput::moving(-1, 0), 0);
            player.tick(&PlayerInput::default(), 16);

            assert_eq!(player.facing(), Facing::Left);
            assert_eq!(player.status(), PlayerStatus::Idle);
            assert_eq!(player.animation_key(), "left_idle");
        }

        #[test]
        fn axis_values_are_clamped_to_sign() {
            assert_eq!(PlayerInput::moving(7, -3).intent(), Vec2::new(1.0, -1.0));
        }
    }

    mod attack_tests {
        use super::*;

        #[test]
        fn attack_locks_movement_until_gate_reopens() {
            let mut player = player();
            let actions = player.tick(&attack(), 1_000);
            assert!(actions.weapon_attack.is_some());
            assert_eq!(player.status(), PlayerStatus::Attacking);
            assert_eq!(player.animation_key(), "down_attack");

            // sword: 400 base + 100
            player.tick(&PlayerInput::moving(1, 0), 1_016);
            assert_eq!(player.direction(), Vec2::ZERO);
            assert_eq!(player.facing(), Facing::Down);

            assert!(!player.cool_down(1_499));
            assert!(player.is_attacking());
            assert!(player.cool_down(1_500));
            assert!(!player.is_attacking());
            assert_eq!(player.status(), PlayerStatus::MovingDown);
        }

        #[test]
        fn cast_allowed_while_weapon_cools_down() {
            let mut player = player();
            assert!(player.tick(&attack(), 0).weapon_attack.is_some());
            player.cool_down(100);

            let actions = player.tick(&cast(), 100);
            assert!(matches!(actions.cast, Some(Ok(_))));
            assert_eq!(player.energy(), 40.0);
            assert!(player.is_attacking());
        }

        #[test]
        fn swing_allowed_while_magic_cools_down() {
            let mut player = player();
            assert!(matches!(player.tick(&cast(), 0).cast, Some(Ok(_))));
            player.cool_down(100);

            let actions = player.tick(&attack(), 100);
            assert!(actions.weapon_attack.is_some());
            assert!(player.is_attacking());
        }

        #[test]
        fn closed_gate_blocks_its_own_trigger() {
            let mut player = player();
            player.tick(&attack(), 0);
            player.tick(&cast(), 0);
            player.cool_down(100);

            let both = PlayerInput {
                attack: true,
                cast: true,
                ..PlayerInput::default()
            };
            let actions = player.tick(&both, 100);
            assert!(actions.weapon_attack.is_none());
            assert!(actions.cast.is_none());
            assert_eq!(player.energy(), 40.0);
        }

        #[test]
        fn attack_resets_animation() {
            let mut player = player();
            player.tick(&PlayerInput::moving(0, 1), 0);
            for _ in 0..12 {
                player.animate();
            }
            assert_ne!(player.frame(), 0);

            player.tick(&attack(), 200);
            assert_eq!(player.frame(), 0);
        }

        #[test]
        fn weapon_rect_by_facing() {
            let mut player = player();
            // bounds (100,100)-(164,164); sword 40x16
            assert_eq!(player.weapon_rect(), Rect::new(114.0, 164.0, 16.0, 40.0));

            player.tick(&PlayerInput::moving(1, 0), 0);
            assert_eq!(player.weapon_rect(), Rect::new(164.0, 140.0, 40.0, 16.0));

            player.tick(&PlayerInput::moving(-1, 0), 16);
            let left = player.weapon_rect();
            assert_eq!(left.right(), player.body().bounds().x);

            player.tick(&PlayerInput::moving(0, -1), 32);
            let up = player.weapon_rect();
            assert_eq!(up.bottom(), player.body().bounds().y);
            assert_eq!(up.size(), Vec2::new(16.0, 40.0));
        }

        #[test]
        fn weapon_damage_adds_base_attack() {
            let player = player();
            assert_eq!(player.damage_for(AttackKind::Weapon), 25.0);
            assert_eq!(player.damage_for(AttackKind::Magic), 9.0);
        }
    }

    mod magic_tests {
        use super::*;

        #[test]
        fn cast_consumes_energy() {
            let mut player = player();
            let actions = player.tick(&cast(), 0);

            let cast = actions.cast.unwrap().unwrap();
            assert_eq!(cast.spell, "flame");
            assert_eq!(player.energy(), 40.0);
            assert!(player.is_attacking());
        }

        #[test]
        fn insufficient_energy_changes_nothing() {
            let mut player = player();
            for t in 0..3 {
                player.tick(&cast(), t * 1_000);
                player.cool_down(t * 1_000 + 400);
            }
            assert_eq!(player.energy(), 0.0);

            let before = player.clone();
            let result = player.cast_magic(10_000);
            assert_eq!(
                result,
                Err(ActionError::InsufficientEnergy {
                    required: 20.0,
                    available: 0.0
                })
            );
            assert_eq!(player, before);
        }

        #[test]
        fn energy_regenerates_up_to_max() {
            let mut player = player();
            player.tick(&cast(), 0);
            player.recover_energy();
            assert!((player.energy() - 40.04).abs() < 1e-4);

            for _ in 0..10_000 {
                player.recover_energy();
            }
            assert_eq!(player.energy(), 60.0);
        }

        #[test]
        fn heal_is_capped() {
            let mut player = player();
            player.receive_strike(15.0, 0);
            assert_eq!(player.heal(20.0), 15.0);
            assert_eq!(player.health(), 100.0);
        }
    }

    mod switch_tests {
        use super::*;

        #[test]
        fn switch_cycles_behind_lock() {
            let mut player = player();
            let input = PlayerInput {
                switch_weapon: true,
                ..PlayerInput::default()
            };

            assert!(player.tick(&input, 0).weapon_switched);
            assert_eq!(player.weapon().name, "lance");

            assert!(!player.tick(&input, 100).weapon_switched);
            player.cool_down(200);
            assert!(player.tick(&input, 200).weapon_switched);
            assert_eq!(player.weapon().name, "axe");
        }

        #[test]
        fn magic_switch_wraps() {
            let mut player = player();
            let input = PlayerInput {
                switch_magic: true,
                ..PlayerInput::default()
            };
            player.tick(&input, 0);
            player.cool_down(200);
            player.tick(&input, 200);
            assert_eq!(player.magic_index(), 0);
        }

        #[test]
        fn switch_ignored_while_attacking() {
            let mut player = player();
            player.tick(&attack(), 0);
            let input = PlayerInput {
                switch_weapon: true,
                ..PlayerInput::default()
            };
            assert!(!player.tick(&input, 16).weapon_switched);
            assert_eq!(player.weapon_index(), 0);
        }
    }

    mod hurt_tests {
        use super::*;

        #[test]
        fn strike_lands_once_per_window() {
            let mut player = player();
            assert!(player.receive_strike(20.0, 1_000));
            assert!(!player.receive_strike(20.0, 1_200));
            assert_eq!(player.health(), 80.0);
            assert_eq!(player.alpha(1_001), u8::MAX);

            player.cool_down(1_500);
            assert!(player.is_vulnerable());
            assert!(player.receive_strike(20.0, 1_500));
            assert_eq!(player.health(), 60.0);
        }

        #[test]
        fn health_floors_at_zero() {
            let mut player = player();
            player.receive_strike(500.0, 0);
            assert_eq!(player.health(), 0.0);
        }
    }
}
