//! Static game tables: player stats, timings, enemy, weapon and spell catalogues.
//!
//! All tables are read-only once loaded. [`GameConfig::default`] carries the
//! stock tables; [`GameConfig::from_json_str`] and [`GameConfig::load`] parse a
//! JSON document of the same shape and reject it with a [`ConfigError`] if any
//! entry is missing or out of range.
//!
//! # Example
//!
//! ```
//! use tileblade_core::actor::EnemyKind;
//! use tileblade_core::config::GameConfig;
//!
//! let config = GameConfig::default();
//! let squid = config.enemy(EnemyKind::Squid).unwrap();
//! assert_eq!(squid.attack_radius, 80.0);
//! assert_eq!(config.weapons[0].name, "sword");
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::EnemyKind;
use crate::animation::DEFAULT_ANIMATION_SPEED;
use crate::error::{ConfigError, ConfigResult};

/// Side length of one map tile, in world units.
pub const TILE_SIZE: f32 = 64.0;

/// Player base stats. Health and energy are the maxima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Maximum health
    pub health: f32,
    /// Maximum energy
    pub energy: f32,
    /// Base attack, added to the weapon's damage
    pub attack: f32,
    /// Base magic, added to the spell's strength
    pub magic: f32,
    /// Movement speed in units per tick
    pub speed: f32,
    /// Energy regained per tick, as a fraction of `magic`
    pub energy_recovery: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            energy: 60.0,
            attack: 10.0,
            magic: 4.0,
            speed: 5.0,
            energy_recovery: 0.01,
        }
    }
}

/// Gate durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Base weapon attack cooldown; the weapon's own cooldown is added
    pub player_attack_cooldown: u64,
    /// Cooldown between spell casts
    pub player_magic_cooldown: u64,
    /// Invulnerability after the player is hit
    pub player_invulnerability: u64,
    /// Lock after switching weapon or spell
    pub switch_cooldown: u64,
    /// Enemy attack cooldown
    pub enemy_attack_cooldown: u64,
    /// Enemy invincibility after being hit
    pub enemy_invincibility: u64,
    /// How long a flame hitbox stays active
    pub flame_lifetime: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            player_attack_cooldown: 400,
            player_magic_cooldown: 400,
            player_invulnerability: 500,
            switch_cooldown: 200,
            enemy_attack_cooldown: 400,
            enemy_invincibility: 300,
            flame_lifetime: 300,
        }
    }
}

/// Per-kind enemy stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Starting health
    pub health: f32,
    /// Experience awarded on death
    pub exp: u32,
    /// Movement speed in units per tick
    pub speed: f32,
    /// Damage dealt per strike
    pub damage: f32,
    /// Knockback multiplier applied to recoil speed
    pub resistance: f32,
    /// Distance at which the enemy attacks
    pub attack_radius: f32,
    /// Distance at which the enemy starts chasing
    pub notice_radius: f32,
    /// Damage source tag handed to the particle layer (e.g. `"slash"`)
    pub attack_type: String,
}

/// A weapon in the player's catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Catalogue name
    pub name: String,
    /// Extra cooldown on top of the base attack cooldown (ms)
    pub cooldown: u64,
    /// Damage added to the player's base attack
    pub damage: f32,
    /// Hitbox extent along the facing direction
    pub length: f32,
    /// Hitbox extent across the facing direction
    pub width: f32,
}

impl WeaponStats {
    fn new(name: &str, cooldown: u64, damage: f32, length: f32, width: f32) -> Self {
        Self {
            name: name.to_string(),
            cooldown,
            damage,
            length,
            width,
        }
    }
}

/// What a spell does when cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagicStyle {
    /// Spawns a line of damaging flame hitboxes ahead of the player
    Flame,
    /// Restores player health
    Heal,
}

/// A spell in the player's catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellStats {
    /// Catalogue name
    pub name: String,
    /// Effect kind
    pub style: MagicStyle,
    /// Heal amount, or damage added to the player's base magic
    pub strength: f32,
    /// Energy consumed per cast
    pub cost: f32,
}

/// Frame counts used by the animation cursors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Frames advanced per tick
    pub speed: f32,
    /// Frames in each player animation
    pub player_frames: usize,
    /// Frames in the enemy idle animation
    pub enemy_idle_frames: usize,
    /// Frames in the enemy move animation
    pub enemy_move_frames: usize,
    /// Frames in the enemy attack animation
    pub enemy_attack_frames: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_ANIMATION_SPEED,
            player_frames: 4,
            enemy_idle_frames: 6,
            enemy_move_frames: 4,
            enemy_attack_frames: 4,
        }
    }
}

/// Inflate amounts that derive each kind's hitbox from its bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitboxShrinks {
    /// Player hitbox inflate
    pub player: Vec2,
    /// Enemy hitbox inflate
    pub enemy: Vec2,
    /// Tile hitbox inflate
    pub tile: Vec2,
}

impl Default for HitboxShrinks {
    fn default() -> Self {
        Self {
            player: Vec2::new(0.0, -26.0),
            enemy: Vec2::new(-4.0, -26.0),
            tile: Vec2::new(-2.0, -10.0),
        }
    }
}

/// The complete set of static tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of one tile
    pub tile_size: f32,
    /// Player stats
    pub player: PlayerStats,
    /// Gate durations
    pub timings: Timings,
    /// Enemy stats by kind; every kind must be present
    pub enemies: BTreeMap<EnemyKind, EnemyStats>,
    /// Weapons in switch order
    pub weapons: Vec<WeaponStats>,
    /// Spells in switch order
    pub spells: Vec<SpellStats>,
    /// Animation frame counts
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Hitbox inflates
    #[serde(default)]
    pub hitboxes: HitboxShrinks,
}

impl Default for GameConfig {
    fn default() -> Self {
        let enemy = |health, exp, damage, attack_type: &str, speed, attack_radius, notice_radius| {
            EnemyStats {
                health,
                exp,
                speed,
                damage,
                resistance: 3.0,
                attack_radius,
                notice_radius,
                attack_type: attack_type.to_string(),
            }
        };

        let mut enemies = BTreeMap::new();
        enemies.insert(
            EnemyKind::Squid,
            enemy(100.0, 100, 20.0, "slash", 3.0, 80.0, 360.0),
        );
        enemies.insert(
            EnemyKind::Raccoon,
            enemy(300.0, 250, 40.0, "claw", 2.0, 120.0, 400.0),
        );
        enemies.insert(
            EnemyKind::Spirit,
            enemy(100.0, 110, 8.0, "thunder", 4.0, 60.0, 350.0),
        );
        enemies.insert(
            EnemyKind::Bamboo,
            enemy(70.0, 120, 6.0, "leaf_attack", 3.0, 50.0, 300.0),
        );

        Self {
            tile_size: TILE_SIZE,
            player: PlayerStats::default(),
            timings: Timings::default(),
            enemies,
            weapons: vec![
                WeaponStats::new("sword", 100, 15.0, 40.0, 16.0),
                WeaponStats::new("lance", 400, 30.0, 60.0, 16.0),
                WeaponStats::new("axe", 300, 20.0, 40.0, 24.0),
                WeaponStats::new("rapier", 50, 8.0, 44.0, 12.0),
                WeaponStats::new("sai", 80, 10.0, 28.0, 16.0),
            ],
            spells: vec![
                SpellStats {
                    name: "flame".to_string(),
                    style: MagicStyle::Flame,
                    strength: 5.0,
                    cost: 20.0,
                },
                SpellStats {
                    name: "heal".to_string(),
                    style: MagicStyle::Heal,
                    strength: 20.0,
                    cost: 10.0,
                },
            ],
            animation: AnimationConfig::default(),
            hitboxes: HitboxShrinks::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`GameConfig::validate`].
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`GameConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks every table for missing entries and out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("tile_size", self.tile_size)?;
        positive("player.health", self.player.health)?;
        non_negative("player.energy", self.player.energy)?;
        non_negative("player.speed", self.player.speed)?;
        non_negative("player.energy_recovery", self.player.energy_recovery)?;

        for kind in EnemyKind::ALL {
            let stats = self
                .enemies
                .get(&kind)
                .ok_or(ConfigError::MissingEnemy(kind))?;
            positive(&format!("enemies.{kind}.health"), stats.health)?;
            non_negative(&format!("enemies.{kind}.speed"), stats.speed)?;
            non_negative(&format!("enemies.{kind}.damage"), stats.damage)?;
            non_negative(&format!("enemies.{kind}.resistance"), stats.resistance)?;
            non_negative(&format!("enemies.{kind}.attack_radius"), stats.attack_radius)?;
            non_negative(&format!("enemies.{kind}.notice_radius"), stats.notice_radius)?;
        }

        if self.weapons.is_empty() {
            return Err(ConfigError::NoWeapons);
        }
        unique_names("weapon", self.weapons.iter().map(|w| w.name.as_str()))?;
        for weapon in &self.weapons {
            positive(&format!("weapons.{}.length", weapon.name), weapon.length)?;
            positive(&format!("weapons.{}.width", weapon.name), weapon.width)?;
        }

        if self.spells.is_empty() {
            return Err(ConfigError::NoSpells);
        }
        unique_names("spell", self.spells.iter().map(|s| s.name.as_str()))?;
        for spell in &self.spells {
            non_negative(&format!("spells.{}.cost", spell.name), spell.cost)?;
        }

        let frames = [
            ("animation.player_frames", self.animation.player_frames),
            ("animation.enemy_idle_frames", self.animation.enemy_idle_frames),
            ("animation.enemy_move_frames", self.animation.enemy_move_frames),
            ("animation.enemy_attack_frames", self.animation.enemy_attack_frames),
        ];
        for (field, count) in frames {
            if count == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must have at least one frame",
                });
            }
        }
        Ok(())
    }

    /// Stats for an enemy kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnemy`] if the table has no entry.
    pub fn enemy(&self, kind: EnemyKind) -> ConfigResult<&EnemyStats> {
        self.enemies.get(&kind).ok_or(ConfigError::MissingEnemy(kind))
    }
}

fn positive(field: &str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be a positive number",
        })
    }
}

fn non_negative(field: &str, value: f32) -> ConfigResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be zero or positive",
        })
    }
}

fn unique_names<'a>(table: &'static str, names: impl Iterator<Item = &'a str>) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateEntry {
                table,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
