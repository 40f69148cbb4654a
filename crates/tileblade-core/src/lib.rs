//! # Tileblade Core
//!
//! Entity movement, collision and combat engine for Tileblade, a top-down
//! tile-based action game.
//!
//! This crate owns the rules of a level and nothing else: it has no renderer,
//! no asset loader and no clock. A driver spawns tiles, enemies and the
//! player, then calls [`Simulation::step`] once per frame with a timestamp and
//! the player's input, and reacts to the [`Event`]s it returns.
//!
//! ## Architecture
//!
//! - **Geometry**: [`geometry::Rect`] and targeting helpers over `glam::Vec2`
//! - **Bodies**: [`body::SpatialBody`] with speculative move and undo
//! - **Gates**: [`gate::CooldownGate`], the one timer behind every cooldown
//! - **Actors**: [`actor::Player`] and [`actor::Enemy`] state machines
//! - **Resolvers**: collision revert and combat hit resolution
//! - **Arena**: entity storage with group flags and deferred removal
//!
//! ## Usage
//!
//! ```
//! use tileblade_core::{EnemyKind, GameConfig, PlayerInput, Simulation, TileKind};
//! use glam::Vec2;
//!
//! let mut sim = Simulation::new(GameConfig::default(), 1)?;
//! sim.spawn_player(Vec2::new(64.0, 64.0))?;
//! sim.spawn_enemy(EnemyKind::Squid, Vec2::new(256.0, 64.0))?;
//! sim.spawn_tile(TileKind::Grass, Vec2::new(64.0, 192.0));
//!
//! let attack = PlayerInput { attack: true, ..PlayerInput::default() };
//! let events = sim.step(0, &attack);
//! assert!(!events.is_empty());
//! # Ok::<(), tileblade_core::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod animation;
pub mod arena;
pub mod body;
pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod gate;
pub mod geometry;
pub mod resolver;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use actor::{Actor, Enemy, EnemyKind, EnemyStatus, Facing, Player, PlayerInput, PlayerStatus};
pub use arena::Arena;
pub use config::GameConfig;
pub use entity::{EntityId, SpriteGroups, TileKind};
pub use error::{ActionError, ConfigError};
pub use event::Event;
pub use gate::{CooldownGate, Timestamp};
pub use simulation::Simulation;
