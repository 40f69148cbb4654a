//! Test helper functions for setting up levels and reading state back.
//!
//! Positions in tests are usually given as entity centers, which is how the
//! enemy AI measures distance; the helpers convert to the top-left corners
//! the spawn operations take.

use glam::Vec2;

use crate::actor::{Actor, EnemyKind, PlayerInput};
use crate::config::{GameConfig, TILE_SIZE};
use crate::entity::{EntityId, TileKind};
use crate::event::Event;
use crate::gate::Timestamp;
use crate::simulation::Simulation;

/// Frame duration used by scripted runs (about 60 FPS).
pub const FRAME_MS: Timestamp = 16;

// =============================================================================
// Level Setup
// =============================================================================

/// Stock tables with every enemy given attack radius 20 and notice radius 200.
///
/// Keeps enemies from striking the player unless a test puts them right on
/// top of it.
pub fn scenario_config() -> GameConfig {
    let mut config = GameConfig::default();
    for stats in config.enemies.values_mut() {
        stats.attack_radius = 20.0;
        stats.notice_radius = 200.0;
    }
    config
}

/// A level running on [`scenario_config`].
pub fn new_sim() -> Simulation {
    sim_with(scenario_config())
}

/// A level running on `config`, with a fixed seed.
pub fn sim_with(config: GameConfig) -> Simulation {
    Simulation::new(config, 42).unwrap()
}

/// Top-left corner of a one-tile body centred on `center`.
pub fn topleft_for(center: Vec2) -> Vec2 {
    center - Vec2::splat(TILE_SIZE / 2.0)
}

/// Spawns the player centred on `center`.
pub fn spawn_player_at(sim: &mut Simulation, center: Vec2) -> EntityId {
    sim.spawn_player(topleft_for(center)).unwrap()
}

/// Spawns an enemy centred on `center`.
pub fn spawn_enemy_at(sim: &mut Simulation, kind: EnemyKind, center: Vec2) -> EntityId {
    sim.spawn_enemy(kind, topleft_for(center)).unwrap()
}

/// Surrounds the rectangle of cells `[x0, x1] x [y0, y1]` with boundary tiles.
pub fn wall_in(sim: &mut Simulation, x0: i32, y0: i32, x1: i32, y1: i32) {
    for x in (x0 - 1)..=(x1 + 1) {
        for y in (y0 - 1)..=(y1 + 1) {
            if x < x0 || x > x1 || y < y0 || y > y1 {
                sim.spawn_tile(TileKind::Boundary, cell(x, y));
            }
        }
    }
}

/// Top-left corner of grid cell `(x, y)`.
#[allow(clippy::cast_precision_loss)]
pub fn cell(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
}

// =============================================================================
// Inputs
// =============================================================================

/// No keys held.
pub fn idle() -> PlayerInput {
    PlayerInput::default()
}

/// Attack key held.
pub fn attack_input() -> PlayerInput {
    PlayerInput {
        attack: true,
        ..PlayerInput::default()
    }
}

/// Cast key held.
pub fn cast_input() -> PlayerInput {
    PlayerInput {
        cast: true,
        ..PlayerInput::default()
    }
}

/// Switch-magic key held.
pub fn switch_magic_input() -> PlayerInput {
    PlayerInput {
        switch_magic: true,
        ..PlayerInput::default()
    }
}

// =============================================================================
// Running
// =============================================================================

/// Steps `frames` frames starting at `start`, one [`FRAME_MS`] apart.
///
/// # Returns
///
/// Every event emitted, and the timestamp of the frame after the last one.
pub fn run_frames(
    sim: &mut Simulation,
    start: Timestamp,
    frames: u64,
    input: &PlayerInput,
) -> (Vec<Event>, Timestamp) {
    let mut events = Vec::new();
    let mut now = start;
    for _ in 0..frames {
        events.extend_from_slice(sim.step(now, input));
        now += FRAME_MS;
    }
    (events, now)
}

// =============================================================================
// State Access
// =============================================================================

/// Top-left corner of the player's bounds.
pub fn player_position(sim: &Simulation) -> Vec2 {
    sim.player().unwrap().body().position()
}

/// Health of a live enemy.
pub fn enemy_health(sim: &Simulation, id: EntityId) -> f32 {
    sim.enemy(id).unwrap().health()
}

/// Number of events matching `predicate`.
pub fn count(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}
