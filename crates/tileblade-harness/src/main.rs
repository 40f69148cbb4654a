//! Tileblade headless harness.
//!
//! Builds a small walled level, drives the player through a scripted route
//! with a synthetic clock and logs every event the simulation emits.
//!
//! Usage: `tileblade-harness [harness.json]`
//!
//! The optional JSON file holds a [`HarnessConfig`]; missing fields take their
//! defaults. Its `game_config` entry, if set, points at a JSON `GameConfig`
//! used instead of the built-in tables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Deserialize;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tileblade_core::config::TILE_SIZE;
use tileblade_core::{Actor, EnemyKind, Event, GameConfig, PlayerInput, Simulation, TileKind};

/// Runtime settings for one harness run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct HarnessConfig {
    /// Frames to simulate
    frames: u64,
    /// Synthetic clock advance per frame, in milliseconds
    frame_ms: u64,
    /// Simulation RNG seed
    seed: u64,
    /// Max tracing level (`error`, `warn`, `info`, `debug`, `trace`)
    log_level: String,
    /// Optional game tables to load instead of the defaults
    game_config: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_ms: 16,
            seed: 12345,
            log_level: "info".to_string(),
            game_config: None,
        }
    }
}

impl HarnessConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading harness config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing harness config {}", path.display()))
    }

    fn level(&self) -> Result<Level> {
        self.log_level
            .parse()
            .with_context(|| format!("invalid log level `{}`", self.log_level))
    }
}

fn main() -> Result<()> {
    let harness = match std::env::args().nth(1) {
        Some(path) => HarnessConfig::load(Path::new(&path))?,
        None => HarnessConfig::default(),
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(harness.level()?)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let game = match &harness.game_config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading game config {}", path.display()))?,
        None => GameConfig::default(),
    };

    info!(
        frames = harness.frames,
        frame_ms = harness.frame_ms,
        seed = harness.seed,
        "starting harness run"
    );

    let mut sim = build_level(game, harness.seed)?;
    let tally = run(&mut sim, &harness);
    report(&sim, &tally);
    Ok(())
}

/// Top-left corner of grid cell `(x, y)`.
#[allow(clippy::cast_precision_loss)]
fn cell(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
}

/// A 12x10 room: boundary ring, a grass patch, a statue and one of each enemy.
fn build_level(config: GameConfig, seed: u64) -> Result<Simulation> {
    const WIDTH: i32 = 12;
    const HEIGHT: i32 = 10;

    let mut sim = Simulation::new(config, seed).context("invalid game config")?;

    for x in -1..=WIDTH {
        for y in -1..=HEIGHT {
            if x < 0 || y < 0 || x == WIDTH || y == HEIGHT {
                sim.spawn_tile(TileKind::Boundary, cell(x, y));
            }
        }
    }
    for x in 3..6 {
        for y in 6..8 {
            sim.spawn_tile(TileKind::Grass, cell(x, y));
        }
    }
    sim.spawn_tile(TileKind::Object, cell(8, 3));

    let spawns = [
        (EnemyKind::Squid, cell(9, 1)),
        (EnemyKind::Raccoon, cell(10, 7)),
        (EnemyKind::Spirit, cell(1, 8)),
        (EnemyKind::Bamboo, cell(6, 1)),
    ];
    for (kind, position) in spawns {
        sim.spawn_enemy(kind, position)
            .with_context(|| format!("spawning {kind}"))?;
    }

    sim.spawn_player(cell(4, 4)).context("spawning player")?;
    Ok(sim)
}

/// Input for frame `frame`: walk a loop, swinging and casting along the way.
fn scripted_input(frame: u64) -> PlayerInput {
    match frame % 240 {
        0..=39 => PlayerInput::moving(0, 1),
        40 => PlayerInput {
            attack: true,
            ..PlayerInput::default()
        },
        41..=79 => PlayerInput::moving(1, 0),
        80 => PlayerInput {
            cast: true,
            ..PlayerInput::default()
        },
        81..=119 => PlayerInput::moving(0, -1),
        120 => PlayerInput {
            switch_magic: true,
            switch_weapon: true,
            ..PlayerInput::default()
        },
        121..=159 => PlayerInput::moving(-1, 0),
        160 => PlayerInput {
            cast: true,
            ..PlayerInput::default()
        },
        161..=199 => PlayerInput::moving(-1, 1),
        200 => PlayerInput {
            attack: true,
            ..PlayerInput::default()
        },
        _ => PlayerInput::moving(1, -1),
    }
}

/// Steps the simulation and counts events by name.
fn run(sim: &mut Simulation, harness: &HarnessConfig) -> BTreeMap<&'static str, usize> {
    let mut tally = BTreeMap::new();

    for frame in 0..harness.frames {
        let now = frame * harness.frame_ms;
        let input = scripted_input(frame);
        for event in sim.step(now, &input) {
            *tally.entry(event.name()).or_insert(0) += 1;
            log_event(frame, event);
        }
        if sim.player().is_some_and(|p| p.health() <= 0.0) {
            warn!(frame, "player health depleted, stopping");
            break;
        }
    }
    tally
}

fn log_event(frame: u64, event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => info!(frame, event = event.name(), "{json}"),
        Err(err) => warn!(frame, %err, "unserializable event"),
    }
}

fn report(sim: &Simulation, tally: &BTreeMap<&'static str, usize>) {
    for (name, count) in tally {
        debug!(event = name, count, "event total");
    }
    if let Some(player) = sim.player() {
        let position = player.body().position();
        info!(
            health = player.health(),
            energy = player.energy(),
            exp = player.exp(),
            x = position.x,
            y = position.y,
            "final player state"
        );
    }
    info!(
        frames = sim.frame(),
        enemies_left = sim.enemy_ids().len(),
        entities = sim.arena().entity_count(),
        "run complete"
    );
}
