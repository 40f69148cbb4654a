//! Actors: the entities that think, move and animate.
//!
//! The player and every enemy run the same per-frame protocol, captured by the
//! [`Actor`] trait:
//!
//! 1. [`Actor::tick`] turns input (keys for the player, the player's position
//!    for an enemy) into a status and a movement direction
//! 2. [`Actor::move_speculatively`] snapshots the body and applies
//!    [`Actor::motion`]; the collision pass may undo it
//! 3. [`Actor::animate`] advances the frame cursor for the current status
//!
//! Cooldown handling differs per actor (the player's gates report attack ends,
//! an enemy's gates only expire) and stays on the concrete types.

mod enemy;
mod player;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::SpatialBody;
use crate::gate::Timestamp;

pub use enemy::{Enemy, EnemyKind, EnemyStatus, Strike};
pub use player::{MagicCast, Player, PlayerActions, PlayerInput, PlayerStatus};

/// Direction an actor is looking in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Towards negative `y`
    Up,
    /// Towards positive `y`
    #[default]
    Down,
    /// Towards negative `x`
    Left,
    /// Towards positive `x`
    Right,
}

impl Facing {
    /// Lowercase name, as used in animation keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Unit vector pointing the same way.
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Returns `true` for left and right.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared behaviour of the player and enemy state machines.
pub trait Actor {
    /// State-machine status (idle, moving, attacking, ...).
    type Status: Copy + PartialEq + fmt::Debug;
    /// What the actor reacts to each frame.
    type Input: ?Sized;
    /// What the decision step asks the simulation to do.
    type Output;

    /// Current status.
    fn status(&self) -> Self::Status;

    /// Current movement direction; zero means standing still.
    fn direction(&self) -> Vec2;

    /// Overrides the movement direction until the next decision step.
    fn set_direction(&mut self, direction: Vec2);

    /// The actor's bounds and hitbox.
    fn body(&self) -> &SpatialBody;

    /// Mutable access to the body, for movement and collision undo.
    fn body_mut(&mut self) -> &mut SpatialBody;

    /// Decision step: updates status and direction from `input`.
    fn tick(&mut self, input: &Self::Input, now: Timestamp) -> Self::Output;

    /// Direction and speed to move with this frame.
    fn motion(&self, now: Timestamp) -> (Vec2, f32);

    /// Advances the animation cursor. Returns `true` when the cycle wrapped.
    fn animate(&mut self) -> bool;

    /// Key of the animation the renderer should play.
    fn animation_key(&self) -> String;

    /// Frame of the current animation to draw.
    fn frame(&self) -> usize;

    /// Snapshots the body, then moves it by [`Actor::motion`].
    fn move_speculatively(&mut self, now: Timestamp) {
        let (direction, speed) = self.motion(now);
        let body = self.body_mut();
        body.snapshot();
        body.move_by(direction, speed);
    }
}
