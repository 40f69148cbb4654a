//! Spatial bodies with speculative-move/undo semantics.
//!
//! A [`SpatialBody`] pairs a bounds rect (what a renderer would draw and sort
//! by) with a hitbox (what collision and combat test against). The hitbox is
//! always the bounds inflated by a fixed, per-kind shrink.
//!
//! # Frame Protocol
//!
//! 1. [`SpatialBody::snapshot`] exactly once, before any movement
//! 2. [`SpatialBody::move_by`] zero or more times
//! 3. [`SpatialBody::undo`] if the collision pass rejects the frame
//!
//! Undo restores both rects from the snapshot, so the whole frame's movement
//! on both axes is reverted at once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_or_zero, Rect};

/// Anything that exposes a collision hitbox.
///
/// Obstacles handed to the collision resolver and targets handed to the combat
/// resolver only need to implement this.
pub trait HasHitbox {
    /// The rect used for collision and combat tests.
    fn hitbox(&self) -> Rect;
}

impl HasHitbox for Rect {
    fn hitbox(&self) -> Rect {
        *self
    }
}

/// Bounds/hitbox pair with a one-frame undo snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialBody {
    bounds: Rect,
    hitbox: Rect,
    previous_bounds: Rect,
    previous_hitbox: Rect,
    shrink: Vec2,
}

impl SpatialBody {
    /// Creates a body whose bounds are `bounds` and whose hitbox is
    /// `bounds.inflate(shrink.x, shrink.y)`.
    #[must_use]
    pub fn new(bounds: Rect, shrink: Vec2) -> Self {
        let hitbox = bounds.inflate(shrink.x, shrink.y);
        Self {
            bounds,
            hitbox,
            previous_bounds: bounds,
            previous_hitbox: hitbox,
            shrink,
        }
    }

    /// Top-left corner of the bounds.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.bounds.topleft()
    }

    /// Center of the bounds.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// The rendering/sorting rect.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The collision/combat rect.
    #[must_use]
    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// The shrink applied to derive the hitbox from the bounds.
    #[must_use]
    pub fn shrink(&self) -> Vec2 {
        self.shrink
    }

    /// Bounds captured by the last [`snapshot`](Self::snapshot).
    #[must_use]
    pub fn previous_bounds(&self) -> Rect {
        self.previous_bounds
    }

    /// Hitbox captured by the last [`snapshot`](Self::snapshot).
    #[must_use]
    pub fn previous_hitbox(&self) -> Rect {
        self.previous_hitbox
    }

    /// Captures the current rects as the undo point for this frame.
    pub fn snapshot(&mut self) {
        self.previous_bounds = self.bounds;
        self.previous_hitbox = self.hitbox;
    }

    /// Restores both rects from the last snapshot.
    pub fn undo(&mut self) {
        self.bounds = self.previous_bounds;
        self.hitbox = self.previous_hitbox;
    }

    /// Advances the hitbox by `normalize(direction) * speed` and recenters the
    /// bounds on it.
    ///
    /// A zero direction leaves the body where it is.
    pub fn move_by(&mut self, direction: Vec2, speed: f32) {
        let step = normalize_or_zero(direction) * speed;
        if step == Vec2::ZERO {
            return;
        }
        self.hitbox.translate(step);
        self.bounds.set_center(self.hitbox.center());
    }

    /// Places the body so its bounds' top-left corner is `topleft`.
    ///
    /// Also resets the snapshot, so a following undo is a no-op.
    pub fn teleport(&mut self, topleft: Vec2) {
        self.bounds.x = topleft.x;
        self.bounds.y = topleft.y;
        self.hitbox = self.bounds.inflate(self.shrink.x, self.shrink.y);
        self.snapshot();
    }
}

impl HasHitbox for SpatialBody {
    fn hitbox(&self) -> Rect {
        self.hitbox
    }
}
