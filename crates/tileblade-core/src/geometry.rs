//! Planar geometry used by movement, collision and targeting.
//!
//! Vectors are [`glam::Vec2`]; this module adds the axis-aligned [`Rect`] used
//! for bounds and hitboxes, plus the targeting helper shared by enemy AI and
//! knockback.
//!
//! # Coordinate System
//!
//! Screen coordinates: `+x` points right, `+y` points down. "Up" therefore means
//! a negative `y` delta.
//!
//! # Example
//!
//! ```
//! use tileblade_core::geometry::{distance_and_direction, Rect};
//! use glam::Vec2;
//!
//! let wall = Rect::new(64.0, 0.0, 64.0, 64.0);
//! let feet = Rect::new(0.0, 0.0, 64.0, 64.0).inflate(0.0, -26.0);
//! assert!(!feet.intersects(&wall));
//!
//! let (distance, direction) = distance_and_direction(Vec2::new(250.0, 100.0), Vec2::new(100.0, 100.0));
//! assert_eq!(distance, 150.0);
//! assert_eq!(direction, Vec2::new(-1.0, 0.0));
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Returns `direction` normalised, or the zero vector if it has zero length.
///
/// Never divides by zero and never produces NaN components for finite input.
#[must_use]
pub fn normalize_or_zero(direction: Vec2) -> Vec2 {
    direction.normalize_or_zero()
}

/// Distance and unit direction from `from` to `to`.
///
/// When the points coincide the distance is `0.0` and the direction is the
/// zero vector.
#[must_use]
pub fn distance_and_direction(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        (distance, delta / distance)
    } else {
        (0.0, Vec2::ZERO)
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (non-negative for a well-formed rect).
    pub width: f32,
    /// Height (non-negative for a well-formed rect).
    pub height: f32,
}

impl Rect {
    /// Creates a rect from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rect of the given size whose top-left corner is `topleft`.
    #[must_use]
    pub fn from_topleft(topleft: Vec2, size: Vec2) -> Self {
        Self::new(topleft.x, topleft.y, size.x, size.y)
    }

    /// Creates a rect of the given size centred on `center`.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::from_topleft(center - size * 0.5, size)
    }

    /// Top-left corner.
    #[must_use]
    pub fn topleft(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Midpoint of the left edge.
    #[must_use]
    pub fn midleft(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height * 0.5)
    }

    /// Midpoint of the right edge.
    #[must_use]
    pub fn midright(&self) -> Vec2 {
        Vec2::new(self.right(), self.y + self.height * 0.5)
    }

    /// Midpoint of the top edge.
    #[must_use]
    pub fn midtop(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y)
    }

    /// Midpoint of the bottom edge.
    #[must_use]
    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.bottom())
    }

    /// Moves the rect so its center lands on `center`, keeping its size.
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width * 0.5;
        self.y = center.y - self.height * 0.5;
    }

    /// Moves the rect by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Returns a copy grown by `dx`/`dy` in total, symmetrically about the center.
    ///
    /// Negative values shrink the rect; `inflate(-4.0, -26.0)` removes 2 units
    /// from each side and 13 from top and bottom.
    #[must_use]
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x - dx * 0.5,
            self.y - dy * 0.5,
            self.width + dx,
            self.height + dy,
        )
    }

    /// Returns `true` if the two rects overlap.
    ///
    /// Rects that merely touch along an edge do not intersect, and a rect with
    /// zero (or negative) area never intersects anything.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
