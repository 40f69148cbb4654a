//! Frame cursors for sprite animations.
//!
//! The engine does not own any frames; it only tracks which frame a renderer
//! should show. The cursor advances by a fractional speed each tick and wraps,
//! so [`AnimationCursor::frame`] is always a valid index.

use serde::{Deserialize, Serialize};

use crate::gate::{CooldownGate, Timestamp};

/// Default per-tick advance, in frames.
pub const DEFAULT_ANIMATION_SPEED: f32 = 0.15;

/// Sprite alpha for an entity whose damage window is `gate`.
///
/// Fully opaque while the gate is open. While it is closed the sprite blinks,
/// following the sign of `sin(now)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn flicker_alpha(gate: &CooldownGate, now: Timestamp) -> u8 {
    if gate.is_ready() || (now as f64).sin() >= 0.0 {
        u8::MAX
    } else {
        0
    }
}

/// Fractional frame index over an animation of `frames` frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationCursor {
    index: f32,
    speed: f32,
}

impl Default for AnimationCursor {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_SPEED)
    }
}

impl AnimationCursor {
    /// Creates a cursor at frame 0 advancing `speed` frames per tick.
    #[must_use]
    pub const fn new(speed: f32) -> Self {
        Self { index: 0.0, speed }
    }

    /// Rewinds to frame 0.
    pub fn reset(&mut self) {
        self.index = 0.0;
    }

    /// Raw fractional index.
    #[must_use]
    pub fn index(&self) -> f32 {
        self.index
    }

    /// Advances one tick over an animation of `frames` frames.
    ///
    /// Returns `true` when the cycle completed and the cursor wrapped to 0.
    /// An empty animation never completes and stays at 0.
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&mut self, frames: usize) -> bool {
        if frames == 0 {
            self.index = 0.0;
            return false;
        }
        self.index += self.speed;
        if self.index >= frames as f32 {
            self.index = 0.0;
            return true;
        }
        false
    }

    /// Current frame, always `< frames` (or 0 for an empty animation).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame(&self, frames: usize) -> usize {
        if frames == 0 {
            return 0;
        }
        (self.index.max(0.0) as usize) % frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_full_cycle() {
        let mut cursor = AnimationCursor::new(1.0);
        assert!(!cursor.advance(3));
        assert!(!cursor.advance(3));
        assert!(cursor.advance(3));
        assert_eq!(cursor.frame(3), 0);
    }

    #[test]
    fn frame_never_out_of_bounds() {
        let mut cursor = AnimationCursor::new(0.7);
        for _ in 0..100 {
            cursor.advance(4);
            assert!(cursor.frame(4) < 4);
        }
        // a shorter animation than the one we advanced over still clamps
        assert!(cursor.frame(2) < 2);
    }

    #[test]
    fn empty_animation_stays_at_zero() {
        let mut cursor = AnimationCursor::default();
        assert!(!cursor.advance(0));
        assert_eq!(cursor.frame(0), 0);
    }

    #[test]
    fn flicker_only_while_gate_closed() {
        let mut gate = CooldownGate::new(500);
        assert_eq!(flicker_alpha(&gate, 4), u8::MAX);

        gate.trigger(0);
        // sin(4) < 0, sin(1) > 0
        assert_eq!(flicker_alpha(&gate, 4), 0);
        assert_eq!(flicker_alpha(&gate, 1), u8::MAX);
    }

    #[test]
    fn reset_rewinds() {
        let mut cursor = AnimationCursor::new(1.0);
        cursor.advance(5);
        cursor.advance(5);
        cursor.reset();
        assert_eq!(cursor.frame(5), 0);
    }
}
