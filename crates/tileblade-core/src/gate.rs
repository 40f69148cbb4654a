//! Cooldown gates: the single timer primitive of the engine.
//!
//! Attack cooldowns, invincibility windows, weapon/magic switch locks and
//! short-lived hitboxes are all the same thing: a gate that closes when
//! triggered at time `T` and reopens once `now - T >= duration`.
//!
//! Gates have no callbacks. The owner must call [`CooldownGate::tick`] every
//! frame with the current timestamp; `tick` reports whether the gate reopened
//! on that call so the owner can fire its own follow-up (retracting a hitbox,
//! ending an attack).
//!
//! # Example
//!
//! ```
//! use tileblade_core::gate::CooldownGate;
//!
//! let mut gate = CooldownGate::new(400);
//! gate.trigger(1_000);
//! assert!(!gate.tick(1_399));
//! assert!(gate.tick(1_400));
//! assert!(gate.is_ready());
//! ```

use serde::{Deserialize, Serialize};

/// Monotonic millisecond timestamp supplied by the external clock.
pub type Timestamp = u64;

/// An open/closed gate that reopens a fixed duration after being triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownGate {
    ready: bool,
    armed_at: Option<Timestamp>,
    duration: u64,
}

impl CooldownGate {
    /// Creates an open gate with the given duration in milliseconds.
    #[must_use]
    pub const fn new(duration: u64) -> Self {
        Self {
            ready: true,
            armed_at: None,
            duration,
        }
    }

    /// Returns `true` while the gate is open.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Duration in milliseconds.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Timestamp of the last trigger, if any.
    #[must_use]
    pub const fn armed_at(&self) -> Option<Timestamp> {
        self.armed_at
    }

    /// Changes the duration used by the current and future windows.
    pub fn set_duration(&mut self, duration: u64) {
        self.duration = duration;
    }

    /// Closes the gate, recording `now` as the start of the window.
    ///
    /// Triggering an already closed gate restarts its window.
    pub fn trigger(&mut self, now: Timestamp) {
        self.ready = false;
        self.armed_at = Some(now);
    }

    /// Reopens the gate if its window has elapsed.
    ///
    /// Returns `true` only on the call that reopens it.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if self.ready {
            return false;
        }
        if self.elapsed(now) >= self.duration {
            self.ready = true;
            return true;
        }
        false
    }

    /// Milliseconds since the last trigger, saturating at zero if the clock
    /// went backwards. Zero for a gate that was never triggered.
    #[must_use]
    pub fn elapsed(&self, now: Timestamp) -> u64 {
        self.armed_at.map_or(0, |armed| now.saturating_sub(armed))
    }

    /// Milliseconds left before the gate may reopen; zero when open.
    #[must_use]
    pub fn remaining(&self, now: Timestamp) -> u64 {
        if self.ready {
            0
        } else {
            self.duration.saturating_sub(self.elapsed(now))
        }
    }

    /// Fraction of the window still to run, in `[0, 1]`; zero when open.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn remaining_fraction(&self, now: Timestamp) -> f32 {
        if self.ready || self.duration == 0 {
            return 0.0;
        }
        (self.remaining(now) as f32 / self.duration as f32).clamp(0.0, 1.0)
    }
}
