//! Passive entities: map tiles and attack hitboxes.
//!
//! Neither runs a state machine. Tiles sit still until cut; attack hitboxes
//! live until the player's attack ends or their own lifetime gate reopens.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::HasHitbox;
use crate::gate::{CooldownGate, Timestamp};
use crate::geometry::Rect;

/// Kind of map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Invisible map boundary
    Boundary,
    /// Cuttable grass
    Grass,
    /// Decorative object, drawn two tiles tall
    Object,
}

/// A static map tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    kind: TileKind,
    bounds: Rect,
    hitbox: Rect,
}

impl Tile {
    /// Creates a tile anchored at the grid cell whose top-left corner is `cell`.
    ///
    /// Objects extend one tile above their cell and are two tiles tall.
    #[must_use]
    pub fn new(kind: TileKind, cell: Vec2, tile_size: f32, shrink: Vec2) -> Self {
        let bounds = match kind {
            TileKind::Object => Rect::new(cell.x, cell.y - tile_size, tile_size, tile_size * 2.0),
            TileKind::Boundary | TileKind::Grass => Rect::new(cell.x, cell.y, tile_size, tile_size),
        };
        Self {
            kind,
            bounds,
            hitbox: bounds.inflate(shrink.x, shrink.y),
        }
    }

    /// The tile kind.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// The rendering rect.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns `true` for grass, which attacks destroy instead of damaging.
    #[must_use]
    pub const fn is_breakable(&self) -> bool {
        matches!(self.kind, TileKind::Grass)
    }
}

impl HasHitbox for Tile {
    fn hitbox(&self) -> Rect {
        self.hitbox
    }
}

/// Damage source of a player attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    /// Melee weapon swing
    Weapon,
    /// Offensive spell
    Magic,
}

/// An active player attack area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackHitbox {
    kind: AttackKind,
    rect: Rect,
    lifetime: Option<CooldownGate>,
}

impl AttackHitbox {
    /// A weapon hitbox, retracted explicitly when the attack ends.
    #[must_use]
    pub const fn weapon(rect: Rect) -> Self {
        Self {
            kind: AttackKind::Weapon,
            rect,
            lifetime: None,
        }
    }

    /// A magic hitbox that expires `lifetime` ms after `now`.
    #[must_use]
    pub fn magic(rect: Rect, lifetime: u64, now: Timestamp) -> Self {
        let mut gate = CooldownGate::new(lifetime);
        gate.trigger(now);
        Self {
            kind: AttackKind::Magic,
            rect,
            lifetime: Some(gate),
        }
    }

    /// Damage source of this hitbox.
    #[must_use]
    pub const fn kind(&self) -> AttackKind {
        self.kind
    }

    /// Advances the lifetime gate. Returns `true` once the hitbox has expired.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        self.lifetime.as_mut().is_some_and(|gate| {
            gate.tick(now);
            gate.is_ready()
        })
    }
}

impl HasHitbox for AttackHitbox {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_tile_extends_upwards() {
        let tile = Tile::new(TileKind::Object, Vec2::new(64.0, 128.0), 64.0, Vec2::new(-2.0, -10.0));
        assert_eq!(tile.bounds(), Rect::new(64.0, 64.0, 64.0, 128.0));
        assert_eq!(tile.hitbox(), Rect::new(65.0, 69.0, 62.0, 118.0));
    }

    #[test]
    fn only_grass_is_breakable() {
        let shrink = Vec2::new(-2.0, -10.0);
        assert!(Tile::new(TileKind::Grass, Vec2::ZERO, 64.0, shrink).is_breakable());
        assert!(!Tile::new(TileKind::Boundary, Vec2::ZERO, 64.0, shrink).is_breakable());
        assert!(!Tile::new(TileKind::Object, Vec2::ZERO, 64.0, shrink).is_breakable());
    }

    #[test]
    fn weapon_hitbox_never_expires_on_its_own() {
        let mut hitbox = AttackHitbox::weapon(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!hitbox.tick(u64::MAX));
    }

    #[test]
    fn magic_hitbox_expires_after_lifetime() {
        let mut hitbox = AttackHitbox::magic(Rect::new(0.0, 0.0, 10.0, 10.0), 300, 1_000);
        assert!(!hitbox.tick(1_299));
        assert!(hitbox.tick(1_300));
        assert!(hitbox.tick(1_301));
    }
}
