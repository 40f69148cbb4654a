//! Collision resolver for speculative movement.
//!
//! Bodies move first and ask questions later: after an actor has moved, its
//! hitbox is tested against every obstacle hitbox. Any overlap reverts the
//! whole frame's movement on both axes, so an actor pressing diagonally into a
//! wall stops dead rather than sliding along it.

use crate::body::{HasHitbox, SpatialBody};

/// Resolver that undoes movement ending inside an obstacle.
///
/// # Example
///
/// ```
/// use tileblade_core::body::SpatialBody;
/// use tileblade_core::geometry::Rect;
/// use tileblade_core::resolver::CollisionResolver;
/// use glam::Vec2;
///
/// let wall = Rect::new(70.0, 0.0, 64.0, 64.0);
/// let mut body = SpatialBody::new(Rect::new(0.0, 0.0, 64.0, 64.0), Vec2::ZERO);
///
/// body.snapshot();
/// body.move_by(Vec2::new(1.0, 0.0), 10.0);
/// assert!(CollisionResolver::new().resolve(&mut body, &[wall]));
/// assert_eq!(body.position(), Vec2::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates a new collision resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns `true` if `body`'s hitbox overlaps any obstacle.
    #[must_use]
    pub fn collides<'a, O>(&self, body: &SpatialBody, obstacles: impl IntoIterator<Item = &'a O>) -> bool
    where
        O: HasHitbox + 'a,
    {
        let hitbox = body.hitbox();
        obstacles
            .into_iter()
            .any(|obstacle| hitbox.intersects(&obstacle.hitbox()))
    }

    /// Reverts `body` to its snapshot if it overlaps any obstacle.
    ///
    /// # Returns
    ///
    /// `true` if the movement was undone.
    pub fn resolve<'a, O>(&self, body: &mut SpatialBody, obstacles: impl IntoIterator<Item = &'a O>) -> bool
    where
        O: HasHitbox + 'a,
    {
        if self.collides(body, obstacles) {
            body.undo();
            true
        } else {
            false
        }
    }
}
