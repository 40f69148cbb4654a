//! Resolvers turn a frame's proposed state into its final state.
//!
//! Actors propose movement and attacks; resolvers decide what actually
//! happens:
//!
//! - [`CollisionResolver`]: Reverts movement that ends inside an obstacle
//! - [`CombatResolver`]: Applies attack hitboxes to attackable targets
//!
//! # Invariants
//!
//! - Resolvers iterate entities in ascending ID order
//! - Resolvers never remove entities; removals are queued on the arena and
//!   flushed by the simulation at pass boundaries

mod collision;
mod combat;

pub use collision::CollisionResolver;
pub use combat::{AttackerProfile, CombatResolver, Hit};
