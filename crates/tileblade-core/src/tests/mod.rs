//! Crate-level tests that drive a full [`Simulation`](crate::simulation::Simulation).
//!
//! # Test Structure
//!
//! - `helpers.rs`: Level setup utilities and factory functions
//! - `scenarios.rs`: End-to-end gameplay scenarios
//! - `determinism.rs`: Same seed and inputs produce the same event stream
//! - `properties.rs`: Property tests over geometry, gates and the frame loop

mod helpers;
