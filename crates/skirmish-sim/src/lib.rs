//! Simulation engine for the skirmish arena.
//!
//! Owns the hecs ECS world, runs systems in a fixed order each tick,
//! and produces a `TickRecord` per tick. Completely headless.

pub mod engine;
pub mod error;
pub mod links;
pub mod spawn;
pub mod systems;
pub mod vision;
pub mod world_setup;

pub use engine::Simulation;
pub use error::SimError;
pub use skirmish_core as core;
pub use world_setup::{AgentSpec, Blueprint};
