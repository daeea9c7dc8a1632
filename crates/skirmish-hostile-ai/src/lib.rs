//! Hostile behavior for the skirmish simulation.
//!
//! Patrol curves, the turret and kamikaze state machines, and the adaptive
//! elite-drone controller (strategy table, targeting, tactics, swarm and
//! reproduction). No ECS dependency; everything operates on plain data and
//! a caller-supplied RNG.

pub mod dna;
pub mod drone;
pub mod kamikaze;
pub mod mixer;
pub mod patrol;
pub mod reproduction;
pub mod strategy;
pub mod swarm;
pub mod tactics;
pub mod targeting;
pub mod turret;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
