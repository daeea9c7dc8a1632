//! Core types and definitions for the skirmish simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, actions, messages, configuration, geometry, snapshot records,
//! events, and default constants. It has no dependency on the ECS.

pub mod actions;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod messages;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
