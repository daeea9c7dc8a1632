//! Errors surfaced by the simulation's external API.

use skirmish_core::error::ConfigError;
use skirmish_core::types::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// No live entity has this id
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    /// The entity exists but is not an agent
    #[error("entity {0} is not an agent")]
    NotAnAgent(EntityId),
}
