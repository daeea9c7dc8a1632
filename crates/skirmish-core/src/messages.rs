//! Inter-agent messages.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Position};

/// What a message reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    EnemySpotted,
}

/// A single report pooled and redistributed by the orchestrator each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    /// Reported position (may have been falsified in the receiver's inbox).
    pub position: Position,
    pub sender: EntityId,
}

impl Message {
    pub fn enemy_spotted(sender: EntityId, position: Position) -> Self {
        Self {
            kind: MessageKind::EnemySpotted,
            position,
            sender,
        }
    }
}
