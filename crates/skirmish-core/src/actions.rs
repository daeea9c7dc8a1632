//! Actions an agent performs once per tick.
//!
//! Produced by an agent's decision step or supplied externally for
//! `Controlled` agents.

use serde::{Deserialize, Serialize};

/// All possible agent actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentAction {
    /// Step by (dx, dy) and face the step direction.
    Move { dx: f64, dy: f64 },
    /// Melee the first visible hostile within attack range.
    Attack,
    /// Fire a projectile along (dx, dy). Costs energy.
    Shoot { dx: f64, dy: f64 },
    /// Do nothing.
    #[default]
    Wait,
    /// Rotate facing by half the field of view.
    Scan,
    /// Become invisible for a few ticks. Costs energy.
    Cloak,
    /// Any unrecognized action tag; performed as a no-op.
    #[serde(other)]
    Unknown,
}

impl AgentAction {
    pub fn name(&self) -> &'static str {
        match self {
            AgentAction::Move { .. } => "move",
            AgentAction::Attack => "attack",
            AgentAction::Shoot { .. } => "shoot",
            AgentAction::Wait => "wait",
            AgentAction::Scan => "scan",
            AgentAction::Cloak => "cloak",
            AgentAction::Unknown => "unknown",
        }
    }
}
