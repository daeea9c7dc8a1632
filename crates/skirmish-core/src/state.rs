//! Per-tick snapshot records, the hand-off to persistence and visualization.

use serde::{Deserialize, Serialize};

use crate::actions::AgentAction;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, Position, SimTime};

/// Everything recorded about one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickRecord {
    pub time: SimTime,
    pub agents: Vec<AgentRecord>,
    pub objects: Vec<ObjectRecord>,
    pub events: Vec<SimEvent>,
}

/// An agent's public state at the end of the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: EntityId,
    pub role: AgentRole,
    pub position: Position,
    pub radius: f64,
    pub health: f64,
    pub energy: f64,
    pub range: f64,
    pub alive: bool,
    pub cloaked: bool,
    pub orientation: Orientation,
    pub last_action: Option<AgentAction>,
    pub inbox_len: usize,
}

/// View cone drawn for an agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orientation {
    pub angle: f64,
    /// Effective range this tick.
    pub length: f64,
    /// Effective field of view this tick.
    pub fov: f64,
}

/// A live non-agent entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub radius: f64,
    pub alive: bool,
    pub health: Option<f64>,
    pub detail: ObjectDetail,
}

/// Kind-specific extras.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDetail {
    #[default]
    None,
    Turret {
        phase: TurretPhase,
        facing: f64,
        fov: f64,
        cooldown_timer: u32,
    },
    Kamikaze {
        phase: KamikazePhase,
        timer: u32,
    },
    Drone {
        pattern: PatrolPattern,
    },
    Elite {
        strategy: Strategy,
        pattern: PatrolPattern,
    },
    Projectile {
        ttl: u32,
    },
    Explosion {
        remaining: u32,
    },
    Zone {
        effect: ZoneEffect,
        ttl: Option<u32>,
    },
}
