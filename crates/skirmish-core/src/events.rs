//! Events emitted by the simulation during a tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position};

/// Something noteworthy that happened this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// A projectile damaged its victim.
    ProjectileHit {
        projectile: EntityId,
        victim: EntityId,
        damage: f64,
    },
    /// An explosion was requested at `position`.
    ExplosionSpawned { position: Position, radius: f64 },
    MineTriggered { mine: EntityId, agent: EntityId },
    KamikazeDetonated { kamikaze: EntityId, position: Position },
    /// A drone paid for a child. The child joins the world at the end of the
    /// tick.
    Reproduced { parent: EntityId, kind: EntityKind },
    StrategyChanged {
        drone: EntityId,
        from: Strategy,
        to: Strategy,
    },
    ObjectiveCollected { agent: EntityId, reward: f64 },
    /// Recorded when the entity is pruned.
    EntityDestroyed { entity: EntityId, kind: EntityKind },
}
