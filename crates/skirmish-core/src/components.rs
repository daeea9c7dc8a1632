//! ECS components for hecs entities.
//!
//! Components are plain data. Behavior lives in the hostile-ai crate and in
//! the simulation systems, not here. References to other entities are not
//! components of this crate; the simulation stores them as generation-checked
//! handles.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::actions::AgentAction;
use crate::enums::*;
use crate::messages::Message;
use crate::types::{EntityId, Position};

/// Identity, shape and liveness shared by every entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Bounding radius, never negative.
    pub radius: f64,
    /// Cleared when the entity dies; it is pruned at the end of the tick.
    pub alive: bool,
}

/// Hit points of a damageable entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`. Returns true if this blow took health to zero or
    /// below.
    pub fn apply_damage(&mut self, amount: f64) -> bool {
        self.current -= amount.max(0.0);
        self.current <= 0.0
    }

    /// Add `amount`, bounded at `max`.
    pub fn heal(&mut self, amount: f64) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}

/// Per-role tunables of an agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentProfile {
    pub speed: f64,
    pub attack_power: f64,
    pub attack_range: f64,
    pub heal_range: f64,
    pub heal_amount: f64,
    /// Post a guard returns to.
    pub guard_post: Option<Position>,
    pub patrol_radius: f64,
    pub explosion_range: f64,
    pub explosion_damage: f64,
}

/// A friendly agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub role: AgentRole,
    pub profile: AgentProfile,
    pub energy: f64,
    /// Facing angle in radians.
    pub facing: f64,
    pub range: f64,
    /// Full field of view in radians.
    pub fov: f64,
    /// Range after smoke and jamming this tick.
    pub effective_range: f64,
    pub effective_fov: f64,
    pub comm_range: f64,
    pub can_communicate: bool,
    /// Remaining cloaked ticks.
    pub cloak_ticks: u32,
    pub inbox: Vec<Message>,
    /// Next action for a `Controlled` agent.
    pub pending_action: Option<AgentAction>,
    pub last_action: Option<AgentAction>,
    pub last_attack_success: bool,
    pub out_of_bounds_ticks: u32,
    /// Displacement applied by the last move, used by hostiles to lead shots.
    pub last_step: DVec2,
}

impl AgentState {
    pub fn is_cloaked(&self) -> bool {
        self.cloak_ticks > 0
    }
}

/// Patrol curve state: a phase that advances each tick plus what the random
/// patterns need to remember.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatrolState {
    pub pattern: PatrolPattern,
    pub center: Position,
    pub radius: f64,
    pub phase: f64,
    pub random_direction: DVec2,
    pub random_timer: u32,
    pub waypoint: Option<Position>,
}

/// Blends an elite's current pattern into the next one over `duration` ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternMixer {
    pub base: PatrolPattern,
    pub target: PatrolPattern,
    pub elapsed: u32,
    pub duration: u32,
}

/// Ticks since a drone last reproduced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReproductionState {
    pub ticks_since: u32,
}

/// A simple patrolling drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneState {
    pub role: HostileRole,
    pub patrol: PatrolState,
    pub speed: f64,
    pub attack_range: f64,
    pub fire_range: f64,
    pub fire_timer: u32,
    pub reproduction: ReproductionState,
}

/// Heritable traits of an elite drone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dna {
    pub speed: f64,
    pub fire_rate: f64,
    pub evasiveness: f64,
    pub swarm_aggression: f64,
    pub intelligence: f64,
}

/// Strategy weights (in `Strategy::ALL` order) and the sampled strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyTable {
    pub weights: [f64; 5],
    pub current: Strategy,
}

impl StrategyTable {
    pub fn weight(&self, strategy: Strategy) -> f64 {
        self.weights[strategy.index()]
    }

    pub fn weight_mut(&mut self, strategy: Strategy) -> &mut f64 {
        &mut self.weights[strategy.index()]
    }
}

/// An adaptive elite drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliteState {
    pub role: HostileRole,
    pub patrol: PatrolState,
    pub mixer: PatternMixer,
    pub dna: Dna,
    pub strategy: StrategyTable,
    /// Speed after the DNA multiplier.
    pub speed: f64,
    pub attack_range: f64,
    pub fire_range: f64,
    pub adaptation_timer: u32,
    pub failed_attacks: u32,
    pub last_known_target: Option<Position>,
    pub reproduction: ReproductionState,
}

/// A rotating gun emplacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretState {
    pub phase: TurretPhase,
    pub facing: f64,
    pub fov: f64,
    pub fire_range: f64,
    pub rotation_speed: f64,
    pub cooldown_timer: u32,
    pub cooldown_min: u32,
    pub cooldown_max: u32,
    pub jammer_timer: u32,
}

/// A suicide drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KamikazeState {
    pub phase: KamikazePhase,
    /// Consecutive ticks spent in explosion range.
    pub timer: u32,
    pub speed: f64,
    pub activation_radius: f64,
    pub explosion_radius: f64,
    pub explosion_damage: f64,
    pub delay: u32,
}

/// A passive proximity mine. The radius of its `Body` is the trigger radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MineState {
    pub triggered: bool,
    pub explosion_radius: f64,
    pub trigger_damage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Unit direction of travel.
    pub direction: DVec2,
    pub speed: f64,
    pub damage: f64,
    pub ttl: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplosionState {
    /// Ticks of damage left.
    pub remaining: u32,
    pub damage: f64,
}

/// Smoke or jamming area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneState {
    pub effect: ZoneEffect,
    /// None = permanent.
    pub ttl: Option<u32>,
    /// Zero for static zones.
    pub drift_speed: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecoyState {
    pub lifespan: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergySource {
    pub energy: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObjectiveState {
    pub reward: f64,
    pub collected: bool,
}
