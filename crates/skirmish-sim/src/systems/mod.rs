//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Each walks the collection order it is given, so two runs with the same
//! seed visit entities identically.

pub mod agents;
pub mod cleanup;
pub mod comms;
pub mod drones;
pub mod effects;
pub mod elite;
pub mod hazards;
pub mod kamikaze;
pub mod projectiles;
pub mod snapshot;
pub mod turret;

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_core::components::{AgentState, Body, Health};
use skirmish_core::enums::{EntityKind, HostileRole};
use skirmish_core::types::{EntityId, Position};
use skirmish_hostile_ai::tactics::{self, AttackPlan, ZoneDeploy};

use crate::links::{is_live_kind, kill};
use crate::spawn::SpawnQueue;

/// A live agent as hostiles see it.
#[derive(Debug, Clone, Copy)]
pub struct AgentView {
    pub entity: Entity,
    pub id: EntityId,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub cloaked: bool,
    pub last_step: DVec2,
}

/// Live agents in collection order.
pub fn live_agents(world: &World, agents: &[Entity]) -> Vec<AgentView> {
    agents
        .iter()
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(&Body, &Position, &Health, &AgentState)>(entity)
                .ok()?;
            let (body, position, health, agent) = query.get()?;
            body.alive.then(|| AgentView {
                entity,
                id: body.id,
                position: *position,
                health: health.current,
                max_health: health.max,
                cloaked: agent.is_cloaked(),
                last_step: agent.last_step,
            })
        })
        .collect()
}

/// Live agents a hostile may lock onto.
pub fn targetable_agents(world: &World, agents: &[Entity]) -> Vec<AgentView> {
    let mut views = live_agents(world, agents);
    views.retain(|a| !a.cloaked);
    views
}

/// Live entities of `kind` in `order`.
pub fn count_live(world: &World, order: &[Entity], kind: EntityKind) -> usize {
    order
        .iter()
        .filter(|&&e| is_live_kind(world, e, kind))
        .count()
}

/// Damage a live entity that has health. Returns true if this blow killed it.
pub fn damage(world: &World, entity: Entity, amount: f64) -> bool {
    let alive = world.get::<&Body>(entity).map(|b| b.alive).unwrap_or(false);
    if !alive {
        return false;
    }
    let died = match world.get::<&mut Health>(entity) {
        Ok(mut health) => health.apply_damage(amount),
        Err(_) => false,
    };
    if died {
        kill(world, entity);
    }
    died
}

/// Carry out a hostile attack along `direction`: a shot for shooters, a
/// moving zone for the support roles. Returns false when there was no
/// firing solution.
pub fn launch_attack(
    queue: &mut SpawnQueue,
    owner: Entity,
    owner_kind: EntityKind,
    role: HostileRole,
    position: Position,
    direction: DVec2,
) -> bool {
    match tactics::plan_attack(role, direction) {
        AttackPlan::Fire(dir) => {
            if owner_kind == EntityKind::EliteDrone {
                queue.spawn_scored_projectile(position, dir, owner, owner_kind);
            } else {
                queue.spawn_projectile(position, dir, Some(owner), owner_kind);
            }
            true
        }
        AttackPlan::Deploy(ZoneDeploy::Smoke) => {
            queue.spawn_smoke_zone(position, true);
            true
        }
        AttackPlan::Deploy(ZoneDeploy::CommJammer) => {
            queue.spawn_comm_jammer(position, true, true);
            true
        }
        AttackPlan::Miss => false,
    }
}
