//! Snapshot system: builds the `TickRecord` for a tick.
//!
//! This system is read-only. Live objects are recorded; agents are all
//! recorded, so an agent that died this tick appears once with
//! `alive = false` before it is pruned.

use hecs::{Entity, World};

use skirmish_core::components::*;
use skirmish_core::events::SimEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Position, SimTime};

pub fn build_record(
    world: &World,
    time: &SimTime,
    objects: &[Entity],
    agents: &[Entity],
    events: Vec<SimEvent>,
) -> TickRecord {
    TickRecord {
        time: *time,
        agents: agents.iter().filter_map(|&e| agent_record(world, e)).collect(),
        objects: objects.iter().filter_map(|&e| object_record(world, e)).collect(),
        events,
    }
}

fn agent_record(world: &World, entity: Entity) -> Option<AgentRecord> {
    let mut query = world
        .query_one::<(&Body, &Position, &Health, &AgentState)>(entity)
        .ok()?;
    let (body, position, health, agent) = query.get()?;
    Some(AgentRecord {
        id: body.id,
        role: agent.role,
        position: *position,
        radius: body.radius,
        health: health.current,
        energy: agent.energy,
        range: agent.range,
        alive: body.alive,
        cloaked: agent.is_cloaked(),
        orientation: Orientation {
            angle: agent.facing,
            length: agent.effective_range,
            fov: agent.effective_fov,
        },
        last_action: agent.last_action,
        inbox_len: agent.inbox.len(),
    })
}

fn object_record(world: &World, entity: Entity) -> Option<ObjectRecord> {
    let mut query = world.query_one::<(&Body, &Position)>(entity).ok()?;
    let (body, position) = query.get()?;
    if !body.alive {
        return None;
    }
    Some(ObjectRecord {
        id: body.id,
        kind: body.kind,
        position: *position,
        radius: body.radius,
        alive: body.alive,
        health: world.get::<&Health>(entity).ok().map(|h| h.current),
        detail: detail(world, entity),
    })
}

fn detail(world: &World, entity: Entity) -> ObjectDetail {
    if let Ok(t) = world.get::<&TurretState>(entity) {
        return ObjectDetail::Turret {
            phase: t.phase,
            facing: t.facing,
            fov: t.fov,
            cooldown_timer: t.cooldown_timer,
        };
    }
    if let Ok(k) = world.get::<&KamikazeState>(entity) {
        return ObjectDetail::Kamikaze {
            phase: k.phase,
            timer: k.timer,
        };
    }
    if let Ok(d) = world.get::<&DroneState>(entity) {
        return ObjectDetail::Drone {
            pattern: d.patrol.pattern,
        };
    }
    if let Ok(e) = world.get::<&EliteState>(entity) {
        return ObjectDetail::Elite {
            strategy: e.strategy.current,
            pattern: e.patrol.pattern,
        };
    }
    if let Ok(p) = world.get::<&ProjectileState>(entity) {
        return ObjectDetail::Projectile { ttl: p.ttl };
    }
    if let Ok(x) = world.get::<&ExplosionState>(entity) {
        return ObjectDetail::Explosion {
            remaining: x.remaining,
        };
    }
    if let Ok(z) = world.get::<&ZoneState>(entity) {
        return ObjectDetail::Zone {
            effect: z.effect,
            ttl: z.ttl,
        };
    }
    ObjectDetail::None
}
