//! Zones, decoys and pickups.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;

use skirmish_core::components::{AgentState, Body, DecoyState, EnergySource, ObjectiveState, ZoneState};
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

use crate::links::{kill, read, write};
use crate::systems::live_agents;

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    rng: &mut impl Rng,
    events: &mut Vec<SimEvent>,
) {
    for &entity in objects {
        let Some(body) = read::<Body>(world, entity) else {
            continue;
        };
        if !body.alive {
            continue;
        }
        if let Some(zone) = read::<ZoneState>(world, entity) {
            tick_zone(world, entity, zone, rng);
        } else if let Some(decoy) = read::<DecoyState>(world, entity) {
            tick_decoy(world, entity, decoy);
        } else if let Some(source) = read::<EnergySource>(world, entity) {
            tick_energy(world, entity, &body, source, agents);
        } else if let Some(objective) = read::<ObjectiveState>(world, entity) {
            tick_objective(world, entity, &body, objective, agents, events);
        }
    }
}

/// Drift by a random unit step, then age. Zones without a ttl never expire.
fn tick_zone(world: &World, entity: Entity, mut zone: ZoneState, rng: &mut impl Rng) {
    if zone.drift_speed > 0.0 {
        if let Some(position) = read::<Position>(world, entity) {
            let heading = DVec2::from_angle(rng.gen_range(0.0..TAU));
            write(world, entity, position.offset(heading * zone.drift_speed));
        }
    }
    if let Some(ttl) = zone.ttl.as_mut() {
        *ttl = ttl.saturating_sub(1);
        if *ttl == 0 {
            kill(world, entity);
        }
    }
    write(world, entity, zone);
}

fn tick_decoy(world: &World, entity: Entity, mut decoy: DecoyState) {
    decoy.lifespan = decoy.lifespan.saturating_sub(1);
    if decoy.lifespan == 0 {
        kill(world, entity);
    }
    write(world, entity, decoy);
}

/// The first live agent inside the source's radius takes all of its energy.
fn tick_energy(world: &World, entity: Entity, body: &Body, source: EnergySource, agents: &[Entity]) {
    let Some(position) = read::<Position>(world, entity) else {
        return;
    };
    let Some(taker) = live_agents(world, agents)
        .into_iter()
        .find(|a| position.distance_to(&a.position) <= body.radius)
    else {
        return;
    };
    if let Ok(mut agent) = world.get::<&mut AgentState>(taker.entity) {
        agent.energy += source.energy;
    }
    kill(world, entity);
}

/// The first live agent overlapping the objective collects it.
fn tick_objective(
    world: &World,
    entity: Entity,
    body: &Body,
    mut objective: ObjectiveState,
    agents: &[Entity],
    events: &mut Vec<SimEvent>,
) {
    if objective.collected {
        return;
    }
    let Some(position) = read::<Position>(world, entity) else {
        return;
    };
    let collector = agents.iter().find_map(|&e| {
        let agent_body = read::<Body>(world, e)?;
        let agent_pos = read::<Position>(world, e)?;
        (agent_body.alive && position.distance_to(&agent_pos) <= body.radius + agent_body.radius)
            .then_some((e, agent_body.id))
    });
    let Some((collector, id)) = collector else {
        return;
    };
    if let Ok(mut agent) = world.get::<&mut AgentState>(collector) {
        agent.energy += objective.reward;
    }
    objective.collected = true;
    write(world, entity, objective);
    kill(world, entity);
    events.push(SimEvent::ObjectiveCollected {
        agent: id,
        reward: objective.reward,
    });
}
