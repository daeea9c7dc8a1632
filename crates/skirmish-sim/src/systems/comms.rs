//! Message exchange: emission, then redistribution.
//!
//! Every agent that can talk reports each visible hostile into a shared
//! pool. Each inbox is then rebuilt from the pool, minus the agent's own
//! reports and anything beyond its comm range. Comm jammers silence emitters
//! standing in them and clear or falsify the inbox of receivers in them.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;

use skirmish_core::components::{AgentState, Body, ZoneState};
use skirmish_core::config::CommsConfig;
use skirmish_core::enums::ZoneEffect;
use skirmish_core::geometry::within;
use skirmish_core::messages::Message;
use skirmish_core::types::Position;

use crate::vision;

/// How a comm jammer affects an agent standing in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jamming {
    Clear,
    Falsify,
}

/// Jamming at `position`. A falsifying jammer wins over a clearing one.
pub fn jamming_at(world: &World, objects: &[Entity], position: &Position) -> Option<Jamming> {
    let mut found = None;
    for &entity in objects {
        let Ok(mut query) = world.query_one::<(&Body, &Position, &ZoneState)>(entity) else {
            continue;
        };
        let Some((body, center, zone)) = query.get() else {
            continue;
        };
        if !body.alive || !within(center, position, body.radius) {
            continue;
        }
        match zone.effect {
            ZoneEffect::CommJammer { falsify: true } => return Some(Jamming::Falsify),
            ZoneEffect::CommJammer { falsify: false } => found = Some(Jamming::Clear),
            _ => {}
        }
    }
    found
}

/// Run one exchange over all live agents.
pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    config: &CommsConfig,
    rng: &mut impl Rng,
) {
    let pool = emit(world, objects, agents);
    redistribute(world, objects, agents, &pool, config, rng);
}

fn emit(world: &World, objects: &[Entity], agents: &[Entity]) -> Vec<Message> {
    let candidates: Vec<Entity> = objects.iter().chain(agents).copied().collect();
    let mut pool = Vec::new();
    for &entity in agents {
        let Some(observer) = vision::observer(world, entity) else {
            continue;
        };
        let can_talk = world
            .get::<&AgentState>(entity)
            .map(|a| a.can_communicate)
            .unwrap_or(false);
        if !can_talk || jamming_at(world, objects, &observer.position).is_some() {
            continue;
        }
        let Ok(sender) = world.get::<&Body>(entity).map(|b| b.id) else {
            continue;
        };
        let sight = vision::visible_entities(world, &observer, &candidates);
        pool.extend(
            sight
                .contacts
                .iter()
                .filter(|c| c.kind.is_hostile())
                .map(|c| Message::enemy_spotted(sender, c.position)),
        );
    }
    pool
}

fn redistribute(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    pool: &[Message],
    config: &CommsConfig,
    rng: &mut impl Rng,
) {
    for &entity in agents {
        let Ok(mut query) = world.query_one::<(&Body, &Position)>(entity) else {
            continue;
        };
        let Some((body, position)) = query.get().map(|(b, p)| (*b, *p)) else {
            continue;
        };
        drop(query);
        if !body.alive {
            continue;
        }
        let jamming = jamming_at(world, objects, &position);

        let Ok(agent) = world.query_one_mut::<&mut AgentState>(entity) else {
            continue;
        };
        let comm_range = agent.comm_range;
        agent.inbox = pool
            .iter()
            .filter(|m| m.sender != body.id && position.distance_to(&m.position) <= comm_range)
            .cloned()
            .collect();

        match jamming {
            Some(Jamming::Falsify) => {
                for message in &mut agent.inbox {
                    message.position = falsify(message.position, config, rng);
                }
            }
            Some(Jamming::Clear) => agent.inbox.clear(),
            None => {}
        }
    }
}

/// Displace a reported position by a random offset in
/// `[falsify_min_offset, falsify_radius]`.
pub fn falsify(position: Position, config: &CommsConfig, rng: &mut impl Rng) -> Position {
    let angle = rng.gen_range(0.0..TAU);
    let lo = config.falsify_min_offset;
    let hi = config.falsify_radius.max(lo);
    let magnitude = rng.gen_range(lo..=hi);
    position.offset(DVec2::from_angle(angle) * magnitude)
}
