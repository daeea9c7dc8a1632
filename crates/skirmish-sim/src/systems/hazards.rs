//! Mines and explosions.

use hecs::{Entity, World};
use tracing::debug;

use skirmish_core::components::{Body, ExplosionState, MineState};
use skirmish_core::enums::EntityKind;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

use crate::links::{is_live_kind, kill, read, write};
use crate::spawn::SpawnQueue;
use crate::systems::{damage, live_agents};

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    queue: &mut SpawnQueue,
    events: &mut Vec<SimEvent>,
) {
    run_mines(world, objects, agents, queue, events);
    run_explosions(world, objects, agents);
}

/// A mine fires once, on the first live agent inside its trigger radius.
pub fn run_mines(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    queue: &mut SpawnQueue,
    events: &mut Vec<SimEvent>,
) {
    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::Mine) {
            continue;
        }
        let (Some(body), Some(position), Some(mut mine)) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<MineState>(world, entity),
        ) else {
            continue;
        };
        if mine.triggered {
            continue;
        }
        let Some(victim) = live_agents(world, agents)
            .into_iter()
            .find(|a| position.distance_to(&a.position) <= body.radius)
        else {
            continue;
        };

        mine.triggered = true;
        write(world, entity, mine);
        queue.spawn_explosion(position, mine.explosion_radius);
        damage(world, victim.entity, mine.trigger_damage);
        kill(world, entity);
        debug!(mine = body.id.0, agent = victim.id.0, "mine triggered");
        events.push(SimEvent::MineTriggered {
            mine: body.id,
            agent: victim.id,
        });
    }
}

/// Every live explosion damages each agent inside it once per tick.
pub fn run_explosions(world: &mut World, objects: &[Entity], agents: &[Entity]) {
    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::Explosion) {
            continue;
        }
        let (Some(body), Some(position), Some(mut blast)) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<ExplosionState>(world, entity),
        ) else {
            continue;
        };

        for agent in live_agents(world, agents) {
            if position.distance_to(&agent.position) <= body.radius {
                damage(world, agent.entity, blast.damage);
            }
        }

        blast.remaining = blast.remaining.saturating_sub(1);
        write(world, entity, blast);
        if blast.remaining == 0 {
            kill(world, entity);
        }
    }
}
