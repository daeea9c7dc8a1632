//! Kamikaze system: acquire, close in, charge, detonate.

use hecs::{Entity, World};
use tracing::debug;

use skirmish_core::components::{Body, KamikazeState};
use skirmish_core::enums::{EntityKind, KamikazePhase};
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;
use skirmish_hostile_ai::kamikaze::{self, KamikazeContext};

use crate::links::{is_live_kind, kill, read, resolve, write, Target};
use crate::spawn::SpawnQueue;
use crate::systems::{damage, live_agents, targetable_agents};

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    queue: &mut SpawnQueue,
    events: &mut Vec<SimEvent>,
) {
    let walls: Vec<Position> = objects
        .iter()
        .filter(|&&e| is_live_kind(world, e, EntityKind::Wall))
        .filter_map(|&e| read::<Position>(world, e))
        .collect();

    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::Kamikaze) {
            continue;
        }
        let (Some(body), Some(position), Some(mut state), Some(Target(held))) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<KamikazeState>(world, entity),
            read::<Target>(world, entity),
        ) else {
            continue;
        };
        if state.phase == KamikazePhase::Detonated {
            continue;
        }

        let candidates = targetable_agents(world, agents);
        let target = resolve(world, held)
            .and_then(|e| candidates.iter().find(|a| a.entity == e))
            .or_else(|| {
                let spots: Vec<Position> = candidates.iter().map(|a| a.position).collect();
                kamikaze::acquire(&position, &spots, state.activation_radius).map(|i| &candidates[i])
            })
            .copied();

        let update = kamikaze::evaluate(
            &state,
            &KamikazeContext {
                position,
                target: target.map(|t| t.position),
                walls: &walls,
            },
        );
        state.phase = update.new_phase;
        state.timer = update.new_timer;
        write(world, entity, update.new_position);
        write(world, entity, Target(target.map(|t| t.entity)));

        if update.detonate {
            let blast = update.new_position;
            queue.spawn_explosion(blast, state.explosion_radius);
            for agent in live_agents(world, agents) {
                if blast.distance_to(&agent.position) <= state.explosion_radius {
                    damage(world, agent.entity, state.explosion_damage);
                }
            }
            kill(world, entity);
            debug!(kamikaze = body.id.0, x = blast.x, y = blast.y, "kamikaze detonated");
            events.push(SimEvent::KamikazeDetonated {
                kamikaze: body.id,
                position: blast,
            });
        }
        write(world, entity, state);
    }
}
