//! Simple drone system: patrol, chase, attack, reproduce.

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use skirmish_core::components::{Body, DroneState, Health};
use skirmish_core::config::SimConfig;
use skirmish_core::enums::EntityKind;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;
use skirmish_hostile_ai::drone::{self, DroneIntent};
use skirmish_hostile_ai::patrol;
use skirmish_hostile_ai::reproduction::{self, Policy};

use crate::links::{is_live_kind, kill, read, write, Target};
use crate::spawn::SpawnQueue;
use crate::systems::{count_live, launch_attack, targetable_agents};
use crate::world_setup::{child_pattern, Blueprint};

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    config: &SimConfig,
    rng: &mut impl Rng,
    queue: &mut SpawnQueue,
    events: &mut Vec<SimEvent>,
) {
    let policy = Policy::new(&config.population, config.population.max_drones);

    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::Drone) {
            continue;
        }
        let (Some(body), Some(mut position), Some(mut state), Some(mut health)) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<DroneState>(world, entity),
            read::<Health>(world, entity),
        ) else {
            continue;
        };

        reproduction::tick(&mut state.reproduction);

        let candidates = targetable_agents(world, agents);
        let spots: Vec<Position> = candidates.iter().map(|a| a.position).collect();
        let target = drone::acquire(&position, &spots, state.attack_range).map(|i| candidates[i]);

        state.fire_timer = state.fire_timer.saturating_sub(1);
        let fire_ready = state.fire_timer == 0;

        match drone::engage(
            &position,
            target.map(|t| t.position),
            state.speed,
            state.fire_range,
            fire_ready,
        ) {
            DroneIntent::Patrol => {
                position = patrol::step(
                    &mut state.patrol,
                    position,
                    state.speed,
                    config.drone.random_walk_period,
                    rng,
                );
            }
            DroneIntent::Chase(step) => position = position.offset(step),
            DroneIntent::Attack(direction) => {
                if launch_attack(queue, entity, EntityKind::Drone, state.role, position, direction) {
                    state.fire_timer = config.drone.fire_cooldown;
                }
            }
            DroneIntent::Hold => {}
        }

        let population = count_live(world, objects, EntityKind::Drone)
            + queue.pending(EntityKind::Drone);
        let mut died = false;
        if reproduction::should_reproduce(
            &state.reproduction,
            health.current,
            population,
            &policy,
            rng,
        ) {
            let offset = reproduction::child_offset(&policy, rng);
            queue.spawn_entity(
                position.offset(offset),
                Blueprint::Drone {
                    role: state.role,
                    pattern: child_pattern(rng),
                    patrol_radius: state.patrol.radius,
                },
            );
            state.reproduction.ticks_since = 0;
            died = health.apply_damage(policy.health_cost);
            debug!(parent = body.id.0, population, "drone reproduced");
            events.push(SimEvent::Reproduced {
                parent: body.id,
                kind: EntityKind::Drone,
            });
        }

        write(world, entity, position);
        write(world, entity, state);
        write(world, entity, health);
        write(world, entity, Target(target.map(|t| t.entity)));
        if died {
            kill(world, entity);
        }
    }
}
