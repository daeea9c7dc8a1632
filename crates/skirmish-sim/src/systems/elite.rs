//! Elite drone system.
//!
//! Per drone, in order: strategy adaptation on its interval, target
//! selection, swarm target sharing and formation, strategy tactics (or the
//! pattern mixer when idle), then reproduction with mutation.

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use skirmish_core::components::{Body, EliteState, Health};
use skirmish_core::config::SimConfig;
use skirmish_core::enums::EntityKind;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;
use skirmish_hostile_ai::dna;
use skirmish_hostile_ai::mixer::{self, MixDurations};
use skirmish_hostile_ai::reproduction::{self, Policy};
use skirmish_hostile_ai::strategy::{self, Observation};
use skirmish_hostile_ai::swarm::{self, Mate};
use skirmish_hostile_ai::tactics::{self, TacticsContext};
use skirmish_hostile_ai::targeting::{self, TargetCandidate};

use crate::links::{is_live_kind, kill, read, resolve, write, Target};
use crate::spawn::SpawnQueue;
use crate::systems::{count_live, launch_attack, targetable_agents, AgentView};
use crate::world_setup::{child_pattern, Blueprint};

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    config: &SimConfig,
    rng: &mut impl Rng,
    queue: &mut SpawnQueue,
    events: &mut Vec<SimEvent>,
    tick: u64,
) {
    let policy = Policy::new(&config.population, config.population.max_elite_drones);
    let durations = MixDurations {
        min: config.elite.mix_duration_min,
        max: config.elite.mix_duration_max,
    };

    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::EliteDrone) {
            continue;
        }
        let (Some(body), Some(mut position), Some(mut state), Some(mut health)) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<EliteState>(world, entity),
            read::<Health>(world, entity),
        ) else {
            continue;
        };
        let elite = &config.elite;

        reproduction::tick(&mut state.reproduction);

        state.adaptation_timer += 1;
        if state.adaptation_timer >= elite.adaptation_interval {
            state.adaptation_timer = 0;
            let observation = Observation {
                nearby_threats: threats_near(world, objects, entity, &position, elite.threat_radius),
                health: health.current,
                failed_attacks: state.failed_attacks,
            };
            let outcome = strategy::adapt(
                &mut state.strategy,
                observation,
                elite.failed_attack_threshold,
                rng,
            );
            if outcome.reset_failed_attacks {
                state.failed_attacks = 0;
            }
            if outcome.changed() {
                debug!(
                    drone = body.id.0,
                    from = ?outcome.previous,
                    to = ?outcome.current,
                    "elite strategy changed"
                );
                events.push(SimEvent::StrategyChanged {
                    drone: body.id,
                    from: outcome.previous,
                    to: outcome.current,
                });
            }
        }

        let candidates = targetable_agents(world, agents);
        let scored: Vec<TargetCandidate<usize>> = candidates
            .iter()
            .enumerate()
            .map(|(i, a)| TargetCandidate {
                id: i,
                position: a.position,
                health: a.health,
                max_health: a.max_health,
            })
            .collect();
        let mut target: Option<AgentView> = targeting::select(
            &position,
            state.attack_range,
            state.strategy.current,
            &scored,
        )
        .map(|i| candidates[i]);

        let mates = mates_near(
            world,
            objects,
            entity,
            &position,
            swarm::neighbourhood(elite.swarm_radius, &state.dna),
        );
        if !mates.is_empty() {
            let shared =
                swarm::shared_target(target.map(|t| t.entity), &mates, elite.swarm_share_chance, rng);
            if let Some(view) = shared.and_then(|e| candidates.iter().find(|c| c.entity == e)) {
                target = Some(*view);
            }
            position = position.offset(swarm::formation(&position, body.radius, &state.dna, &mates));
        }

        match target {
            Some(t) => {
                state.last_known_target = Some(t.position);
                let ctx = TacticsContext {
                    position,
                    target: t.position,
                    strategy: state.strategy.current,
                    dna: state.dna,
                    speed: state.speed,
                    fire_range: state.fire_range,
                    phase: state.patrol.phase,
                    time: tick,
                };
                let outcome = tactics::engage(&ctx, elite, rng);
                position = position.offset(outcome.displacement);
                state.patrol.phase += outcome.phase_delta;
                if let Some(direction) = outcome.feint {
                    queue.spawn_projectile(position, direction, Some(entity), EntityKind::EliteDrone);
                }
                if outcome.decoy {
                    queue.spawn_decoy(position, None);
                }
                if outcome.attack {
                    let direction =
                        tactics::lead_direction(&position, &t.position, t.last_step, state.fire_range);
                    if !launch_attack(
                        queue,
                        entity,
                        EntityKind::EliteDrone,
                        state.role,
                        position,
                        direction,
                    ) {
                        state.failed_attacks += 1;
                    }
                }
            }
            None => {
                position = mixer::step(
                    &mut state.mixer,
                    &mut state.patrol,
                    position,
                    state.speed,
                    config.drone.random_walk_period,
                    durations,
                    rng,
                );
            }
        }

        let population = count_live(world, objects, EntityKind::EliteDrone)
            + queue.pending(EntityKind::EliteDrone);
        let mut died = false;
        if reproduction::should_reproduce(
            &state.reproduction,
            health.current,
            population,
            &policy,
            rng,
        ) {
            let offset = reproduction::child_offset(&policy, rng);
            let child_dna = dna::mutate(&state.dna, elite.mutation_step, rng);
            let child_strategy = strategy::inherit(&state.strategy, elite.weight_jitter, rng);
            queue.spawn_entity(
                position.offset(offset),
                Blueprint::EliteDrone {
                    role: state.role,
                    pattern: child_pattern(rng),
                    patrol_radius: state.patrol.radius,
                    dna: Some(child_dna),
                    strategy: Some(child_strategy),
                },
            );
            state.reproduction.ticks_since = 0;
            died = health.apply_damage(policy.health_cost);
            debug!(parent = body.id.0, population, "elite drone reproduced");
            events.push(SimEvent::Reproduced {
                parent: body.id,
                kind: EntityKind::EliteDrone,
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

/// Live hostiles other than `me` within `radius`.
fn threats_near(
    world: &World,
    objects: &[Entity],
    me: Entity,
    position: &Position,
    radius: f64,
) -> usize {
    objects
        .iter()
        .filter(|&&e| e != me)
        .filter_map(|&e| {
            let mut query = world.query_one::<(&Body, &Position)>(e).ok()?;
            let (body, pos) = query.get()?;
            (body.alive && body.kind.is_hostile() && position.distance_to(pos) <= radius)
                .then_some(())
        })
        .count()
}

/// Other live elites strictly within `radius`, with their current targets.
fn mates_near(
    world: &World,
    objects: &[Entity],
    me: Entity,
    position: &Position,
    radius: f64,
) -> Vec<Mate<Entity>> {
    objects
        .iter()
        .filter(|&&e| e != me && is_live_kind(world, e, EntityKind::EliteDrone))
        .filter_map(|&e| {
            let pos = read::<Position>(world, e)?;
            if position.distance_to(&pos) >= radius {
                return None;
            }
            let target = world.get::<&Target>(e).ok().and_then(|t| t.0);
            Some(Mate {
                position: pos,
                target: resolve(world, target),
            })
        })
        .collect()
}
