//! Agent pass: perceive, decide, act.
//!
//! Agents go in collection order. Each one computes its sight, picks an
//! action for its role (or takes the queued one if it is `Controlled`),
//! performs it, applies its role's passive effect and finally checks the
//! arena bounds.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use tracing::warn;

use skirmish_core::actions::AgentAction;
use skirmish_core::components::{AgentState, Body, Health};
use skirmish_core::config::SimConfig;
use skirmish_core::enums::{AgentRole, EntityKind};
use skirmish_core::types::Position;

use crate::links::{is_live, kill, read, write};
use crate::spawn::SpawnQueue;
use crate::systems::{damage, live_agents};
use crate::vision::{self, Sight};

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    config: &SimConfig,
    rng: &mut impl Rng,
    queue: &mut SpawnQueue,
) {
    let candidates: Vec<Entity> = objects.iter().chain(agents).copied().collect();

    for &entity in agents {
        if !is_live(world, entity) {
            continue;
        }
        if let Ok(mut agent) = world.get::<&mut AgentState>(entity) {
            agent.cloak_ticks = agent.cloak_ticks.saturating_sub(1);
        }
        let Some(observer) = vision::observer(world, entity) else {
            continue;
        };
        let (Some(body), Some(mut agent)) =
            (read::<Body>(world, entity), read::<AgentState>(world, entity))
        else {
            continue;
        };

        let sight = vision::visible_entities(world, &observer, &candidates);
        agent.effective_range = sight.effective_range;
        agent.effective_fov = sight.effective_fov;

        let mut position = observer.position;
        let action = decide(&mut agent, &position, &sight, rng);
        perform(
            world,
            entity,
            &body,
            &mut agent,
            &mut position,
            action,
            &sight,
            objects,
            config,
            queue,
        );
        agent.last_action = Some(action);

        let out_of_bounds = !(0.0..=config.arena.width).contains(&position.x)
            || !(0.0..=config.arena.height).contains(&position.y);
        if out_of_bounds {
            agent.out_of_bounds_ticks += 1;
        } else {
            agent.out_of_bounds_ticks = 0;
        }
        let expelled = agent.out_of_bounds_ticks > config.arena.out_of_bounds_grace_ticks;

        let role = agent.role;
        let profile = agent.profile;
        write(world, entity, position);
        write(world, entity, agent);

        match role {
            AgentRole::Kamikaze => self_destruct(
                world,
                entity,
                &position,
                objects,
                profile.explosion_range,
                profile.explosion_damage,
            ),
            AgentRole::Support => heal_nearby(
                world,
                entity,
                &position,
                agents,
                profile.heal_range,
                profile.heal_amount,
            ),
            _ => {}
        }

        if expelled {
            if let Ok(mut health) = world.get::<&mut Health>(entity) {
                health.current = 0.0;
            }
            kill(world, entity);
        }
    }
}

fn random_unit(rng: &mut impl Rng) -> DVec2 {
    DVec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)).normalize_or_zero()
}

fn step(delta: DVec2) -> AgentAction {
    AgentAction::Move {
        dx: delta.x,
        dy: delta.y,
    }
}

/// Role policy.
pub fn decide(
    agent: &mut AgentState,
    position: &Position,
    sight: &Sight,
    rng: &mut impl Rng,
) -> AgentAction {
    let profile = agent.profile;
    let nearest_hostile = sight
        .contacts
        .iter()
        .filter(|c| c.kind.is_hostile())
        .min_by(|a, b| {
            position
                .distance_to(&a.position)
                .total_cmp(&position.distance_to(&b.position))
        });

    match agent.role {
        AgentRole::Scout | AgentRole::Support | AgentRole::Heavy => {
            step(random_unit(rng) * profile.speed)
        }
        AgentRole::Sniper => {
            if nearest_hostile.is_some() {
                return AgentAction::Attack;
            }
            let reported = agent.inbox.iter().map(|m| m.position).min_by(|a, b| {
                position.distance_to(a).total_cmp(&position.distance_to(b))
            });
            match reported {
                Some(spot) => step(position.direction_to(&spot) * profile.speed),
                None => step(random_unit(rng)),
            }
        }
        AgentRole::Guard => {
            let post = profile.guard_post.unwrap_or(*position);
            let heading = if position.distance_to(&post) > profile.patrol_radius {
                position.direction_to(&post)
            } else {
                random_unit(rng)
            };
            step(heading * profile.speed)
        }
        AgentRole::Kamikaze => match nearest_hostile {
            Some(c) => step(position.direction_to(&c.position) * profile.speed),
            None => step(random_unit(rng)),
        },
        AgentRole::Controlled => agent.pending_action.take().unwrap_or_default(),
    }
}

/// Whether a body of `radius` at `target` would overlap a movement blocker.
fn blocked(world: &World, objects: &[Entity], target: &Position, radius: f64, margin: f64) -> bool {
    objects.iter().any(|&e| {
        let (Some(body), Some(pos)) = (read::<Body>(world, e), read::<Position>(world, e)) else {
            return false;
        };
        body.alive
            && body.kind.blocks_movement()
            && target.distance_to(&pos) <= radius + body.radius + margin
    })
}

#[allow(clippy::too_many_arguments)]
fn perform(
    world: &World,
    entity: Entity,
    body: &Body,
    agent: &mut AgentState,
    position: &mut Position,
    action: AgentAction,
    sight: &Sight,
    objects: &[Entity],
    config: &SimConfig,
    queue: &mut SpawnQueue,
) {
    agent.last_step = DVec2::ZERO;
    match action {
        AgentAction::Move { dx, dy } => {
            let delta = DVec2::new(dx, dy);
            if delta != DVec2::ZERO {
                agent.facing = dy.atan2(dx);
            }
            let next = position.offset(delta);
            if !blocked(world, objects, &next, body.radius, config.arena.move_block_margin) {
                *position = next;
                agent.last_step = delta;
            }
        }
        AgentAction::Attack => {
            let reach = agent.profile.attack_range;
            let victim = sight.contacts.iter().find(|c| {
                c.kind.is_hostile()
                    && is_live(world, c.entity)
                    && position.distance_to(&c.position) <= reach
            });
            agent.last_attack_success = match victim {
                Some(c) => {
                    damage(world, c.entity, agent.profile.attack_power);
                    true
                }
                None => false,
            };
        }
        AgentAction::Shoot { dx, dy } => {
            let direction = DVec2::new(dx, dy).normalize_or_zero();
            if direction != DVec2::ZERO && agent.energy >= config.agents.shot_cost {
                agent.energy -= config.agents.shot_cost;
                agent.last_attack_success = false;
                queue.spawn_projectile(*position, direction, Some(entity), EntityKind::Agent);
            }
        }
        AgentAction::Wait => {}
        AgentAction::Scan => agent.facing = (agent.facing + agent.fov / 2.0).rem_euclid(TAU),
        AgentAction::Cloak => {
            if agent.energy >= config.agents.cloak_cost {
                agent.energy -= config.agents.cloak_cost;
                agent.cloak_ticks = config.agents.cloak_ticks;
            }
        }
        AgentAction::Unknown => {
            warn!(agent = body.id.0, "unknown action treated as wait");
        }
    }
}

/// Blow up on every live hostile within `range`, paying `amount` per hit
/// until the attacker itself dies.
fn self_destruct(
    world: &World,
    entity: Entity,
    position: &Position,
    objects: &[Entity],
    range: f64,
    amount: f64,
) {
    for &other in objects {
        let (Some(body), Some(pos)) = (read::<Body>(world, other), read::<Position>(world, other))
        else {
            continue;
        };
        if body.alive && body.kind.is_hostile() && position.distance_to(&pos) <= range {
            damage(world, other, amount);
            if damage(world, entity, amount) {
                break;
            }
        }
    }
}

/// Heal every other live agent within `range`.
fn heal_nearby(
    world: &World,
    entity: Entity,
    position: &Position,
    agents: &[Entity],
    range: f64,
    amount: f64,
) {
    for other in live_agents(world, agents) {
        if other.entity == entity || position.distance_to(&other.position) > range {
            continue;
        }
        if let Ok(mut health) = world.get::<&mut Health>(other.entity) {
            health.heal(amount);
        }
    }
}
