//! Projectile flight and collision.
//!
//! Each tick a projectile ages, then moves, then tests collisions in a fixed
//! precedence; the first rule that matches resolves it:
//!
//! 1. hostile-fired: the first live agent it touches takes damage;
//! 2. agent-fired: the first live hostile it touches takes damage and the
//!    shooter's last attack is marked successful;
//! 3. any walls, decoys or agents it touches absorb it without damage.
//!
//! The owner is never hit by its own projectile. Touching means centers
//! within the sum of the two radii.

use hecs::{Entity, World};

use skirmish_core::components::{AgentState, Body, EliteState, ProjectileState};
use skirmish_core::enums::EntityKind;
use skirmish_core::events::SimEvent;
use skirmish_core::types::Position;

use crate::links::{is_live_kind, kill, read, resolve, write, Owner};
use crate::systems::damage;

/// How a projectile left the world this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    Flying,
    Hit,
    Absorbed,
    Expired,
}

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    events: &mut Vec<SimEvent>,
) {
    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::Projectile) {
            continue;
        }
        let (Some(body), Some(mut position), Some(mut shot), Some(owner)) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<ProjectileState>(world, entity),
            read::<Owner>(world, entity),
        ) else {
            continue;
        };

        shot.ttl = shot.ttl.saturating_sub(1);
        let fate = if shot.ttl == 0 {
            Fate::Expired
        } else {
            position = position.offset(shot.direction * shot.speed);
            collide(world, objects, agents, entity, &body, &position, &shot, &owner, events)
        };

        write(world, entity, position);
        write(world, entity, shot);
        if fate == Fate::Flying {
            continue;
        }
        kill(world, entity);

        if owner.counts_misses {
            if let Some(shooter) = resolve(world, owner.entity) {
                if let Ok(mut elite) = world.get::<&mut EliteState>(shooter) {
                    match fate {
                        Fate::Hit => elite.failed_attacks = 0,
                        _ => elite.failed_attacks += 1,
                    }
                }
            }
        }
    }
}

/// Something a projectile can touch.
struct Obstacle {
    entity: Entity,
    body: Body,
    position: Position,
}

fn obstacles(world: &World, order: &[Entity], skip: &[Option<Entity>]) -> Vec<Obstacle> {
    order
        .iter()
        .filter(|e| !skip.contains(&Some(**e)))
        .filter_map(|&entity| {
            let body = read::<Body>(world, entity)?;
            if !body.alive {
                return None;
            }
            Some(Obstacle {
                entity,
                body,
                position: read::<Position>(world, entity)?,
            })
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn collide(
    world: &World,
    objects: &[Entity],
    agents: &[Entity],
    me: Entity,
    body: &Body,
    position: &Position,
    shot: &ProjectileState,
    owner: &Owner,
    events: &mut Vec<SimEvent>,
) -> Fate {
    let skip = [Some(me), owner.entity];
    let touches = |o: &Obstacle| position.distance_to(&o.position) <= body.radius + o.body.radius;
    let agent_list = obstacles(world, agents, &skip);

    if owner.kind.is_hostile() {
        if let Some(victim) = agent_list.iter().find(|o| touches(o)) {
            damage(world, victim.entity, shot.damage);
            events.push(SimEvent::ProjectileHit {
                projectile: body.id,
                victim: victim.body.id,
                damage: shot.damage,
            });
            return Fate::Hit;
        }
    }

    let object_list = obstacles(world, objects, &skip);
    if owner.kind == EntityKind::Agent {
        if let Some(victim) = object_list
            .iter()
            .find(|o| o.body.kind.is_hostile() && touches(o))
        {
            damage(world, victim.entity, shot.damage);
            if let Some(shooter) = resolve(world, owner.entity) {
                if let Ok(mut agent) = world.get::<&mut AgentState>(shooter) {
                    agent.last_attack_success = true;
                }
            }
            events.push(SimEvent::ProjectileHit {
                projectile: body.id,
                victim: victim.body.id,
                damage: shot.damage,
            });
            return Fate::Hit;
        }
    }

    let absorbs = |o: &&Obstacle| {
        matches!(o.body.kind, EntityKind::Wall | EntityKind::Decoy | EntityKind::Agent)
    };
    if object_list
        .iter()
        .chain(agent_list.iter())
        .filter(absorbs)
        .any(|o| touches(o))
    {
        return Fate::Absorbed;
    }
    Fate::Flying
}
