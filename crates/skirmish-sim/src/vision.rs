//! Field-of-view perception.
//!
//! Two passes over the candidate set. The effect pass collects walls as
//! occluders, compounds smoke penalties onto the observer's range, and
//! short-circuits inside a vision jammer. The visibility pass keeps what is
//! in range, inside the cone, not behind a wall and not cloaked.

use hecs::{Entity, World};

use skirmish_core::components::{AgentState, Body, ZoneState};
use skirmish_core::enums::{EntityKind, ZoneEffect};
use skirmish_core::geometry::{angle_difference, is_occluded, within, Occluder};
use skirmish_core::types::{EntityId, Position};

/// Who is looking, from where, and with what sensor.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub entity: Entity,
    pub position: Position,
    pub facing: f64,
    pub range: f64,
    /// Full field of view in radians.
    pub fov: f64,
}

/// A visible entity.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub entity: Entity,
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
}

#[derive(Debug, Clone, Default)]
pub struct Sight {
    pub contacts: Vec<Contact>,
    pub effective_range: f64,
    pub effective_fov: f64,
    /// The observer stands in a vision jammer.
    pub jammed: bool,
}

/// The observer for a live agent.
pub fn observer(world: &World, entity: Entity) -> Option<Observer> {
    let mut query = world
        .query_one::<(&Body, &Position, &AgentState)>(entity)
        .ok()?;
    let (body, pos, agent) = query.get()?;
    if !body.alive {
        return None;
    }
    Some(Observer {
        entity,
        position: *pos,
        facing: agent.facing,
        range: agent.range,
        fov: agent.fov,
    })
}

struct Candidate {
    entity: Entity,
    body: Body,
    position: Position,
    zone: Option<ZoneEffect>,
    cloaked: bool,
}

fn gather(world: &World, candidates: &[Entity]) -> Vec<Candidate> {
    candidates
        .iter()
        .filter_map(|&entity| {
            let mut query = world.query_one::<(&Body, &Position)>(entity).ok()?;
            let (body, position) = query.get()?;
            if !body.alive {
                return None;
            }
            let zone = world.get::<&ZoneState>(entity).ok().map(|z| z.effect);
            let cloaked = world
                .get::<&AgentState>(entity)
                .map(|a| a.is_cloaked())
                .unwrap_or(false);
            Some(Candidate {
                entity,
                body: *body,
                position: *position,
                zone,
                cloaked,
            })
        })
        .collect()
}

fn contact(c: &Candidate) -> Contact {
    Contact {
        entity: c.entity,
        id: c.body.id,
        kind: c.body.kind,
        position: c.position,
    }
}

/// Entities `observer` can see among `candidates`.
pub fn visible_entities(world: &World, observer: &Observer, candidates: &[Entity]) -> Sight {
    let others: Vec<Candidate> = gather(world, candidates)
        .into_iter()
        .filter(|c| c.entity != observer.entity)
        .collect();

    let mut occluders = Vec::new();
    let mut range = observer.range;
    for c in &others {
        if c.body.kind.blocks_vision() {
            occluders.push(Occluder {
                position: c.position,
                radius: c.body.radius,
            });
        }
        match c.zone {
            Some(ZoneEffect::Smoke { vision_penalty })
                if within(&c.position, &observer.position, c.body.radius) =>
            {
                range *= vision_penalty;
            }
            Some(ZoneEffect::VisionJammer)
                if within(&c.position, &observer.position, c.body.radius) =>
            {
                return Sight {
                    contacts: vec![contact(c)],
                    effective_range: 0.0,
                    effective_fov: observer.fov,
                    jammed: true,
                };
            }
            _ => {}
        }
    }

    let half_fov = observer.fov / 2.0;
    let contacts = others
        .iter()
        .filter(|c| {
            if c.cloaked || observer.position.distance_to(&c.position) > range {
                return false;
            }
            if !c.body.kind.blocks_vision() && is_occluded(&observer.position, &c.position, &occluders)
            {
                return false;
            }
            let bearing = observer.position.bearing_to(&c.position);
            angle_difference(bearing, observer.facing).abs() <= half_fov
        })
        .map(contact)
        .collect();

    Sight {
        contacts,
        effective_range: range,
        effective_fov: observer.fov,
        jammed: false,
    }
}
