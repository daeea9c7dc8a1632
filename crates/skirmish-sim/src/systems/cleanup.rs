//! Cleanup system: prunes dead entities at the end of a tick.

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::debug;

use skirmish_core::components::Body;
use skirmish_core::events::SimEvent;
use skirmish_core::types::EntityId;

/// Collect every dead entity in `orders` into `despawn_buffer`, recording an
/// `EntityDestroyed` event for each.
pub fn collect(
    world: &World,
    orders: [&[Entity]; 2],
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();
    for &entity in orders.into_iter().flatten() {
        let Ok(body) = world.get::<&Body>(entity) else {
            continue;
        };
        if body.alive {
            continue;
        }
        if !body.kind.is_transient() {
            debug!(entity = body.id.0, kind = ?body.kind, "entity destroyed");
        }
        events.push(SimEvent::EntityDestroyed {
            entity: body.id,
            kind: body.kind,
        });
        despawn_buffer.push(entity);
    }
}

/// Remove the collected entities from the world, the collection orders and
/// the id index.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    objects: &mut Vec<Entity>,
    agents: &mut Vec<Entity>,
    ids: &mut HashMap<EntityId, Entity>,
) {
    if despawn_buffer.is_empty() {
        return;
    }
    objects.retain(|e| !despawn_buffer.contains(e));
    agents.retain(|e| !despawn_buffer.contains(e));
    ids.retain(|_, e| !despawn_buffer.contains(e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
