//! Weak references between entities.
//!
//! Targets and projectile owners are `hecs::Entity` handles. A handle is
//! generation-checked by the world, and only counts while the referent's
//! `Body` is still alive; every use goes through `resolve`.

use hecs::{Component, Entity, World};
use skirmish_core::components::Body;
use skirmish_core::enums::EntityKind;

/// The entity a hostile is engaging.
#[derive(Debug, Clone, Copy, Default)]
pub struct Target(pub Option<Entity>);

/// Who fired a projectile.
#[derive(Debug, Clone, Copy)]
pub struct Owner {
    pub entity: Option<Entity>,
    /// Allegiance captured at spawn time.
    pub kind: EntityKind,
    /// Expiring without a hit counts as a failed attack for the owner.
    pub counts_misses: bool,
}

pub fn is_live(world: &World, entity: Entity) -> bool {
    world.get::<&Body>(entity).map(|b| b.alive).unwrap_or(false)
}

/// Live entity of the given kind.
pub fn is_live_kind(world: &World, entity: Entity, kind: EntityKind) -> bool {
    world
        .get::<&Body>(entity)
        .map(|b| b.alive && b.kind == kind)
        .unwrap_or(false)
}

/// The referenced entity, if it still exists and is alive.
pub fn resolve(world: &World, reference: Option<Entity>) -> Option<Entity> {
    reference.filter(|e| is_live(world, *e))
}

/// Copy of one component.
pub fn read<T: Component + Clone>(world: &World, entity: Entity) -> Option<T> {
    world.get::<&T>(entity).ok().map(|c| (*c).clone())
}

/// Overwrite one component; a missing entity or component is ignored.
pub fn write<T: Component>(world: &World, entity: Entity, value: T) {
    if let Ok(mut slot) = world.get::<&mut T>(entity) {
        *slot = value;
    }
}

/// Clear the liveness flag. The entity is pruned at the end of the tick.
pub fn kill(world: &World, entity: Entity) {
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        body.alive = false;
    }
}
