//! Deferred spawning.
//!
//! Systems never add entities to the world mid-pass. They queue requests
//! here and the engine flushes the queue once every system has run, so a
//! spawned entity first acts on the following tick.

use glam::DVec2;
use hecs::Entity;

use skirmish_core::config::ZoneConfig;
use skirmish_core::enums::{EntityKind, ZoneEffect};
use skirmish_core::types::Position;

use crate::world_setup::Blueprint;

#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub position: Position,
    pub blueprint: Blueprint,
}

/// Spawn requests for the current tick, in request order.
#[derive(Debug, Clone)]
pub struct SpawnQueue {
    zones: ZoneConfig,
    requests: Vec<SpawnRequest>,
}

impl SpawnQueue {
    pub fn new(zones: ZoneConfig) -> Self {
        Self {
            zones,
            requests: Vec::new(),
        }
    }

    pub fn spawn_entity(&mut self, position: Position, blueprint: Blueprint) {
        self.requests.push(SpawnRequest {
            position,
            blueprint,
        });
    }

    pub fn spawn_projectile(
        &mut self,
        origin: Position,
        direction: DVec2,
        owner: Option<Entity>,
        owner_kind: EntityKind,
    ) {
        self.push_projectile(origin, direction, owner, owner_kind, false);
    }

    /// A projectile whose expiry counts as a failed attack for its owner.
    pub fn spawn_scored_projectile(
        &mut self,
        origin: Position,
        direction: DVec2,
        owner: Entity,
        owner_kind: EntityKind,
    ) {
        self.push_projectile(origin, direction, Some(owner), owner_kind, true);
    }

    fn push_projectile(
        &mut self,
        origin: Position,
        direction: DVec2,
        owner: Option<Entity>,
        owner_kind: EntityKind,
        counts_misses: bool,
    ) {
        self.spawn_entity(
            origin,
            Blueprint::Projectile {
                direction,
                owner,
                owner_kind,
                counts_misses,
            },
        );
    }

    pub fn spawn_explosion(&mut self, center: Position, radius: f64) {
        self.spawn_entity(center, Blueprint::Explosion { radius });
    }

    pub fn spawn_comm_jammer(&mut self, position: Position, falsify: bool, moving: bool) {
        let radius = self.zones.comm_jammer_radius;
        self.push_zone(position, ZoneEffect::CommJammer { falsify }, radius, moving);
    }

    pub fn spawn_vision_jammer(&mut self, position: Position, moving: bool) {
        let radius = self.zones.vision_jammer_radius;
        self.push_zone(position, ZoneEffect::VisionJammer, radius, moving);
    }

    pub fn spawn_smoke_zone(&mut self, position: Position, moving: bool) {
        let effect = ZoneEffect::Smoke {
            vision_penalty: self.zones.smoke_vision_penalty,
        };
        let radius = self.zones.smoke_radius;
        self.push_zone(position, effect, radius, moving);
    }

    /// Deployed zones expire after the configured lifetime.
    fn push_zone(&mut self, position: Position, effect: ZoneEffect, radius: f64, moving: bool) {
        let drift_speed = if moving { self.zones.drift_speed } else { 0.0 };
        self.spawn_entity(
            position,
            Blueprint::Zone {
                effect,
                radius,
                ttl: Some(self.zones.deployed_ttl),
                drift_speed,
            },
        );
    }

    pub fn spawn_decoy(&mut self, position: Position, lifespan: Option<u32>) {
        let lifespan = lifespan.unwrap_or(self.zones.decoy_lifespan);
        self.spawn_entity(position, Blueprint::Decoy { lifespan });
    }

    /// Queued requests of one kind; counted against population caps.
    pub fn pending(&self, kind: EntityKind) -> usize {
        self.requests
            .iter()
            .filter(|r| r.blueprint.kind() == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, SpawnRequest> {
        self.requests.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use skirmish_core::config::SimConfig;

    use super::*;

    fn queue() -> SpawnQueue {
        let config = SimConfig::default();
        SpawnQueue::new(config.zones)
    }

    #[test]
    fn test_deployed_zones_expire_and_drift_only_when_moving() {
        let mut q = queue();
        q.spawn_smoke_zone(Position::new(0.0, 0.0), true);
        q.spawn_vision_jammer(Position::new(0.0, 0.0), false);
        let requests: Vec<_> = q.drain().collect();
        match (&requests[0].blueprint, &requests[1].blueprint) {
            (
                Blueprint::Zone {
                    ttl: Some(a),
                    drift_speed: da,
                    ..
                },
                Blueprint::Zone {
                    ttl: Some(b),
                    drift_speed: db,
                    ..
                },
            ) => {
                assert_eq!(*a, 15);
                assert_eq!(*b, 15);
                assert!(*da > 0.0);
                assert_eq!(*db, 0.0);
            }
            other => panic!("unexpected blueprints {other:?}"),
        }
    }

    #[test]
    fn test_pending_counts_by_kind() {
        let mut q = queue();
        q.spawn_decoy(Position::new(1.0, 1.0), None);
        q.spawn_explosion(Position::new(1.0, 1.0), 3.0);
        q.spawn_explosion(Position::new(2.0, 1.0), 3.0);
        assert_eq!(q.pending(EntityKind::Explosion), 2);
        assert_eq!(q.pending(EntityKind::Decoy), 1);
        assert_eq!(q.pending(EntityKind::Drone), 0);
        assert_eq!(q.len(), 3);
    }
}
