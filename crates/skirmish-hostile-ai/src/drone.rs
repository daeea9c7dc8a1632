//! Simple drone: chase, fire, or patrol.

use glam::DVec2;
use skirmish_core::types::Position;

/// Chasing runs at this multiple of patrol speed.
const CHASE_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DroneIntent {
    /// No target: follow the patrol pattern.
    Patrol,
    /// Close on the target by this displacement.
    Chase(DVec2),
    /// In fire range and off cooldown: attack along this unit direction.
    Attack(DVec2),
    /// In fire range, waiting for the cooldown.
    Hold,
}

/// First candidate within `attack_range`, in collection order.
pub fn acquire(position: &Position, candidates: &[Position], attack_range: f64) -> Option<usize> {
    candidates
        .iter()
        .position(|c| position.distance_to(c) <= attack_range)
}

pub fn engage(
    position: &Position,
    target: Option<Position>,
    speed: f64,
    fire_range: f64,
    fire_ready: bool,
) -> DroneIntent {
    let Some(target) = target else {
        return DroneIntent::Patrol;
    };
    let dir = position.direction_to(&target);
    if position.distance_to(&target) > fire_range {
        DroneIntent::Chase(dir * speed * CHASE_FACTOR)
    } else if fire_ready {
        DroneIntent::Attack(dir)
    } else {
        DroneIntent::Hold
    }
}
