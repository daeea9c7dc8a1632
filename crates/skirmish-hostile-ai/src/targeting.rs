//! Elite-drone target selection.

use skirmish_core::enums::Strategy;
use skirmish_core::types::Position;

/// Engagement radius multiplier for the aggressive strategy.
const AGGRESSIVE_REACH: f64 = 1.2;
const PROXIMITY_WEIGHT: f64 = 0.6;
const DEFICIT_WEIGHT: f64 = 0.4;

/// A live, uncloaked agent.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate<T> {
    pub id: T,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
}

impl<T> TargetCandidate<T> {
    fn health_fraction(&self) -> f64 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// Score of one candidate at distance `dist`. Closer and more damaged is
/// better; the cautious strategy scales by the target's remaining health.
pub fn score(dist: f64, attack_range: f64, health_fraction: f64, strategy: Strategy) -> f64 {
    let proximity = if attack_range > 0.0 {
        1.0 - dist / attack_range
    } else {
        0.0
    };
    let mut s = proximity * PROXIMITY_WEIGHT + (1.0 - health_fraction) * DEFICIT_WEIGHT;
    if strategy == Strategy::Cautious {
        s *= health_fraction;
    }
    s
}

/// Best-scoring candidate within reach. Ties go to the earlier candidate.
pub fn select<T: Copy>(
    position: &Position,
    attack_range: f64,
    strategy: Strategy,
    candidates: &[TargetCandidate<T>],
) -> Option<T> {
    let reach = if strategy == Strategy::Aggressive {
        attack_range * AGGRESSIVE_REACH
    } else {
        attack_range
    };

    let mut best: Option<(T, f64)> = None;
    for c in candidates {
        let dist = position.distance_to(&c.position);
        if dist > reach {
            continue;
        }
        let s = score(dist, attack_range, c.health_fraction(), strategy);
        match best {
            Some((_, bs)) if bs >= s => {}
            _ => best = Some((c.id, s)),
        }
    }
    best.map(|(id, _)| id)
}
