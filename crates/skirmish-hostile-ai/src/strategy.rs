//! Elite-drone strategy table: weighted sampling, periodic adaptation and
//! inheritance.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use skirmish_core::components::StrategyTable;
use skirmish_core::enums::Strategy;

/// More nearby hostiles than this favors evasion.
pub const CROWDED_THRESHOLD: usize = 3;

/// Below this much health the drone favors caution and tricks.
pub const LOW_HEALTH: f64 = 50.0;

/// Bounds of an inherited weight.
const INHERITED_MIN: f64 = 0.1;
const INHERITED_MAX: f64 = 1.0;

/// What the drone observed since the last adaptation.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub nearby_threats: usize,
    pub health: f64,
    pub failed_attacks: u32,
}

/// Result of one adaptation round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adaptation {
    pub previous: Strategy,
    pub current: Strategy,
    /// The failed-attack counter was consumed and must be reset.
    pub reset_failed_attacks: bool,
}

impl Adaptation {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Table with the given weights and a sampled strategy.
pub fn new_table(weights: [f64; 5], rng: &mut impl Rng) -> StrategyTable {
    StrategyTable {
        weights,
        current: sample(&weights, rng),
    }
}

/// Draw a strategy with probability proportional to its weight. Degenerate
/// weights (all zero) fall back to a uniform draw.
pub fn sample(weights: &[f64; 5], rng: &mut impl Rng) -> Strategy {
    let index = match WeightedIndex::new(weights.iter().copied()) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..Strategy::ALL.len()),
    };
    Strategy::ALL[index]
}

/// Scale weights to sum to 1. Negative weights are floored at zero first.
pub fn normalize(weights: &mut [f64; 5]) {
    for w in weights.iter_mut() {
        *w = w.max(0.0);
    }
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    } else {
        *weights = [1.0 / weights.len() as f64; 5];
    }
}

/// Adjust weights from what the drone observed, renormalize and resample.
pub fn adapt(
    table: &mut StrategyTable,
    observation: Observation,
    failed_attack_threshold: u32,
    rng: &mut impl Rng,
) -> Adaptation {
    if observation.nearby_threats > CROWDED_THRESHOLD {
        *table.weight_mut(Strategy::Evasive) += 0.2;
        *table.weight_mut(Strategy::Aggressive) -= 0.1;
    } else if observation.health < LOW_HEALTH {
        *table.weight_mut(Strategy::Cautious) += 0.3;
        *table.weight_mut(Strategy::Trickster) += 0.1;
    }

    let reset_failed_attacks = observation.failed_attacks > failed_attack_threshold;
    if reset_failed_attacks {
        *table.weight_mut(Strategy::Flanker) += 0.2;
        *table.weight_mut(Strategy::Trickster) += 0.1;
    }

    normalize(&mut table.weights);
    let previous = table.current;
    table.current = sample(&table.weights, rng);
    Adaptation {
        previous,
        current: table.current,
        reset_failed_attacks,
    }
}

/// A child's table: each parent weight perturbed by up to `jitter`, kept in
/// [0.1, 1.0], then a fresh sample.
pub fn inherit(parent: &StrategyTable, jitter: f64, rng: &mut impl Rng) -> StrategyTable {
    let mut weights = parent.weights;
    for w in weights.iter_mut() {
        *w = (*w + rng.gen_range(-jitter..=jitter)).clamp(INHERITED_MIN, INHERITED_MAX);
    }
    new_table(weights, rng)
}
