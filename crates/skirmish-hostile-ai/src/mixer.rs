//! Elite-drone pattern mixer.
//!
//! While a mix is in progress the drone's position is a linear blend of the
//! base and target patterns, both sampled at the same phase. When the mix
//! completes the target becomes the new base and a fresh target is drawn.

use rand::seq::SliceRandom;
use rand::Rng;
use skirmish_core::components::{PatrolState, PatternMixer};
use skirmish_core::enums::PatrolPattern;
use skirmish_core::types::Position;

use crate::patrol;

/// Patterns an elite may drift toward.
pub const MIX_CANDIDATES: [PatrolPattern; 5] = [
    PatrolPattern::Circle,
    PatrolPattern::Lemniscate,
    PatrolPattern::RandomWalk,
    PatrolPattern::Square,
    PatrolPattern::Ellipse,
];

/// Range of mix durations in ticks (inclusive).
#[derive(Debug, Clone, Copy)]
pub struct MixDurations {
    pub min: u32,
    pub max: u32,
}

pub fn new_mixer(base: PatrolPattern, durations: MixDurations, rng: &mut impl Rng) -> PatternMixer {
    PatternMixer {
        base,
        target: pick_target(rng),
        elapsed: 0,
        duration: pick_duration(durations, rng),
    }
}

/// Advance the mixer and the patrol by one tick and return the new
/// position. Keeps `patrol.pattern` equal to the mixer's base pattern.
pub fn step(
    mixer: &mut PatternMixer,
    patrol: &mut PatrolState,
    current: Position,
    speed: f64,
    random_walk_period: u32,
    durations: MixDurations,
    rng: &mut impl Rng,
) -> Position {
    if mixer.elapsed >= mixer.duration {
        mixer.base = mixer.target;
        mixer.target = pick_target(rng);
        mixer.elapsed = 0;
        mixer.duration = pick_duration(durations, rng);
        patrol.pattern = mixer.base;
        return patrol::step(patrol, current, speed, random_walk_period, rng);
    }

    mixer.elapsed += 1;
    let ratio = f64::from(mixer.elapsed) / f64::from(mixer.duration.max(1));

    patrol.pattern = mixer.base;
    patrol.phase += patrol::phase_rate(mixer.base, speed);
    let from = patrol::sample(mixer.base, patrol, current, speed, random_walk_period, rng);
    let to = patrol::sample(mixer.target, patrol, current, speed, random_walk_period, rng);
    from.lerp(&to, ratio)
}

fn pick_target(rng: &mut impl Rng) -> PatrolPattern {
    MIX_CANDIDATES
        .choose(rng)
        .copied()
        .unwrap_or_default()
}

fn pick_duration(durations: MixDurations, rng: &mut impl Rng) -> u32 {
    rng.gen_range(durations.min..=durations.max.max(durations.min))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const DURATIONS: MixDurations = MixDurations { min: 200, max: 500 };

    #[test]
    fn test_blend_ends_on_target_pattern() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let center = Position::new(50.0, 50.0);
        let mut patrol = patrol::new_patrol(PatrolPattern::Circle, center, 10.0, &mut rng);
        let mut mixer = PatternMixer {
            base: PatrolPattern::Circle,
            target: PatrolPattern::Ellipse,
            elapsed: 0,
            duration: 4,
        };

        let mut pos = center;
        for _ in 0..4 {
            pos = step(&mut mixer, &mut patrol, pos, 0.1, 60, DURATIONS, &mut rng);
        }
        // Ratio 1 on the last blended tick: pure ellipse at the current phase.
        let expected = Position::new(
            50.0 + 10.0 * patrol.phase.cos(),
            50.0 + 6.0 * patrol.phase.sin(),
        );
        assert!(pos.distance_to(&expected) < 1e-9);
    }

    #[test]
    fn test_mix_completion_commits_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let center = Position::new(0.0, 0.0);
        let mut patrol = patrol::new_patrol(PatrolPattern::Circle, center, 10.0, &mut rng);
        let mut mixer = PatternMixer {
            base: PatrolPattern::Circle,
            target: PatrolPattern::Square,
            elapsed: 2,
            duration: 2,
        };
        step(&mut mixer, &mut patrol, center, 0.1, 60, DURATIONS, &mut rng);
        assert_eq!(mixer.base, PatrolPattern::Square);
        assert_eq!(patrol.pattern, PatrolPattern::Square);
        assert_eq!(mixer.elapsed, 0);
        assert!((200..=500).contains(&mixer.duration));
        assert!(MIX_CANDIDATES.contains(&mixer.target));
    }
}
