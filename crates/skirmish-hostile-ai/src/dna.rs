//! Heritable elite-drone traits.

use rand::seq::SliceRandom;
use rand::Rng;
use skirmish_core::components::Dna;

/// One heritable trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trait {
    /// Multiplier on base speed.
    Speed,
    FireRate,
    Evasiveness,
    SwarmAggression,
    /// Multiplier on attack and fire range.
    Intelligence,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Trait::Speed,
        Trait::FireRate,
        Trait::Evasiveness,
        Trait::SwarmAggression,
        Trait::Intelligence,
    ];

    /// Inclusive (min, max).
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Trait::Speed => (0.05, 0.2),
            Trait::FireRate => (0.5, 2.0),
            Trait::Evasiveness => (0.0, 1.0),
            Trait::SwarmAggression => (0.0, 1.0),
            Trait::Intelligence => (0.5, 1.5),
        }
    }

    pub fn get(self, dna: &Dna) -> f64 {
        match self {
            Trait::Speed => dna.speed,
            Trait::FireRate => dna.fire_rate,
            Trait::Evasiveness => dna.evasiveness,
            Trait::SwarmAggression => dna.swarm_aggression,
            Trait::Intelligence => dna.intelligence,
        }
    }

    fn slot(self, dna: &mut Dna) -> &mut f64 {
        match self {
            Trait::Speed => &mut dna.speed,
            Trait::FireRate => &mut dna.fire_rate,
            Trait::Evasiveness => &mut dna.evasiveness,
            Trait::SwarmAggression => &mut dna.swarm_aggression,
            Trait::Intelligence => &mut dna.intelligence,
        }
    }
}

/// Movement and engagement stats derived from base values and traits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub speed: f64,
    pub attack_range: f64,
    pub fire_range: f64,
}

/// Uniform draw of every trait within its bounds.
pub fn random_dna(rng: &mut impl Rng) -> Dna {
    let mut dna = Dna {
        speed: 0.0,
        fire_rate: 0.0,
        evasiveness: 0.0,
        swarm_aggression: 0.0,
        intelligence: 0.0,
    };
    for t in Trait::ALL {
        let (lo, hi) = t.bounds();
        *t.slot(&mut dna) = rng.gen_range(lo..=hi);
    }
    dna
}

/// Copy of `dna` with one random trait nudged by up to `step`, clamped to
/// its bounds.
pub fn mutate(dna: &Dna, step: f64, rng: &mut impl Rng) -> Dna {
    let mut child = *dna;
    let t = *Trait::ALL.choose(rng).unwrap_or(&Trait::Speed);
    let (lo, hi) = t.bounds();
    let delta = rng.gen_range(-step..=step);
    let slot = t.slot(&mut child);
    *slot = (*slot + delta).clamp(lo, hi);
    child
}

pub fn apply(dna: &Dna, base_speed: f64, base_attack_range: f64, base_fire_range: f64) -> DerivedStats {
    DerivedStats {
        speed: base_speed * dna.speed,
        attack_range: base_attack_range * dna.intelligence,
        fire_range: base_fire_range * dna.intelligence,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn in_bounds(dna: &Dna) -> bool {
        Trait::ALL.iter().all(|t| {
            let (lo, hi) = t.bounds();
            (lo..=hi).contains(&t.get(dna))
        })
    }

    #[test]
    fn test_random_dna_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            assert!(in_bounds(&random_dna(&mut rng)));
        }
    }

    #[test]
    fn test_mutation_changes_at_most_one_trait() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let parent = random_dna(&mut rng);
        for _ in 0..100 {
            let child = mutate(&parent, 0.1, &mut rng);
            assert!(in_bounds(&child));
            let changed = Trait::ALL
                .iter()
                .filter(|t| t.get(&child) != t.get(&parent))
                .count();
            assert!(changed <= 1);
            for t in Trait::ALL {
                assert!((t.get(&child) - t.get(&parent)).abs() <= 0.1 + 1e-12);
            }
        }
    }

    #[test]
    fn test_apply_scales_ranges_by_intelligence() {
        let dna = Dna {
            speed: 0.1,
            fire_rate: 1.0,
            evasiveness: 0.5,
            swarm_aggression: 0.5,
            intelligence: 1.5,
        };
        let stats = apply(&dna, 0.1, 15.0, 10.0);
        assert!((stats.speed - 0.01).abs() < 1e-12);
        assert!((stats.attack_range - 22.5).abs() < 1e-12);
        assert!((stats.fire_range - 15.0).abs() < 1e-12);
    }
}
