//! Elite-drone swarm coordination: target sharing, cohesion and separation.

use glam::DVec2;
use rand::Rng;
use skirmish_core::components::Dna;
use skirmish_core::types::Position;

/// Cohesion needs more than this many neighbours.
const MIN_FLOCK: usize = 2;
/// Cohesion needs at least this much swarm aggression.
const MIN_AGGRESSION: f64 = 0.3;
const COHESION_GAIN: f64 = 0.02;
const SEPARATION_GAIN: f64 = 0.05;

/// Another elite within swarm radius.
#[derive(Debug, Clone, Copy)]
pub struct Mate<T> {
    pub position: Position,
    pub target: Option<T>,
}

/// Neighbourhood radius for a drone with this much swarm aggression.
pub fn neighbourhood(swarm_radius: f64, dna: &Dna) -> f64 {
    swarm_radius * dna.swarm_aggression
}

/// The target most shared among mates (first seen wins ties), adopted always
/// when the drone has no target and with `share_chance` otherwise.
pub fn shared_target<T: Copy + PartialEq>(
    own: Option<T>,
    mates: &[Mate<T>],
    share_chance: f64,
    rng: &mut impl Rng,
) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for t in mates.iter().filter_map(|m| m.target) {
        let count = mates.iter().filter(|m| m.target == Some(t)).count();
        match best {
            Some((_, c)) if c >= count => {}
            _ => best = Some((t, count)),
        }
    }
    let (shared, _) = best?;
    if own.is_none() || rng.gen::<f64>() < share_chance {
        Some(shared)
    } else {
        None
    }
}

/// Cohesion pull toward the mates' centroid plus a push away from mates
/// closer than two body radii.
pub fn formation<T>(position: &Position, radius: f64, dna: &Dna, mates: &[Mate<T>]) -> DVec2 {
    if mates.len() <= MIN_FLOCK || dna.swarm_aggression <= MIN_AGGRESSION {
        return DVec2::ZERO;
    }
    let here = position.as_vec();
    let centroid =
        mates.iter().map(|m| m.position.as_vec()).sum::<DVec2>() / mates.len() as f64;
    let mut delta = (centroid - here) * COHESION_GAIN * dna.swarm_aggression;

    for m in mates {
        if position.distance_to(&m.position) < radius * 2.0 {
            delta -= (m.position.as_vec() - here) * SEPARATION_GAIN * dna.evasiveness;
        }
    }
    delta
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn dna(aggression: f64) -> Dna {
        Dna {
            speed: 0.1,
            fire_rate: 1.0,
            evasiveness: 1.0,
            swarm_aggression: aggression,
            intelligence: 1.0,
        }
    }

    fn mate(x: f64, y: f64, target: Option<u32>) -> Mate<u32> {
        Mate {
            position: Position::new(x, y),
            target,
        }
    }

    #[test]
    fn test_untargeted_drone_adopts_most_common_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mates = [mate(1.0, 0.0, Some(7)), mate(2.0, 0.0, Some(9)), mate(3.0, 0.0, Some(9))];
        assert_eq!(shared_target(None, &mates, 0.0, &mut rng), Some(9));
    }

    #[test]
    fn test_engaged_drone_keeps_target_without_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mates = [mate(1.0, 0.0, Some(7))];
        assert_eq!(shared_target(Some(3), &mates, 0.0, &mut rng), None);
        assert_eq!(shared_target(Some(3), &mates, 1.0, &mut rng), Some(7));
    }

    #[test]
    fn test_no_shared_target_without_mate_targets() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mates = [mate(1.0, 0.0, None)];
        assert_eq!(shared_target(None, &mates, 1.0, &mut rng), None);
    }

    #[test]
    fn test_cohesion_needs_a_flock() {
        let pos = Position::new(0.0, 0.0);
        let two = [mate(10.0, 0.0, None), mate(0.0, 10.0, None)];
        assert_eq!(formation(&pos, 1.0, &dna(1.0), &two), DVec2::ZERO);

        let three = [mate(10.0, 0.0, None), mate(10.0, 0.0, None), mate(10.0, 0.0, None)];
        let pull = formation(&pos, 1.0, &dna(1.0), &three);
        assert!((pull.x - 0.2).abs() < 1e-12);
        assert_eq!(formation(&pos, 1.0, &dna(0.2), &three), DVec2::ZERO);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let pos = Position::new(0.0, 0.0);
        let mates = [mate(1.0, 0.0, None), mate(1.0, 0.0, None), mate(1.0, 0.0, None)];
        let delta = formation(&pos, 1.0, &dna(1.0), &mates);
        // Cohesion 0.02 toward, separation 3 * 0.05 away.
        assert!((delta.x - (0.02 - 0.15)).abs() < 1e-12);
    }
}
