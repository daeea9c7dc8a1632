//! Parametric patrol curves.
//!
//! Curve patterns are a function of (center, radius, phase). The two random
//! patterns step from the drone's current position and keep a little state
//! (heading and timer, or the current waypoint) in `PatrolState`.

use std::f64::consts::{FRAC_PI_2, SQRT_2};

use glam::DVec2;
use rand::Rng;
use skirmish_core::components::PatrolState;
use skirmish_core::enums::PatrolPattern;
use skirmish_core::types::Position;

/// Ellipse minor axis as a fraction of the radius.
const ELLIPSE_MINOR: f64 = 0.6;
const LEMNISCATE_SCALE: f64 = 0.5;
/// Spiral radius growth per radian of phase.
const SPIRAL_GROWTH: f64 = 0.05;
/// Random walk turns back toward home beyond this many radii.
const RANDOM_WALK_LEASH: f64 = 1.5;

/// Fresh patrol state centered on `center`.
pub fn new_patrol(
    pattern: PatrolPattern,
    center: Position,
    radius: f64,
    rng: &mut impl Rng,
) -> PatrolState {
    PatrolState {
        pattern,
        center,
        radius: radius.abs(),
        phase: 0.0,
        random_direction: random_heading(rng),
        random_timer: 0,
        waypoint: None,
    }
}

/// Phase advance per tick for `pattern` at `speed`.
pub fn phase_rate(pattern: PatrolPattern, speed: f64) -> f64 {
    if pattern.is_random() {
        speed * 0.5
    } else {
        speed
    }
}

/// Advance one tick along the state's own pattern and return the new
/// position.
pub fn step(
    state: &mut PatrolState,
    current: Position,
    speed: f64,
    random_walk_period: u32,
    rng: &mut impl Rng,
) -> Position {
    let pattern = state.pattern;
    state.phase += phase_rate(pattern, speed);
    let next = sample(pattern, state, current, speed, random_walk_period, rng);
    if pattern == PatrolPattern::Square {
        // Square corners are keyed by phase and run a half step faster.
        state.phase += speed * 0.5;
    }
    next
}

/// Position on `pattern` at the state's current phase. Random patterns
/// update their own bookkeeping in `state`.
pub fn sample(
    pattern: PatrolPattern,
    state: &mut PatrolState,
    current: Position,
    speed: f64,
    random_walk_period: u32,
    rng: &mut impl Rng,
) -> Position {
    let c = state.center.as_vec();
    let r = state.radius;
    let phase = state.phase;
    match pattern {
        PatrolPattern::Circle => Position::from(c + r * unit(phase)),
        PatrolPattern::Ellipse => Position::new(
            c.x + r * phase.cos(),
            c.y + r * ELLIPSE_MINOR * phase.sin(),
        ),
        PatrolPattern::Lemniscate => {
            let t = phase * 2.0;
            let rho = r * SQRT_2 * t.cos() / (1.0 + t.sin().powi(2));
            Position::from(c + rho * LEMNISCATE_SCALE * unit(t))
        }
        PatrolPattern::Spiral => {
            let rho = r * (1.0 + SPIRAL_GROWTH * phase.rem_euclid(std::f64::consts::TAU));
            Position::from(c + rho * unit(phase))
        }
        PatrolPattern::Square => square_point(c, r, phase),
        PatrolPattern::RandomWalk => random_walk(state, current, speed, random_walk_period, rng),
        PatrolPattern::RandomWaypoint => random_waypoint(state, current, speed, rng),
    }
}

fn unit(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

fn random_heading(rng: &mut impl Rng) -> DVec2 {
    DVec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
}

/// Piecewise-linear walk around the square of half-size `half`, one side per
/// quarter turn of phase.
fn square_point(center: DVec2, half: f64, phase: f64) -> Position {
    let corners = [
        center + DVec2::new(-half, -half),
        center + DVec2::new(half, -half),
        center + DVec2::new(half, half),
        center + DVec2::new(-half, half),
    ];
    let side = (phase / FRAC_PI_2).floor().rem_euclid(4.0) as usize;
    let progress = phase.rem_euclid(FRAC_PI_2) / FRAC_PI_2;
    let from = corners[side];
    let to = corners[(side + 1) % 4];
    Position::from(from.lerp(to, progress))
}

fn random_walk(
    state: &mut PatrolState,
    current: Position,
    speed: f64,
    period: u32,
    rng: &mut impl Rng,
) -> Position {
    state.random_timer += 1;
    if state.random_timer > period {
        state.random_direction = random_heading(rng);
        state.random_timer = 0;
    }
    let next = current.offset(state.random_direction * speed);

    let home = state.center.as_vec() - next.as_vec();
    let dist = home.length();
    if dist > state.radius * RANDOM_WALK_LEASH {
        state.random_direction = home / dist;
    }
    next
}

fn random_waypoint(
    state: &mut PatrolState,
    current: Position,
    speed: f64,
    rng: &mut impl Rng,
) -> Position {
    let half = state.radius.abs();
    let center = state.center;
    let waypoint = match state.waypoint {
        Some(w) => w,
        None => {
            let w = point_in_square(center, half, rng);
            state.waypoint = Some(w);
            w
        }
    };

    let dist = current.distance_to(&waypoint);
    let mut next = current;
    if dist < speed * 2.0 {
        state.waypoint = Some(point_in_square(center, half, rng));
    } else if dist > 0.0 {
        next = current.offset(current.direction_to(&waypoint) * speed);
    }

    Position::new(
        next.x.clamp(center.x - half, center.x + half),
        next.y.clamp(center.y - half, center.y + half),
    )
}

fn point_in_square(center: Position, half: f64, rng: &mut impl Rng) -> Position {
    Position::new(
        center.x + rng.gen_range(-half..=half),
        center.y + rng.gen_range(-half..=half),
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn patrol(pattern: PatrolPattern) -> (PatrolState, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = new_patrol(pattern, Position::new(100.0, 100.0), 10.0, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let (mut state, mut rng) = patrol(PatrolPattern::Circle);
        let mut pos = state.center;
        for _ in 0..50 {
            pos = step(&mut state, pos, 0.1, 60, &mut rng);
            assert!((pos.distance_to(&state.center) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_square_starts_at_corner_and_stays_on_perimeter() {
        let (mut state, mut rng) = patrol(PatrolPattern::Square);
        let center = state.center;
        let first = sample(PatrolPattern::Square, &mut state, center, 0.1, 60, &mut rng);
        assert!((first.x - 90.0).abs() < 1e-9 && (first.y - 90.0).abs() < 1e-9);

        let mut pos = first;
        for _ in 0..200 {
            pos = step(&mut state, pos, 0.1, 60, &mut rng);
            let dx = (pos.x - 100.0).abs();
            let dy = (pos.y - 100.0).abs();
            assert!((dx - 10.0).abs() < 1e-9 || (dy - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_waypoint_clamped_to_square() {
        let (mut state, mut rng) = patrol(PatrolPattern::RandomWaypoint);
        let mut pos = Position::new(130.0, 70.0);
        for _ in 0..500 {
            pos = step(&mut state, pos, 0.5, 60, &mut rng);
            assert!(pos.x >= 90.0 && pos.x <= 110.0);
            assert!(pos.y >= 90.0 && pos.y <= 110.0);
        }
    }

    #[test]
    fn test_random_walk_is_leashed() {
        let (mut state, mut rng) = patrol(PatrolPattern::RandomWalk);
        let mut pos = state.center;
        for _ in 0..5_000 {
            pos = step(&mut state, pos, 0.5, 60, &mut rng);
            // At most two steps past the leash before turning back.
            assert!(pos.distance_to(&state.center) <= 15.0 + 2.0 * 0.5 * SQRT_2 + 1e-9);
        }
    }

    #[test]
    fn test_negative_radius_patrols_like_positive() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut state = new_patrol(
            PatrolPattern::RandomWaypoint,
            Position::new(100.0, 100.0),
            -10.0,
            &mut rng,
        );
        assert_eq!(state.radius, 10.0);
        let mut pos = state.center;
        for _ in 0..100 {
            pos = step(&mut state, pos, 0.5, 60, &mut rng);
            assert!(pos.x >= 90.0 && pos.x <= 110.0);
        }
    }

    #[test]
    fn test_random_patterns_advance_phase_at_half_rate() {
        let (mut state, mut rng) = patrol(PatrolPattern::RandomWalk);
        let center = state.center;
        step(&mut state, center, 0.2, 60, &mut rng);
        assert!((state.phase - 0.1).abs() < 1e-12);
    }
}
