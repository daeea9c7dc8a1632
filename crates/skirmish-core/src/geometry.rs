//! Distance, angle and line-of-sight primitives.
//!
//! Walls are circles; a wall occludes a target when its center projects onto
//! the observer-target segment and sits closer to that segment than its
//! radius.

use std::f64::consts::{PI, TAU};

use crate::types::Position;

/// A circular vision blocker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occluder {
    pub position: Position,
    pub radius: f64,
}

/// Euclidean distance between two positions.
pub fn distance(a: &Position, b: &Position) -> f64 {
    a.distance_to(b)
}

/// Signed difference `a - b` normalized to (-PI, PI].
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Whether any occluder blocks the segment from `observer` to `target`.
///
/// Returns on the first blocking occluder. A zero-length segment is never
/// blocked.
pub fn is_occluded(observer: &Position, target: &Position, occluders: &[Occluder]) -> bool {
    let start = observer.as_vec();
    let segment = target.as_vec() - start;
    let length = segment.length();
    if length == 0.0 {
        return false;
    }
    let dir = segment / length;

    occluders.iter().any(|wall| {
        let to_wall = wall.position.as_vec() - start;
        let t = to_wall.dot(dir);
        if !(0.0..=length).contains(&t) {
            return false;
        }
        let closest = start + dir * t;
        closest.distance(wall.position.as_vec()) < wall.radius
    })
}

/// Whether `point` lies within `radius` of `center` (boundary inclusive).
pub fn within(center: &Position, point: &Position, radius: f64) -> bool {
    center.distance_to(point) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_difference_wraps() {
        assert!((angle_difference(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
        assert!((angle_difference(TAU - 0.1, 0.1) + 0.2).abs() < 1e-12);
        assert_eq!(angle_difference(PI, 0.0), PI);
        assert_eq!(angle_difference(0.0, PI), PI);
    }

    #[test]
    fn test_wall_between_blocks() {
        let walls = [Occluder {
            position: Position::new(5.0, 0.5),
            radius: 1.0,
        }];
        assert!(is_occluded(
            &Position::new(0.0, 0.0),
            &Position::new(10.0, 0.0),
            &walls
        ));
    }

    #[test]
    fn test_wall_behind_target_does_not_block() {
        let walls = [Occluder {
            position: Position::new(15.0, 0.0),
            radius: 2.0,
        }];
        assert!(!is_occluded(
            &Position::new(0.0, 0.0),
            &Position::new(10.0, 0.0),
            &walls
        ));
    }

    #[test]
    fn test_wall_beside_segment_does_not_block() {
        let walls = [Occluder {
            position: Position::new(5.0, 3.0),
            radius: 2.0,
        }];
        assert!(!is_occluded(
            &Position::new(0.0, 0.0),
            &Position::new(10.0, 0.0),
            &walls
        ));
    }

    #[test]
    fn test_zero_length_segment_clear() {
        let walls = [Occluder {
            position: Position::new(0.0, 0.0),
            radius: 5.0,
        }];
        let p = Position::new(0.0, 0.0);
        assert!(!is_occluded(&p, &p, &walls));
    }
}
