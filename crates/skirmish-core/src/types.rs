//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (arena units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Stable identifier of an entity for the whole of its lifetime.
///
/// Allocated sequentially by the orchestrator, so identical seeds and spawn
/// orders produce identical ids.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing to another position in radians, measured from the +x axis
    /// counter-clockwise (atan2 convention).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Unit vector pointing at `other`, or zero when the positions coincide.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        (other.as_vec() - self.as_vec()).normalize_or_zero()
    }

    /// Position displaced by `delta`.
    pub fn offset(&self, delta: DVec2) -> Position {
        Position::from(self.as_vec() + delta)
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Linear interpolation toward `other` (t = 0 gives self, t = 1 gives other).
    pub fn lerp(&self, other: &Position, t: f64) -> Position {
        Position::from(self.as_vec().lerp(other.as_vec(), t))
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        p.as_vec()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
