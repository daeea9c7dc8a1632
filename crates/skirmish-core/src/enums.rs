//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownPattern;

/// Kind tag carried by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Agent,
    Drone,
    EliteDrone,
    Turret,
    Kamikaze,
    Mine,
    Projectile,
    Explosion,
    Wall,
    SmokeZone,
    VisionJammer,
    CommJammer,
    Decoy,
    EnergySource,
    Objective,
}

impl EntityKind {
    /// Hostile combatants: valid targets for agent fire, valid owners of
    /// agent-damaging projectiles.
    pub fn is_hostile(self) -> bool {
        matches!(
            self,
            EntityKind::Drone | EntityKind::EliteDrone | EntityKind::Turret | EntityKind::Kamikaze
        )
    }

    pub fn blocks_vision(self) -> bool {
        matches!(self, EntityKind::Wall)
    }

    pub fn blocks_movement(self) -> bool {
        matches!(self, EntityKind::Wall)
    }

    /// Effect objects that expire on their own.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            EntityKind::Projectile
                | EntityKind::Explosion
                | EntityKind::SmokeZone
                | EntityKind::VisionJammer
                | EntityKind::CommJammer
                | EntityKind::Decoy
        )
    }
}

/// Friendly agent specialisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Fast, wide field of view, wanders.
    #[default]
    Scout,
    /// Long range, hits hard in melee range.
    Sniper,
    /// Holds a post.
    Guard,
    /// Charges hostiles and blows itself up.
    Kamikaze,
    /// Heals nearby agents.
    Support,
    /// Slow, double health.
    Heavy,
    /// Driven by an external controller.
    Controlled,
}

/// What a drone does when it "attacks".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostileRole {
    /// Fires projectiles.
    #[default]
    Shooter,
    /// Lays a drifting smoke zone.
    Smoker,
    /// Lays a drifting, falsifying communication jammer.
    CommJammer,
}

/// Parametric patrol curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolPattern {
    #[default]
    Circle,
    Ellipse,
    Lemniscate,
    Spiral,
    Square,
    /// Random walk bounded to 1.5 radii around the home center.
    RandomWalk,
    /// Random waypoints inside the square of half-size `radius`.
    RandomWaypoint,
}

impl PatrolPattern {
    pub const ALL: [PatrolPattern; 7] = [
        PatrolPattern::Circle,
        PatrolPattern::Ellipse,
        PatrolPattern::Lemniscate,
        PatrolPattern::Spiral,
        PatrolPattern::Square,
        PatrolPattern::RandomWalk,
        PatrolPattern::RandomWaypoint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatrolPattern::Circle => "circle",
            PatrolPattern::Ellipse => "ellipse",
            PatrolPattern::Lemniscate => "lemniscate",
            PatrolPattern::Spiral => "spiral",
            PatrolPattern::Square => "square",
            PatrolPattern::RandomWalk => "random",
            PatrolPattern::RandomWaypoint => "square_random",
        }
    }

    /// Random patterns advance their phase at half rate.
    pub fn is_random(self) -> bool {
        matches!(self, PatrolPattern::RandomWalk | PatrolPattern::RandomWaypoint)
    }

    /// Parse a pattern name, falling back to `Circle` for anything unknown.
    pub fn parse_or_default(name: &str) -> PatrolPattern {
        match name.parse() {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(%err, "falling back to circle patrol");
                PatrolPattern::Circle
            }
        }
    }
}

impl FromStr for PatrolPattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        PatrolPattern::ALL
            .into_iter()
            .find(|p| p.name() == lowered)
            .or(match lowered.as_str() {
                "random_walk" => Some(PatrolPattern::RandomWalk),
                "random_waypoint" => Some(PatrolPattern::RandomWaypoint),
                _ => None,
            })
            .ok_or_else(|| UnknownPattern(s.to_string()))
    }
}

impl fmt::Display for PatrolPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elite drone adaptive behavior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Aggressive,
    Cautious,
    Evasive,
    Flanker,
    Trickster,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Aggressive,
        Strategy::Cautious,
        Strategy::Evasive,
        Strategy::Flanker,
        Strategy::Trickster,
    ];

    pub fn index(self) -> usize {
        match self {
            Strategy::Aggressive => 0,
            Strategy::Cautious => 1,
            Strategy::Evasive => 2,
            Strategy::Flanker => 3,
            Strategy::Trickster => 4,
        }
    }
}

/// Turret fire-control state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurretPhase {
    /// Rotating, no target.
    #[default]
    Scanning,
    /// Target held and fired on this tick.
    Locked,
    /// Target held, waiting for the cooldown to expire.
    CoolingDown,
}

/// Kamikaze charge/release state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KamikazePhase {
    #[default]
    Idle,
    Charging,
    Detonated,
}

/// Smoke, vision jammer or communication jammer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZoneEffect {
    /// Multiplies the effective vision range of observers inside.
    Smoke { vision_penalty: f64 },
    /// Blocks vision entirely for observers inside.
    VisionJammer,
    /// Suppresses outgoing messages; clears or falsifies incoming ones.
    CommJammer { falsify: bool },
}

impl ZoneEffect {
    pub fn kind(&self) -> EntityKind {
        match self {
            ZoneEffect::Smoke { .. } => EntityKind::SmokeZone,
            ZoneEffect::VisionJammer => EntityKind::VisionJammer,
            ZoneEffect::CommJammer { .. } => EntityKind::CommJammer,
        }
    }
}
