//! Default tuning parameters.
//!
//! These seed `SimConfig::default()`; nothing reads them at runtime except
//! through a config.

use std::f64::consts::PI;

// --- Arena ---

/// Arena width in arena units.
pub const ARENA_WIDTH: f64 = 500.0;

/// Arena height in arena units.
pub const ARENA_HEIGHT: f64 = 500.0;

/// Ticks an agent may spend outside the arena before it is destroyed.
pub const OUT_OF_BOUNDS_GRACE_TICKS: u32 = 0;

/// Extra clearance kept between an agent and a movement blocker.
pub const MOVE_BLOCK_MARGIN: f64 = 0.5;

// --- Population ---

/// Maximum number of simple drones alive at once.
pub const MAX_DRONES: usize = 12;

/// Maximum number of elite drones alive at once.
pub const MAX_ELITE_DRONES: usize = 10;

// --- Agents ---

pub const AGENT_HEALTH: f64 = 100.0;
pub const AGENT_ENERGY: f64 = 100.0;
pub const AGENT_RANGE: f64 = 30.0;
pub const AGENT_FOV_DEG: f64 = 90.0;
pub const AGENT_MELEE_DAMAGE: f64 = 20.0;
pub const AGENT_MELEE_RANGE: f64 = 3.0;

/// Energy consumed by a `Shoot` action.
pub const AGENT_SHOT_COST: f64 = 5.0;

/// Energy consumed by a `Cloak` action.
pub const AGENT_CLOAK_COST: f64 = 15.0;

/// Ticks a cloak lasts.
pub const AGENT_CLOAK_TICKS: u32 = 20;

// --- Projectiles ---

pub const PROJECTILE_SPEED: f64 = 1.5;
pub const PROJECTILE_RADIUS: f64 = 1.5;
pub const PROJECTILE_DAMAGE: f64 = 15.0;
pub const PROJECTILE_TTL: u32 = 40;

// --- Explosions and mines ---

pub const EXPLOSION_RADIUS: f64 = 3.0;
pub const EXPLOSION_DURATION: u32 = 10;

/// Damage per tick to every agent inside an explosion.
pub const EXPLOSION_DAMAGE: f64 = 20.0;

pub const MINE_TRIGGER_RADIUS: f64 = 8.0;
pub const MINE_EXPLOSION_RADIUS: f64 = 3.0;

/// Direct damage to the agent that trips a mine.
pub const MINE_TRIGGER_DAMAGE: f64 = 50.0;

// --- Zones ---

/// Vision range multiplier inside smoke.
pub const SMOKE_VISION_PENALTY: f64 = 0.5;
pub const SMOKE_RADIUS: f64 = 5.0;
pub const COMM_JAMMER_RADIUS: f64 = 6.0;
pub const VISION_JAMMER_RADIUS: f64 = 6.0;

/// Lifetime of zones deployed by drones and turrets.
pub const DEPLOYED_ZONE_TTL: u32 = 15;

/// Drift speed of moving zones.
pub const ZONE_DRIFT_SPEED: f64 = 0.1;

pub const DECOY_LIFESPAN: u32 = 120;
pub const DECOY_RADIUS: f64 = 0.8;

// --- Communication ---

/// Maximum displacement applied to a falsified report.
pub const FALSIFY_RADIUS: f64 = 10.0;

/// Minimum displacement applied to a falsified report.
pub const FALSIFY_MIN_OFFSET: f64 = 1.0;

// --- Turrets ---

pub const TURRET_HEALTH: f64 = 150.0;
pub const TURRET_FIRE_RANGE: f64 = 20.0;
pub const TURRET_FOV: f64 = PI / 2.0;

/// Rotation per tick while scanning (5 degrees).
pub const TURRET_ROTATION_SPEED: f64 = 5.0 * PI / 180.0;
pub const TURRET_COOLDOWN_MIN: u32 = 5;
pub const TURRET_COOLDOWN_MAX: u32 = 15;

/// Minimum ticks between two jammers laid by the same turret.
pub const TURRET_JAMMER_COOLDOWN: u32 = 30;

// --- Kamikazes ---

pub const KAMIKAZE_HEALTH: f64 = 50.0;
pub const KAMIKAZE_SPEED: f64 = 0.2;
pub const KAMIKAZE_ACTIVATION_RADIUS: f64 = 40.0;
pub const KAMIKAZE_EXPLOSION_RADIUS: f64 = 5.0;
pub const KAMIKAZE_EXPLOSION_DAMAGE: f64 = 50.0;

/// Consecutive in-range ticks before detonation.
pub const KAMIKAZE_DETONATION_DELAY: u32 = 10;

// --- Drones ---

pub const DRONE_HEALTH: f64 = 100.0;
pub const DRONE_SPEED: f64 = 0.1;
pub const DRONE_ATTACK_RANGE: f64 = 15.0;
pub const DRONE_FIRE_RANGE: f64 = 10.0;
pub const DRONE_FIRE_COOLDOWN: u32 = 5;

/// Ticks between direction changes of a random-walk patrol.
pub const RANDOM_WALK_PERIOD: u32 = 60;

// --- Reproduction ---

pub const REPRODUCTION_COOLDOWN: u32 = 50;
pub const REPRODUCTION_HEALTH_COST: f64 = 20.0;

/// Health a drone must keep above the cost to consider reproducing.
pub const REPRODUCTION_HEALTH_MARGIN: f64 = 10.0;
pub const REPRODUCTION_BASE_CHANCE: f64 = 0.01;
pub const REPRODUCTION_MIN_CHANCE: f64 = 0.001;

/// Half-width of the square a child is spawned in around its parent.
pub const REPRODUCTION_SPAWN_OFFSET: f64 = 2.0;

// --- Elite drones ---

/// Ticks between strategy adaptations.
pub const ELITE_ADAPTATION_INTERVAL: u32 = 300;
pub const ELITE_MIX_DURATION_MIN: u32 = 200;
pub const ELITE_MIX_DURATION_MAX: u32 = 500;

/// Radius within which hostile entities count as threats when adapting.
pub const ELITE_THREAT_RADIUS: f64 = 15.0;

/// Swarm proximity threshold before scaling by swarm aggression.
pub const ELITE_SWARM_RADIUS: f64 = 20.0;

/// Step of a trait mutation.
pub const ELITE_MUTATION_STEP: f64 = 0.1;

/// Maximum perturbation of an inherited strategy weight.
pub const ELITE_WEIGHT_JITTER: f64 = 0.15;
