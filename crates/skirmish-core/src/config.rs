//! Immutable simulation configuration.
//!
//! Every tunable the engine reads lives here. Defaults come from
//! `constants.rs`; partial JSON or TOML documents override only the fields
//! they name.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Complete configuration handed to the orchestrator at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and same spawn order = same simulation.
    pub seed: u64,
    /// Keep at most this many tick records in history (None = unbounded).
    pub history_limit: Option<usize>,
    pub arena: ArenaConfig,
    pub population: PopulationConfig,
    pub combat: CombatConfig,
    pub zones: ZoneConfig,
    pub comms: CommsConfig,
    pub agents: AgentConfig,
    pub turret: TurretConfig,
    pub kamikaze: KamikazeConfig,
    pub drone: DroneConfig,
    pub elite: EliteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub out_of_bounds_grace_ticks: u32,
    pub move_block_margin: f64,
}

/// Population caps and the reproduction policy shared by all drone kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub max_drones: usize,
    pub max_elite_drones: usize,
    pub reproduction_cooldown: u32,
    pub health_cost: f64,
    pub health_margin: f64,
    pub base_chance: f64,
    pub min_chance: f64,
    pub spawn_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub projectile_speed: f64,
    pub projectile_radius: f64,
    pub projectile_damage: f64,
    pub projectile_ttl: u32,
    pub explosion_radius: f64,
    pub explosion_duration: u32,
    pub explosion_damage: f64,
    pub mine_trigger_damage: f64,
    pub mine_explosion_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub smoke_vision_penalty: f64,
    pub smoke_radius: f64,
    pub vision_jammer_radius: f64,
    pub comm_jammer_radius: f64,
    /// Lifetime of zones laid by drones and turrets.
    pub deployed_ttl: u32,
    pub drift_speed: f64,
    pub decoy_lifespan: u32,
    pub decoy_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommsConfig {
    pub falsify_radius: f64,
    pub falsify_min_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub melee_damage: f64,
    pub melee_range: f64,
    pub shot_cost: f64,
    pub cloak_cost: f64,
    pub cloak_ticks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub health: f64,
    pub fire_range: f64,
    /// Full field of view in radians.
    pub fov: f64,
    pub rotation_speed: f64,
    pub cooldown_min: u32,
    pub cooldown_max: u32,
    pub jammer_cooldown: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KamikazeConfig {
    pub health: f64,
    pub speed: f64,
    pub activation_radius: f64,
    pub explosion_radius: f64,
    pub explosion_damage: f64,
    pub detonation_delay: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    pub health: f64,
    pub speed: f64,
    pub attack_range: f64,
    pub fire_range: f64,
    pub fire_cooldown: u32,
    pub random_walk_period: u32,
}

/// Elite drone controller tunables. Every stochastic branch of the
/// controller reads its probability from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EliteConfig {
    pub adaptation_interval: u32,
    pub threat_radius: f64,
    pub swarm_radius: f64,
    pub mix_duration_min: u32,
    pub mix_duration_max: u32,
    pub mutation_step: f64,
    pub weight_jitter: f64,
    /// Initial weights in `Strategy::ALL` order.
    pub initial_weights: [f64; 5],
    /// Failed attacks before adaptation favors flanking and tricks.
    pub failed_attack_threshold: u32,
    /// Chance of adopting the swarm's shared target when already engaged.
    pub swarm_share_chance: f64,
    pub trickster_feint_base: f64,
    /// Added to the feint chance per unit of evasiveness.
    pub trickster_feint_per_evasiveness: f64,
    pub trickster_decoy_chance: f64,
    pub evasive_fire_base: f64,
    /// Added to the evasive fire chance per unit of fire-rate trait.
    pub evasive_fire_per_rate: f64,
    pub cautious_backoff_chance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            history_limit: None,
            arena: ArenaConfig::default(),
            population: PopulationConfig::default(),
            combat: CombatConfig::default(),
            zones: ZoneConfig::default(),
            comms: CommsConfig::default(),
            agents: AgentConfig::default(),
            turret: TurretConfig::default(),
            kamikaze: KamikazeConfig::default(),
            drone: DroneConfig::default(),
            elite: EliteConfig::default(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            out_of_bounds_grace_ticks: OUT_OF_BOUNDS_GRACE_TICKS,
            move_block_margin: MOVE_BLOCK_MARGIN,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_drones: MAX_DRONES,
            max_elite_drones: MAX_ELITE_DRONES,
            reproduction_cooldown: REPRODUCTION_COOLDOWN,
            health_cost: REPRODUCTION_HEALTH_COST,
            health_margin: REPRODUCTION_HEALTH_MARGIN,
            base_chance: REPRODUCTION_BASE_CHANCE,
            min_chance: REPRODUCTION_MIN_CHANCE,
            spawn_offset: REPRODUCTION_SPAWN_OFFSET,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_damage: PROJECTILE_DAMAGE,
            projectile_ttl: PROJECTILE_TTL,
            explosion_radius: EXPLOSION_RADIUS,
            explosion_duration: EXPLOSION_DURATION,
            explosion_damage: EXPLOSION_DAMAGE,
            mine_trigger_damage: MINE_TRIGGER_DAMAGE,
            mine_explosion_radius: MINE_EXPLOSION_RADIUS,
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            smoke_vision_penalty: SMOKE_VISION_PENALTY,
            smoke_radius: SMOKE_RADIUS,
            vision_jammer_radius: VISION_JAMMER_RADIUS,
            comm_jammer_radius: COMM_JAMMER_RADIUS,
            deployed_ttl: DEPLOYED_ZONE_TTL,
            drift_speed: ZONE_DRIFT_SPEED,
            decoy_lifespan: DECOY_LIFESPAN,
            decoy_radius: DECOY_RADIUS,
        }
    }
}

impl Default for CommsConfig {
    fn default() -> Self {
        Self {
            falsify_radius: FALSIFY_RADIUS,
            falsify_min_offset: FALSIFY_MIN_OFFSET,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            melee_damage: AGENT_MELEE_DAMAGE,
            melee_range: AGENT_MELEE_RANGE,
            shot_cost: AGENT_SHOT_COST,
            cloak_cost: AGENT_CLOAK_COST,
            cloak_ticks: AGENT_CLOAK_TICKS,
        }
    }
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            health: TURRET_HEALTH,
            fire_range: TURRET_FIRE_RANGE,
            fov: TURRET_FOV,
            rotation_speed: TURRET_ROTATION_SPEED,
            cooldown_min: TURRET_COOLDOWN_MIN,
            cooldown_max: TURRET_COOLDOWN_MAX,
            jammer_cooldown: TURRET_JAMMER_COOLDOWN,
        }
    }
}

impl Default for KamikazeConfig {
    fn default() -> Self {
        Self {
            health: KAMIKAZE_HEALTH,
            speed: KAMIKAZE_SPEED,
            activation_radius: KAMIKAZE_ACTIVATION_RADIUS,
            explosion_radius: KAMIKAZE_EXPLOSION_RADIUS,
            explosion_damage: KAMIKAZE_EXPLOSION_DAMAGE,
            detonation_delay: KAMIKAZE_DETONATION_DELAY,
        }
    }
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            health: DRONE_HEALTH,
            speed: DRONE_SPEED,
            attack_range: DRONE_ATTACK_RANGE,
            fire_range: DRONE_FIRE_RANGE,
            fire_cooldown: DRONE_FIRE_COOLDOWN,
            random_walk_period: RANDOM_WALK_PERIOD,
        }
    }
}

impl Default for EliteConfig {
    fn default() -> Self {
        Self {
            adaptation_interval: ELITE_ADAPTATION_INTERVAL,
            threat_radius: ELITE_THREAT_RADIUS,
            swarm_radius: ELITE_SWARM_RADIUS,
            mix_duration_min: ELITE_MIX_DURATION_MIN,
            mix_duration_max: ELITE_MIX_DURATION_MAX,
            mutation_step: ELITE_MUTATION_STEP,
            weight_jitter: ELITE_WEIGHT_JITTER,
            initial_weights: [0.5, 0.5, 0.5, 0.3, 0.2],
            failed_attack_threshold: 5,
            swarm_share_chance: 0.4,
            trickster_feint_base: 0.05,
            trickster_feint_per_evasiveness: 0.1,
            trickster_decoy_chance: 0.7,
            evasive_fire_base: 0.1,
            evasive_fire_per_rate: 0.05,
            cautious_backoff_chance: 0.3,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a (possibly partial) TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        non_negative("arena.move_block_margin", self.arena.move_block_margin)?;

        if self.population.max_drones == 0 {
            return Err(ConfigError::invalid("population.max_drones", "must be at least 1"));
        }
        if self.population.max_elite_drones == 0 {
            return Err(ConfigError::invalid(
                "population.max_elite_drones",
                "must be at least 1",
            ));
        }
        non_negative("population.health_cost", self.population.health_cost)?;
        probability("population.base_chance", self.population.base_chance)?;
        probability("population.min_chance", self.population.min_chance)?;
        non_negative("population.spawn_offset", self.population.spawn_offset)?;

        positive("combat.projectile_speed", self.combat.projectile_speed)?;
        non_negative("combat.projectile_radius", self.combat.projectile_radius)?;
        non_negative("combat.explosion_radius", self.combat.explosion_radius)?;
        non_negative("combat.mine_explosion_radius", self.combat.mine_explosion_radius)?;

        probability("zones.smoke_vision_penalty", self.zones.smoke_vision_penalty)?;
        non_negative("zones.smoke_radius", self.zones.smoke_radius)?;
        non_negative("zones.vision_jammer_radius", self.zones.vision_jammer_radius)?;
        non_negative("zones.comm_jammer_radius", self.zones.comm_jammer_radius)?;
        non_negative("zones.decoy_radius", self.zones.decoy_radius)?;

        if self.comms.falsify_min_offset <= 0.0
            || self.comms.falsify_min_offset > self.comms.falsify_radius
        {
            return Err(ConfigError::invalid(
                "comms.falsify_min_offset",
                "must be in (0, falsify_radius]",
            ));
        }

        if self.turret.cooldown_min > self.turret.cooldown_max {
            return Err(ConfigError::invalid(
                "turret.cooldown_min",
                format!(
                    "{} exceeds cooldown_max {}",
                    self.turret.cooldown_min, self.turret.cooldown_max
                ),
            ));
        }
        positive("turret.fov", self.turret.fov)?;
        positive("turret.health", self.turret.health)?;

        positive("kamikaze.health", self.kamikaze.health)?;
        positive("drone.health", self.drone.health)?;
        if self.drone.random_walk_period == 0 {
            return Err(ConfigError::invalid("drone.random_walk_period", "must be at least 1"));
        }

        if self.elite.adaptation_interval == 0 {
            return Err(ConfigError::invalid("elite.adaptation_interval", "must be at least 1"));
        }
        if self.elite.mix_duration_min == 0
            || self.elite.mix_duration_min > self.elite.mix_duration_max
        {
            return Err(ConfigError::invalid(
                "elite.mix_duration_min",
                "must be in [1, mix_duration_max]",
            ));
        }
        if self.elite.initial_weights.iter().any(|w| *w < 0.0)
            || self.elite.initial_weights.iter().sum::<f64>() <= 0.0
        {
            return Err(ConfigError::invalid(
                "elite.initial_weights",
                "must be non-negative with a positive sum",
            ));
        }
        non_negative("elite.mutation_step", self.elite.mutation_step)?;
        non_negative("elite.weight_jitter", self.elite.weight_jitter)?;
        probability("elite.swarm_share_chance", self.elite.swarm_share_chance)?;
        probability("elite.trickster_feint_base", self.elite.trickster_feint_base)?;
        probability("elite.trickster_decoy_chance", self.elite.trickster_decoy_chance)?;
        probability("elite.evasive_fire_base", self.elite.evasive_fire_base)?;
        probability(
            "elite.cautious_backoff_chance",
            self.elite.cautious_backoff_chance,
        )?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be > 0")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be >= 0")))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not in [0, 1]")))
    }
}
