//! Entity spawn factories.
//!
//! Agents are built from an `AgentSpec`; everything else from a `Blueprint`.
//! Defaults come from the `SimConfig` so a scenario only names what differs.

use glam::DVec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use skirmish_core::components::*;
use skirmish_core::config::SimConfig;
use skirmish_core::constants::{AGENT_ENERGY, AGENT_FOV_DEG, AGENT_HEALTH, AGENT_RANGE};
use skirmish_core::enums::*;
use skirmish_core::types::{EntityId, Position};
use skirmish_hostile_ai::mixer::{self, MixDurations};
use skirmish_hostile_ai::{dna, patrol, strategy};

use crate::links::{Owner, Target};

const AGENT_RADIUS: f64 = 0.8;
const DRONE_RADIUS: f64 = 3.0;
const TURRET_RADIUS: f64 = 2.0;
const KAMIKAZE_RADIUS: f64 = 2.5;
const DEFAULT_PATROL_RADIUS: f64 = 10.0;

/// Patterns a drone born by reproduction may pick.
pub const CHILD_PATTERNS: [PatrolPattern; 4] = [
    PatrolPattern::Circle,
    PatrolPattern::Lemniscate,
    PatrolPattern::Spiral,
    PatrolPattern::Square,
];

/// What to put in the world at a position.
#[derive(Debug, Clone)]
pub enum Blueprint {
    Drone {
        role: HostileRole,
        pattern: PatrolPattern,
        patrol_radius: f64,
    },
    /// Random DNA and the configured strategy weights unless given.
    EliteDrone {
        role: HostileRole,
        pattern: PatrolPattern,
        patrol_radius: f64,
        dna: Option<Dna>,
        strategy: Option<StrategyTable>,
    },
    Turret,
    Kamikaze,
    Mine {
        trigger_radius: f64,
    },
    Wall {
        radius: f64,
    },
    Projectile {
        direction: DVec2,
        owner: Option<Entity>,
        owner_kind: EntityKind,
        counts_misses: bool,
    },
    Explosion {
        radius: f64,
    },
    Zone {
        effect: ZoneEffect,
        radius: f64,
        ttl: Option<u32>,
        drift_speed: f64,
    },
    Decoy {
        lifespan: u32,
    },
    EnergySource {
        energy: f64,
        radius: f64,
    },
    Objective {
        reward: f64,
        radius: f64,
    },
}

impl Blueprint {
    pub fn kind(&self) -> EntityKind {
        match self {
            Blueprint::Drone { .. } => EntityKind::Drone,
            Blueprint::EliteDrone { .. } => EntityKind::EliteDrone,
            Blueprint::Turret => EntityKind::Turret,
            Blueprint::Kamikaze => EntityKind::Kamikaze,
            Blueprint::Mine { .. } => EntityKind::Mine,
            Blueprint::Wall { .. } => EntityKind::Wall,
            Blueprint::Projectile { .. } => EntityKind::Projectile,
            Blueprint::Explosion { .. } => EntityKind::Explosion,
            Blueprint::Zone { effect, .. } => effect.kind(),
            Blueprint::Decoy { .. } => EntityKind::Decoy,
            Blueprint::EnergySource { .. } => EntityKind::EnergySource,
            Blueprint::Objective { .. } => EntityKind::Objective,
        }
    }

    /// A shooter drone on the given pattern with the default patrol radius.
    pub fn drone(pattern: PatrolPattern) -> Self {
        Blueprint::Drone {
            role: HostileRole::Shooter,
            pattern,
            patrol_radius: DEFAULT_PATROL_RADIUS,
        }
    }

    /// A shooter elite with random DNA.
    pub fn elite(pattern: PatrolPattern) -> Self {
        Blueprint::EliteDrone {
            role: HostileRole::Shooter,
            pattern,
            patrol_radius: DEFAULT_PATROL_RADIUS,
            dna: None,
            strategy: None,
        }
    }

    /// A zone with the configured radius, permanent and static.
    pub fn zone(effect: ZoneEffect, config: &SimConfig) -> Self {
        let radius = match effect {
            ZoneEffect::Smoke { .. } => config.zones.smoke_radius,
            ZoneEffect::VisionJammer => config.zones.vision_jammer_radius,
            ZoneEffect::CommJammer { .. } => config.zones.comm_jammer_radius,
        };
        Blueprint::Zone {
            effect,
            radius,
            ttl: None,
            drift_speed: 0.0,
        }
    }
}

/// How to build one agent.
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub role: AgentRole,
    pub position: Position,
    pub facing: f64,
    pub radius: f64,
    /// Role default when unset.
    pub range: Option<f64>,
    /// Full field of view in degrees; role default when unset.
    pub fov_deg: Option<f64>,
    /// Vision range when unset.
    pub comm_range: Option<f64>,
    pub can_communicate: bool,
    /// Post a guard returns to; its spawn position when unset.
    pub guard_post: Option<Position>,
}

impl AgentSpec {
    pub fn new(role: AgentRole, position: Position) -> Self {
        Self {
            role,
            position,
            facing: 0.0,
            radius: AGENT_RADIUS,
            range: None,
            fov_deg: None,
            comm_range: None,
            can_communicate: true,
            guard_post: None,
        }
    }

    pub fn facing(mut self, facing: f64) -> Self {
        self.facing = facing;
        self
    }

    pub fn range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }

    pub fn fov_deg(mut self, fov_deg: f64) -> Self {
        self.fov_deg = Some(fov_deg);
        self
    }

    pub fn comm_range(mut self, comm_range: f64) -> Self {
        self.comm_range = Some(comm_range);
        self
    }

    pub fn silent(mut self) -> Self {
        self.can_communicate = false;
        self
    }
}

/// Vision, health and profile of a role.
struct RoleStats {
    range: f64,
    fov_deg: f64,
    health: f64,
    profile: AgentProfile,
}

fn role_stats(role: AgentRole, config: &SimConfig) -> RoleStats {
    let melee = AgentProfile {
        speed: 1.0,
        attack_power: config.agents.melee_damage,
        attack_range: config.agents.melee_range,
        heal_range: 0.0,
        heal_amount: 0.0,
        guard_post: None,
        patrol_radius: 0.0,
        explosion_range: 0.0,
        explosion_damage: 0.0,
    };
    let stats = |range, fov_deg, health, profile| RoleStats {
        range,
        fov_deg,
        health,
        profile,
    };
    match role {
        AgentRole::Scout => stats(50.0, 160.0, AGENT_HEALTH, AgentProfile { speed: 2.0, ..melee }),
        AgentRole::Sniper => stats(
            60.0,
            AGENT_FOV_DEG,
            AGENT_HEALTH,
            AgentProfile {
                attack_power: 40.0,
                attack_range: 10.0,
                ..melee
            },
        ),
        AgentRole::Guard => stats(
            35.0,
            120.0,
            AGENT_HEALTH,
            AgentProfile {
                speed: 0.5,
                patrol_radius: 25.0,
                ..melee
            },
        ),
        AgentRole::Kamikaze => stats(
            25.0,
            100.0,
            AGENT_HEALTH,
            AgentProfile {
                speed: 2.5,
                explosion_range: 2.0,
                explosion_damage: 100.0,
                ..melee
            },
        ),
        AgentRole::Support => stats(
            35.0,
            120.0,
            AGENT_HEALTH,
            AgentProfile {
                speed: 0.5,
                heal_range: 5.0,
                heal_amount: 10.0,
                ..melee
            },
        ),
        AgentRole::Heavy => stats(25.0, AGENT_FOV_DEG, 200.0, AgentProfile { speed: 0.6, ..melee }),
        AgentRole::Controlled => stats(AGENT_RANGE, AGENT_FOV_DEG, AGENT_HEALTH, melee),
    }
}

/// Spawn an agent. Ids are allocated by the caller.
pub fn spawn_agent(world: &mut World, id: EntityId, spec: &AgentSpec, config: &SimConfig) -> Entity {
    let stats = role_stats(spec.role, config);
    let range = spec.range.unwrap_or(stats.range);
    let fov = spec.fov_deg.unwrap_or(stats.fov_deg).to_radians();
    let mut profile = stats.profile;
    if spec.role == AgentRole::Guard {
        profile.guard_post = Some(spec.guard_post.unwrap_or(spec.position));
    }

    let state = AgentState {
        role: spec.role,
        profile,
        energy: AGENT_ENERGY,
        facing: spec.facing,
        range,
        fov,
        effective_range: range,
        effective_fov: fov,
        comm_range: spec.comm_range.unwrap_or(range),
        can_communicate: spec.can_communicate,
        cloak_ticks: 0,
        inbox: Vec::new(),
        pending_action: None,
        last_action: None,
        last_attack_success: false,
        out_of_bounds_ticks: 0,
        last_step: DVec2::ZERO,
    };

    world.spawn((
        Body {
            id,
            kind: EntityKind::Agent,
            radius: spec.radius.max(0.0),
            alive: true,
        },
        spec.position,
        Health::new(stats.health),
        state,
    ))
}

fn body(id: EntityId, kind: EntityKind, radius: f64) -> Body {
    Body {
        id,
        kind,
        radius: radius.max(0.0),
        alive: true,
    }
}

/// Spawn a non-agent entity from its blueprint.
pub fn spawn_blueprint(
    world: &mut World,
    id: EntityId,
    position: Position,
    blueprint: Blueprint,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Entity {
    let kind = blueprint.kind();
    match blueprint {
        Blueprint::Drone {
            role,
            pattern,
            patrol_radius,
        } => {
            let drone = &config.drone;
            world.spawn((
                body(id, kind, DRONE_RADIUS),
                position,
                Health::new(drone.health),
                DroneState {
                    role,
                    patrol: patrol::new_patrol(pattern, position, patrol_radius, rng),
                    speed: drone.speed,
                    attack_range: drone.attack_range,
                    fire_range: drone.fire_range,
                    fire_timer: 0,
                    reproduction: ReproductionState::default(),
                },
                Target::default(),
            ))
        }
        Blueprint::EliteDrone {
            role,
            pattern,
            patrol_radius,
            dna: genes,
            strategy: table,
        } => {
            let genes = genes.unwrap_or_else(|| dna::random_dna(rng));
            let table =
                table.unwrap_or_else(|| strategy::new_table(config.elite.initial_weights, rng));
            let stats = dna::apply(
                &genes,
                config.drone.speed,
                config.drone.attack_range,
                config.drone.fire_range,
            );
            let durations = MixDurations {
                min: config.elite.mix_duration_min,
                max: config.elite.mix_duration_max,
            };
            world.spawn((
                body(id, kind, DRONE_RADIUS),
                position,
                Health::new(config.drone.health),
                EliteState {
                    role,
                    patrol: patrol::new_patrol(pattern, position, patrol_radius, rng),
                    mixer: mixer::new_mixer(pattern, durations, rng),
                    dna: genes,
                    strategy: table,
                    speed: stats.speed,
                    attack_range: stats.attack_range,
                    fire_range: stats.fire_range,
                    adaptation_timer: 0,
                    failed_attacks: 0,
                    last_known_target: None,
                    reproduction: ReproductionState::default(),
                },
                Target::default(),
            ))
        }
        Blueprint::Turret => {
            let t = &config.turret;
            world.spawn((
                body(id, kind, TURRET_RADIUS),
                position,
                Health::new(t.health),
                TurretState {
                    phase: TurretPhase::Scanning,
                    facing: 0.0,
                    fov: t.fov,
                    fire_range: t.fire_range,
                    rotation_speed: t.rotation_speed,
                    cooldown_timer: 0,
                    cooldown_min: t.cooldown_min,
                    cooldown_max: t.cooldown_max,
                    jammer_timer: 0,
                },
                Target::default(),
            ))
        }
        Blueprint::Kamikaze => {
            let k = &config.kamikaze;
            world.spawn((
                body(id, kind, KAMIKAZE_RADIUS),
                position,
                Health::new(k.health),
                KamikazeState {
                    phase: KamikazePhase::Idle,
                    timer: 0,
                    speed: k.speed,
                    activation_radius: k.activation_radius,
                    explosion_radius: k.explosion_radius,
                    explosion_damage: k.explosion_damage,
                    delay: k.detonation_delay,
                },
                Target::default(),
            ))
        }
        Blueprint::Mine { trigger_radius } => world.spawn((
            body(id, kind, trigger_radius),
            position,
            MineState {
                triggered: false,
                explosion_radius: config.combat.mine_explosion_radius,
                trigger_damage: config.combat.mine_trigger_damage,
            },
        )),
        Blueprint::Wall { radius } => world.spawn((body(id, kind, radius), position)),
        Blueprint::Projectile {
            direction,
            owner,
            owner_kind,
            counts_misses,
        } => {
            let c = &config.combat;
            world.spawn((
                body(id, kind, c.projectile_radius),
                position,
                ProjectileState {
                    direction: direction.normalize_or_zero(),
                    speed: c.projectile_speed,
                    damage: c.projectile_damage,
                    ttl: c.projectile_ttl,
                },
                Owner {
                    entity: owner,
                    kind: owner_kind,
                    counts_misses,
                },
            ))
        }
        Blueprint::Explosion { radius } => world.spawn((
            body(id, kind, radius),
            position,
            ExplosionState {
                remaining: config.combat.explosion_duration,
                damage: config.combat.explosion_damage,
            },
        )),
        Blueprint::Zone {
            effect,
            radius,
            ttl,
            drift_speed,
        } => world.spawn((
            body(id, kind, radius),
            position,
            ZoneState {
                effect,
                ttl,
                drift_speed,
            },
        )),
        Blueprint::Decoy { lifespan } => world.spawn((
            body(id, kind, config.zones.decoy_radius),
            position,
            DecoyState { lifespan },
        )),
        Blueprint::EnergySource { energy, radius } => {
            world.spawn((body(id, kind, radius), position, EnergySource { energy }))
        }
        Blueprint::Objective { reward, radius } => world.spawn((
            body(id, kind, radius),
            position,
            ObjectiveState {
                reward,
                collected: false,
            },
        )),
    }
}

/// Random pattern for a child drone.
pub fn child_pattern(rng: &mut impl Rng) -> PatrolPattern {
    *CHILD_PATTERNS.choose(rng).unwrap_or(&PatrolPattern::Circle)
}
