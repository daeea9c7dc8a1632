//! Per-strategy engagement of an elite drone that holds a target.
//!
//! `engage` returns a displacement and what the drone wants to do this tick;
//! `plan_attack` turns "attack" into a shot or a deployed zone depending on
//! the drone's role.

use glam::DVec2;
use rand::Rng;
use skirmish_core::components::Dna;
use skirmish_core::config::EliteConfig;
use skirmish_core::enums::{HostileRole, Strategy};
use skirmish_core::types::Position;

/// Input to the tactics step.
#[derive(Debug, Clone, Copy)]
pub struct TacticsContext {
    pub position: Position,
    pub target: Position,
    pub strategy: Strategy,
    pub dna: Dna,
    pub speed: f64,
    pub fire_range: f64,
    /// Patrol phase; the flanker sweeps it.
    pub phase: f64,
    /// Current tick.
    pub time: u64,
}

/// What the drone does this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TacticsOutcome {
    pub displacement: DVec2,
    pub phase_delta: f64,
    pub attack: bool,
    /// Direction of a feint shot.
    pub feint: Option<DVec2>,
    /// Drop a decoy at the drone's new position.
    pub decoy: bool,
}

/// Zone a support-role drone lays instead of shooting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneDeploy {
    Smoke,
    CommJammer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPlan {
    /// Fire a projectile along this unit direction.
    Fire(DVec2),
    Deploy(ZoneDeploy),
    /// No usable firing solution; counts as a failed attack.
    Miss,
}

/// Branch on the active strategy.
pub fn engage(ctx: &TacticsContext, config: &EliteConfig, rng: &mut impl Rng) -> TacticsOutcome {
    let dist = ctx.position.distance_to(&ctx.target);
    let dir = ctx.position.direction_to(&ctx.target);
    let perp = dir.perp();
    match ctx.strategy {
        Strategy::Flanker => flank(ctx, dir, dist),
        Strategy::Trickster => trick(ctx, config, dir, perp, dist, rng),
        Strategy::Evasive => evade(ctx, config, dir, perp, dist, rng),
        Strategy::Aggressive | Strategy::Cautious => standard(ctx, config, dir, perp, dist, rng),
    }
}

fn flank(ctx: &TacticsContext, dir: DVec2, dist: f64) -> TacticsOutcome {
    let sideways = DVec2::new(
        -dir.y * (0.5 + 0.3 * ctx.phase.sin()),
        dir.x * (0.5 + 0.3 * ctx.phase.cos()),
    );
    let far = dist > ctx.fire_range;
    let pace = ctx.speed * if far { 2.0 } else { 1.0 };
    TacticsOutcome {
        displacement: (dir * 0.7 + sideways) * pace,
        phase_delta: 0.1,
        attack: !far,
        ..Default::default()
    }
}

fn trick(
    ctx: &TacticsContext,
    config: &EliteConfig,
    dir: DVec2,
    perp: DVec2,
    dist: f64,
    rng: &mut impl Rng,
) -> TacticsOutcome {
    let ev = ctx.dna.evasiveness;
    let mut outcome = TacticsOutcome::default();

    let feint_chance =
        config.trickster_feint_base + config.trickster_feint_per_evasiveness * ev;
    if rng.gen::<f64>() < feint_chance {
        if dist < ctx.fire_range * 0.7 {
            // Fake retreat, maybe leaving a decoy behind.
            outcome.displacement = -dir * ctx.speed * (3.0 + ev);
            outcome.decoy = rng.gen::<f64>() < config.trickster_decoy_chance;
            return outcome;
        } else if dist > ctx.fire_range * 1.2 {
            let angle = ctx.phase * 2.0;
            outcome.feint = Some(DVec2::new(angle.cos(), angle.sin()));
        }
    }

    let zigzag = (ctx.time as f64 * 0.2).sin() * 0.8;
    outcome.displacement = (dir + perp * zigzag) * ctx.speed * 1.2;
    outcome.attack = dist <= ctx.fire_range * (0.9 + rng.gen::<f64>() * 0.2);
    outcome
}

fn evade(
    ctx: &TacticsContext,
    config: &EliteConfig,
    dir: DVec2,
    perp: DVec2,
    dist: f64,
    rng: &mut impl Rng,
) -> TacticsOutcome {
    let swing = (ctx.time as f64 * 0.3).sin() * ctx.dna.evasiveness;
    let fire_chance = config.evasive_fire_base + config.evasive_fire_per_rate * ctx.dna.fire_rate;
    let roll = rng.gen::<f64>();
    TacticsOutcome {
        displacement: (dir * 0.5 + perp * swing) * ctx.speed,
        attack: roll < fire_chance && dist < ctx.fire_range * 1.3,
        ..Default::default()
    }
}

fn standard(
    ctx: &TacticsContext,
    config: &EliteConfig,
    dir: DVec2,
    perp: DVec2,
    dist: f64,
    rng: &mut impl Rng,
) -> TacticsOutcome {
    let aggressive = ctx.strategy == Strategy::Aggressive;
    let standoff = ctx.fire_range * if aggressive { 0.8 } else { 1.1 };

    if dist > standoff {
        let mut displacement = dir * ctx.speed * if aggressive { 1.5 } else { 1.0 };
        if aggressive {
            displacement += perp * (ctx.time as f64 * 0.15).sin() * 0.4;
        }
        return TacticsOutcome {
            displacement,
            ..Default::default()
        };
    }

    let mut displacement = DVec2::ZERO;
    if !aggressive && rng.gen::<f64>() < config.cautious_backoff_chance {
        displacement = -dir * ctx.speed * 0.8;
    }
    TacticsOutcome {
        displacement,
        attack: true,
        ..Default::default()
    }
}

/// Shot direction leading a target that moved by `target_step` last tick.
pub fn lead_direction(
    position: &Position,
    target: &Position,
    target_step: DVec2,
    fire_range: f64,
) -> DVec2 {
    let dir = position.direction_to(target);
    let lead_time = if fire_range > 0.0 {
        (1.0 - position.distance_to(target) / fire_range).max(0.1)
    } else {
        0.1
    };
    (dir + target_step * lead_time).normalize_or_zero()
}

/// Turn an attack into a concrete action for `role`.
pub fn plan_attack(role: HostileRole, direction: DVec2) -> AttackPlan {
    match role {
        HostileRole::Smoker => AttackPlan::Deploy(ZoneDeploy::Smoke),
        HostileRole::CommJammer => AttackPlan::Deploy(ZoneDeploy::CommJammer),
        HostileRole::Shooter if direction == DVec2::ZERO => AttackPlan::Miss,
        HostileRole::Shooter => AttackPlan::Fire(direction),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn ctx(strategy: Strategy, target: Position) -> TacticsContext {
        TacticsContext {
            position: Position::new(0.0, 0.0),
            target,
            strategy,
            dna: Dna {
                speed: 0.1,
                fire_rate: 1.0,
                evasiveness: 0.5,
                swarm_aggression: 0.5,
                intelligence: 1.0,
            },
            speed: 1.0,
            fire_range: 10.0,
            phase: 0.0,
            time: 0,
        }
    }

    #[test]
    fn test_aggressive_closes_in_beyond_standoff() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let out = engage(
            &ctx(Strategy::Aggressive, Position::new(20.0, 0.0)),
            &EliteConfig::default(),
            &mut rng,
        );
        assert!(!out.attack);
        // sin(0) kills the spiral term at t = 0.
        assert!((out.displacement.x - 1.5).abs() < 1e-12);
        assert!(out.displacement.y.abs() < 1e-12);
    }

    #[test]
    fn test_aggressive_attacks_inside_standoff() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let out = engage(
            &ctx(Strategy::Aggressive, Position::new(7.0, 0.0)),
            &EliteConfig::default(),
            &mut rng,
        );
        assert!(out.attack);
        assert_eq!(out.displacement, DVec2::ZERO);
    }

    #[test]
    fn test_cautious_always_backs_off_when_chance_is_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = EliteConfig {
            cautious_backoff_chance: 1.0,
            ..Default::default()
        };
        let out = engage(&ctx(Strategy::Cautious, Position::new(5.0, 0.0)), &config, &mut rng);
        assert!(out.attack);
        assert!(out.displacement.x < 0.0);
    }

    #[test]
    fn test_flanker_sweeps_phase_and_moves_sideways() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let out = engage(
            &ctx(Strategy::Flanker, Position::new(20.0, 0.0)),
            &EliteConfig::default(),
            &mut rng,
        );
        assert_eq!(out.phase_delta, 0.1);
        assert!(out.displacement.y.abs() > 0.0);
        assert!(!out.attack);
    }

    #[test]
    fn test_trickster_retreats_and_drops_decoy_when_forced() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = EliteConfig {
            trickster_feint_base: 1.0,
            trickster_decoy_chance: 1.0,
            ..Default::default()
        };
        let out = engage(&ctx(Strategy::Trickster, Position::new(3.0, 0.0)), &config, &mut rng);
        assert!(out.decoy);
        assert!(!out.attack);
        assert!((out.displacement.x + 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_trickster_feints_when_far() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = EliteConfig {
            trickster_feint_base: 1.0,
            ..Default::default()
        };
        let out = engage(&ctx(Strategy::Trickster, Position::new(50.0, 0.0)), &config, &mut rng);
        assert_eq!(out.feint, Some(DVec2::new(1.0, 0.0)));
        assert!(!out.attack);
    }

    #[test]
    fn test_evasive_never_fires_out_of_reach() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = EliteConfig {
            evasive_fire_base: 1.0,
            ..Default::default()
        };
        let far = engage(&ctx(Strategy::Evasive, Position::new(14.0, 0.0)), &config, &mut rng);
        assert!(!far.attack);
        let near = engage(&ctx(Strategy::Evasive, Position::new(12.0, 0.0)), &config, &mut rng);
        assert!(near.attack);
    }

    #[test]
    fn test_plan_attack_by_role() {
        let dir = DVec2::new(1.0, 0.0);
        assert_eq!(plan_attack(HostileRole::Shooter, dir), AttackPlan::Fire(dir));
        assert_eq!(plan_attack(HostileRole::Shooter, DVec2::ZERO), AttackPlan::Miss);
        assert_eq!(
            plan_attack(HostileRole::Smoker, dir),
            AttackPlan::Deploy(ZoneDeploy::Smoke)
        );
        assert_eq!(
            plan_attack(HostileRole::CommJammer, DVec2::ZERO),
            AttackPlan::Deploy(ZoneDeploy::CommJammer)
        );
    }

    #[test]
    fn test_lead_direction_accounts_for_target_motion() {
        let dir = lead_direction(
            &Position::new(0.0, 0.0),
            &Position::new(5.0, 0.0),
            DVec2::new(0.0, 1.0),
            10.0,
        );
        assert!(dir.y > 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-12);
    }
}
