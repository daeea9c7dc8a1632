//! Turret fire-control state machine.
//!
//! Pure function of the turret's state and the agents around it. The caller
//! applies the returned update, spawns the projectile and the jammer.

use std::f64::consts::TAU;

use glam::DVec2;
use skirmish_core::components::TurretState;
use skirmish_core::enums::TurretPhase;
use skirmish_core::geometry::angle_difference;
use skirmish_core::types::Position;

/// A live, visible agent the turret may engage.
#[derive(Debug, Clone, Copy)]
pub struct TurretCandidate<T> {
    pub id: T,
    pub position: Position,
}

/// Input to the turret FSM for a single turret.
pub struct TurretContext<'a, T> {
    pub position: Position,
    /// Body radius; an agent inside it makes the turret lay a jammer.
    pub radius: f64,
    pub health_fraction: f64,
    pub jammer_cooldown: u32,
    /// In collection order. The first one in range and in the cone wins.
    pub candidates: &'a [TurretCandidate<T>],
}

/// Output from the turret FSM.
#[derive(Debug, Clone, Copy)]
pub struct TurretUpdate<T> {
    pub new_phase: TurretPhase,
    pub new_facing: f64,
    pub new_cooldown_timer: u32,
    pub new_jammer_timer: u32,
    pub target: Option<T>,
    /// Unit direction of the shot fired this tick.
    pub fire: Option<DVec2>,
    pub lay_jammer: bool,
    pub phase_changed: bool,
}

/// Cooldown after a shot: shorter as the turret loses health.
pub fn cooldown_for(state: &TurretState, health_fraction: f64) -> u32 {
    let min = f64::from(state.cooldown_min);
    let span = f64::from(state.cooldown_max.saturating_sub(state.cooldown_min));
    (min + health_fraction.clamp(0.0, 1.0) * span).round() as u32
}

/// Evaluate the FSM for one turret.
pub fn evaluate<T: Copy>(state: &TurretState, ctx: &TurretContext<'_, T>) -> TurretUpdate<T> {
    let cooldown_timer = state.cooldown_timer.saturating_sub(1);
    let mut jammer_timer = state.jammer_timer.saturating_sub(1);

    let mut facing = state.facing;
    if state.phase == TurretPhase::Scanning {
        facing = (facing + state.rotation_speed).rem_euclid(TAU);
    }

    let mut lay_jammer = false;
    let mut target = None;
    for candidate in ctx.candidates {
        let dist = ctx.position.distance_to(&candidate.position);
        if dist > state.fire_range {
            continue;
        }
        if dist <= ctx.radius && jammer_timer == 0 && !lay_jammer {
            lay_jammer = true;
            jammer_timer = ctx.jammer_cooldown;
        }
        let bearing = ctx.position.bearing_to(&candidate.position);
        if angle_difference(bearing, facing).abs() <= state.fov / 2.0 {
            target = Some(candidate);
            break;
        }
    }

    let (new_phase, fire, new_cooldown_timer) = match target {
        None => (TurretPhase::Scanning, None, cooldown_timer),
        Some(_) if cooldown_timer > 0 => (TurretPhase::CoolingDown, None, cooldown_timer),
        Some(c) => {
            let dir = ctx.position.direction_to(&c.position);
            if dir != DVec2::ZERO {
                facing = dir.y.atan2(dir.x);
            }
            (
                TurretPhase::Locked,
                Some(dir),
                cooldown_for(state, ctx.health_fraction),
            )
        }
    };

    TurretUpdate {
        new_phase,
        new_facing: facing,
        new_cooldown_timer,
        new_jammer_timer: jammer_timer,
        target: target.map(|c| c.id),
        fire,
        lay_jammer,
        phase_changed: new_phase != state.phase,
    }
}
