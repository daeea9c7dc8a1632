//! Kamikaze charge/release state machine.
//!
//! Idle until an agent is within activation radius, then closes on it. Every
//! consecutive tick spent within explosion range of the target (or of a wall)
//! charges the timer; leaving range resets it. Detonates on the tick the
//! timer reaches the delay.

use skirmish_core::components::KamikazeState;
use skirmish_core::enums::KamikazePhase;
use skirmish_core::types::Position;

/// Input to the kamikaze FSM.
pub struct KamikazeContext<'a> {
    pub position: Position,
    /// Current target position, if the kamikaze holds a valid target.
    pub target: Option<Position>,
    /// Centers of walls nearby.
    pub walls: &'a [Position],
}

#[derive(Debug, Clone, Copy)]
pub struct KamikazeUpdate {
    pub new_phase: KamikazePhase,
    pub new_position: Position,
    pub new_timer: u32,
    pub detonate: bool,
}

/// Index of the nearest candidate within `activation_radius`.
pub fn acquire(position: &Position, candidates: &[Position], activation_radius: f64) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, p)| (i, position.distance_to(p)))
        .filter(|(_, d)| *d <= activation_radius)
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Evaluate the FSM for one kamikaze.
pub fn evaluate(state: &KamikazeState, ctx: &KamikazeContext<'_>) -> KamikazeUpdate {
    let idle = KamikazeUpdate {
        new_phase: KamikazePhase::Idle,
        new_position: ctx.position,
        new_timer: 0,
        detonate: false,
    };

    if state.phase == KamikazePhase::Detonated {
        return KamikazeUpdate {
            new_phase: KamikazePhase::Detonated,
            new_timer: state.timer,
            ..idle
        };
    }

    let Some(target) = ctx.target else {
        return idle;
    };

    let new_position = ctx.position.offset(ctx.position.direction_to(&target) * state.speed);
    let in_range = new_position.distance_to(&target) <= state.explosion_radius
        || ctx
            .walls
            .iter()
            .any(|w| new_position.distance_to(w) <= state.explosion_radius);

    if !in_range {
        return KamikazeUpdate {
            new_position,
            ..idle
        };
    }

    let new_timer = state.timer + 1;
    let detonate = new_timer >= state.delay;
    KamikazeUpdate {
        new_phase: if detonate {
            KamikazePhase::Detonated
        } else {
            KamikazePhase::Charging
        },
        new_position,
        new_timer,
        detonate,
    }
}
