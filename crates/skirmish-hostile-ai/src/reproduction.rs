//! Population-capped reproduction policy shared by every drone kind.

use glam::DVec2;
use rand::Rng;
use skirmish_core::components::ReproductionState;
use skirmish_core::config::PopulationConfig;

/// Reproduction tunables with the cap for one drone kind.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub cap: usize,
    pub cooldown: u32,
    pub health_cost: f64,
    pub health_margin: f64,
    pub base_chance: f64,
    pub min_chance: f64,
    pub spawn_offset: f64,
}

impl Policy {
    pub fn new(population: &PopulationConfig, cap: usize) -> Self {
        Self {
            cap,
            cooldown: population.reproduction_cooldown,
            health_cost: population.health_cost,
            health_margin: population.health_margin,
            base_chance: population.base_chance,
            min_chance: population.min_chance,
            spawn_offset: population.spawn_offset,
        }
    }
}

/// Chance to reproduce this tick, shrinking as `population` nears the cap.
pub fn chance(population: usize, policy: &Policy) -> f64 {
    let fill = population as f64 / policy.cap.max(1) as f64;
    (policy.base_chance * (1.0 - fill)).max(policy.min_chance)
}

/// Count one tick on the cooldown.
pub fn tick(state: &mut ReproductionState) {
    state.ticks_since = state.ticks_since.saturating_add(1);
}

/// Whether the drone reproduces this tick. Never true at or above the cap.
pub fn should_reproduce(
    state: &ReproductionState,
    health: f64,
    population: usize,
    policy: &Policy,
    rng: &mut impl Rng,
) -> bool {
    if population >= policy.cap {
        return false;
    }
    if state.ticks_since < policy.cooldown {
        return false;
    }
    if health < policy.health_cost + policy.health_margin {
        return false;
    }
    rng.gen::<f64>() < chance(population, policy)
}

/// Offset of a child from its parent.
pub fn child_offset(policy: &Policy, rng: &mut impl Rng) -> DVec2 {
    let r = policy.spawn_offset;
    DVec2::new(rng.gen_range(-r..=r), rng.gen_range(-r..=r))
}
