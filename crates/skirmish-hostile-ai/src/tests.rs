#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use skirmish_core::components::{KamikazeState, ReproductionState, StrategyTable, TurretState};
    use skirmish_core::config::PopulationConfig;
    use skirmish_core::constants::*;
    use skirmish_core::enums::{KamikazePhase, Strategy, TurretPhase};
    use skirmish_core::types::Position;

    use crate::drone::{self, DroneIntent};
    use crate::kamikaze::{self, KamikazeContext};
    use crate::reproduction::{self, Policy};
    use crate::strategy::{self, Observation};
    use crate::targeting::{self, TargetCandidate};
    use crate::turret::{self, TurretCandidate, TurretContext};

    fn make_turret(phase: TurretPhase, facing: f64, cooldown_timer: u32) -> TurretState {
        TurretState {
            phase,
            facing,
            fov: TURRET_FOV,
            fire_range: TURRET_FIRE_RANGE,
            rotation_speed: TURRET_ROTATION_SPEED,
            cooldown_timer,
            cooldown_min: TURRET_COOLDOWN_MIN,
            cooldown_max: TURRET_COOLDOWN_MAX,
            jammer_timer: 0,
        }
    }

    fn turret_context(candidates: &[TurretCandidate<u32>], health_fraction: f64) -> TurretContext<'_, u32> {
        TurretContext {
            position: Position::new(0.0, 0.0),
            radius: 2.0,
            health_fraction,
            jammer_cooldown: TURRET_JAMMER_COOLDOWN,
            candidates,
        }
    }

    fn make_kamikaze() -> KamikazeState {
        KamikazeState {
            phase: KamikazePhase::Idle,
            timer: 0,
            speed: 0.0,
            activation_radius: KAMIKAZE_ACTIVATION_RADIUS,
            explosion_radius: KAMIKAZE_EXPLOSION_RADIUS,
            explosion_damage: KAMIKAZE_EXPLOSION_DAMAGE,
            delay: 10,
        }
    }

    // --- Turret ---

    #[test]
    fn test_turret_scans_without_target() {
        let state = make_turret(TurretPhase::Scanning, 0.0, 0);
        let update = turret::evaluate(&state, &turret_context(&[], 1.0));
        assert_eq!(update.new_phase, TurretPhase::Scanning);
        assert!((update.new_facing - TURRET_ROTATION_SPEED).abs() < 1e-12);
        assert!(update.fire.is_none());
        assert!(!update.phase_changed);
    }

    #[test]
    fn test_turret_locks_and_fires_in_cone() {
        let state = make_turret(TurretPhase::Scanning, 0.0, 0);
        let candidates = [TurretCandidate {
            id: 1,
            position: Position::new(10.0, 0.5),
        }];
        let update = turret::evaluate(&state, &turret_context(&candidates, 1.0));
        assert_eq!(update.new_phase, TurretPhase::Locked);
        assert_eq!(update.target, Some(1));
        let dir = update.fire.expect("turret should fire");
        assert!(dir.x > 0.99);
        assert_eq!(update.new_cooldown_timer, TURRET_COOLDOWN_MAX);
        assert!(update.phase_changed);
    }

    #[test]
    fn test_turret_ignores_agent_outside_cone() {
        let state = make_turret(TurretPhase::Scanning, 0.0, 0);
        let candidates = [TurretCandidate {
            id: 1,
            position: Position::new(-10.0, 0.0),
        }];
        let update = turret::evaluate(&state, &turret_context(&candidates, 1.0));
        assert_eq!(update.new_phase, TurretPhase::Scanning);
        assert!(update.target.is_none());
    }

    #[test]
    fn test_turret_ignores_agent_out_of_range() {
        let state = make_turret(TurretPhase::Scanning, 0.0, 0);
        let candidates = [TurretCandidate {
            id: 1,
            position: Position::new(TURRET_FIRE_RANGE + 1.0, 0.0),
        }];
        let update = turret::evaluate(&state, &turret_context(&candidates, 1.0));
        assert!(update.target.is_none());
    }

    #[test]
    fn test_turret_holds_fire_while_cooling_down() {
        let state = make_turret(TurretPhase::Locked, 0.0, 3);
        let candidates = [TurretCandidate {
            id: 1,
            position: Position::new(10.0, 0.0),
        }];
        let update = turret::evaluate(&state, &turret_context(&candidates, 1.0));
        assert_eq!(update.new_phase, TurretPhase::CoolingDown);
        assert!(update.fire.is_none());
        assert_eq!(update.new_cooldown_timer, 2);
        // Facing does not rotate while a target is held.
        assert_eq!(update.new_facing, 0.0);
    }

    #[test]
    fn test_turret_cooldown_shrinks_with_health() {
        let state = make_turret(TurretPhase::Scanning, 0.0, 0);
        assert_eq!(turret::cooldown_for(&state, 1.0), TURRET_COOLDOWN_MAX);
        assert_eq!(turret::cooldown_for(&state, 0.0), TURRET_COOLDOWN_MIN);
        assert_eq!(turret::cooldown_for(&state, 0.5), 10);
    }

    #[test]
    fn test_turret_lays_jammer_when_agent_inside_body() {
        let state = make_turret(TurretPhase::Scanning, PI, 0);
        let candidates = [TurretCandidate {
            id: 1,
            position: Position::new(1.0, 0.0),
        }];
        let update = turret::evaluate(&state, &turret_context(&candidates, 1.0));
        assert!(update.lay_jammer);
        assert_eq!(update.new_jammer_timer, TURRET_JAMMER_COOLDOWN);

        let mut throttled = state.clone();
        throttled.jammer_timer = 5;
        let update = turret::evaluate(&throttled, &turret_context(&candidates, 1.0));
        assert!(!update.lay_jammer);
        assert_eq!(update.new_jammer_timer, 4);
    }

    // --- Kamikaze ---

    #[test]
    fn test_kamikaze_acquires_nearest_in_activation_radius() {
        let pos = Position::new(0.0, 0.0);
        let candidates = [
            Position::new(30.0, 0.0),
            Position::new(0.0, 20.0),
            Position::new(100.0, 0.0),
        ];
        assert_eq!(kamikaze::acquire(&pos, &candidates, 40.0), Some(1));
        assert_eq!(kamikaze::acquire(&pos, &candidates[2..], 40.0), None);
    }

    #[test]
    fn test_kamikaze_detonates_on_tenth_tick_in_range() {
        let mut state = make_kamikaze();
        let ctx = KamikazeContext {
            position: Position::new(0.0, 0.0),
            target: Some(Position::new(3.0, 0.0)),
            walls: &[],
        };
        for tick in 1..=10 {
            let update = kamikaze::evaluate(&state, &ctx);
            state.phase = update.new_phase;
            state.timer = update.new_timer;
            if tick < 10 {
                assert!(!update.detonate, "detonated early on tick {tick}");
                assert_eq!(update.new_phase, KamikazePhase::Charging);
            } else {
                assert!(update.detonate);
                assert_eq!(update.new_phase, KamikazePhase::Detonated);
            }
        }
    }

    #[test]
    fn test_kamikaze_timer_resets_out_of_range() {
        let mut state = make_kamikaze();
        state.timer = 7;
        state.phase = KamikazePhase::Charging;
        let ctx = KamikazeContext {
            position: Position::new(0.0, 0.0),
            target: Some(Position::new(30.0, 0.0)),
            walls: &[],
        };
        let update = kamikaze::evaluate(&state, &ctx);
        assert_eq!(update.new_timer, 0);
        assert_eq!(update.new_phase, KamikazePhase::Idle);
        assert!(!update.detonate);
    }

    #[test]
    fn test_kamikaze_charges_next_to_wall() {
        let state = make_kamikaze();
        let walls = [Position::new(0.0, 4.0)];
        let ctx = KamikazeContext {
            position: Position::new(0.0, 0.0),
            target: Some(Position::new(30.0, 0.0)),
            walls: &walls,
        };
        let update = kamikaze::evaluate(&state, &ctx);
        assert_eq!(update.new_phase, KamikazePhase::Charging);
        assert_eq!(update.new_timer, 1);
    }

    #[test]
    fn test_kamikaze_moves_toward_target() {
        let mut state = make_kamikaze();
        state.speed = KAMIKAZE_SPEED;
        let ctx = KamikazeContext {
            position: Position::new(0.0, 0.0),
            target: Some(Position::new(30.0, 0.0)),
            walls: &[],
        };
        let update = kamikaze::evaluate(&state, &ctx);
        assert!((update.new_position.x - KAMIKAZE_SPEED).abs() < 1e-12);
    }

    // --- Simple drone ---

    #[test]
    fn test_drone_chases_then_fires() {
        let pos = Position::new(0.0, 0.0);
        let far = Position::new(12.0, 0.0);
        match drone::engage(&pos, Some(far), DRONE_SPEED, DRONE_FIRE_RANGE, true) {
            DroneIntent::Chase(d) => assert!((d.x - 2.0 * DRONE_SPEED).abs() < 1e-12),
            other => panic!("expected chase, got {other:?}"),
        }
        let near = Position::new(5.0, 0.0);
        assert!(matches!(
            drone::engage(&pos, Some(near), DRONE_SPEED, DRONE_FIRE_RANGE, true),
            DroneIntent::Attack(_)
        ));
        assert_eq!(
            drone::engage(&pos, Some(near), DRONE_SPEED, DRONE_FIRE_RANGE, false),
            DroneIntent::Hold
        );
        assert_eq!(
            drone::engage(&pos, None, DRONE_SPEED, DRONE_FIRE_RANGE, true),
            DroneIntent::Patrol
        );
    }

    #[test]
    fn test_drone_acquires_first_in_range() {
        let pos = Position::new(0.0, 0.0);
        let candidates = [Position::new(50.0, 0.0), Position::new(14.0, 0.0), Position::new(1.0, 0.0)];
        assert_eq!(drone::acquire(&pos, &candidates, DRONE_ATTACK_RANGE), Some(1));
    }

    // --- Strategy table ---

    #[test]
    fn test_crowding_favors_evasion() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut table = StrategyTable {
            weights: [0.5, 0.5, 0.5, 0.3, 0.2],
            current: Strategy::Aggressive,
        };
        let outcome = strategy::adapt(
            &mut table,
            Observation {
                nearby_threats: 4,
                health: 100.0,
                failed_attacks: 0,
            },
            5,
            &mut rng,
        );
        assert!(!outcome.reset_failed_attacks);
        let sum: f64 = table.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // 0.4 / 0.7 / 0.5 / 0.3 / 0.2 before normalizing.
        assert!(table.weight(Strategy::Evasive) > table.weight(Strategy::Cautious));
        assert!(table.weight(Strategy::Aggressive) < table.weight(Strategy::Cautious));
        assert_eq!(outcome.current, table.current);
    }

    #[test]
    fn test_low_health_favors_caution_and_tricks() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut table = StrategyTable {
            weights: [0.2; 5],
            current: Strategy::Aggressive,
        };
        strategy::adapt(
            &mut table,
            Observation {
                nearby_threats: 0,
                health: 30.0,
                failed_attacks: 0,
            },
            5,
            &mut rng,
        );
        // 0.2 / 0.5 / 0.2 / 0.2 / 0.3 before normalizing.
        assert!((table.weight(Strategy::Cautious) - 0.5 / 1.4).abs() < 1e-12);
        assert!((table.weight(Strategy::Trickster) - 0.3 / 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_failed_attacks_favor_flanking() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut table = StrategyTable {
            weights: [0.2; 5],
            current: Strategy::Aggressive,
        };
        let outcome = strategy::adapt(
            &mut table,
            Observation {
                nearby_threats: 0,
                health: 100.0,
                failed_attacks: 6,
            },
            5,
            &mut rng,
        );
        assert!(outcome.reset_failed_attacks);
        assert!((table.weight(Strategy::Flanker) - 0.4 / 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_sample_respects_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            assert_eq!(
                strategy::sample(&[0.0, 0.0, 1.0, 0.0, 0.0], &mut rng),
                Strategy::Evasive
            );
        }
    }

    #[test]
    fn test_normalize_handles_negative_and_empty() {
        let mut weights = [-1.0, 0.0, 0.0, 0.0, 0.0];
        strategy::normalize(&mut weights);
        assert_eq!(weights, [0.2; 5]);
    }

    #[test]
    fn test_inherited_weights_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let parent = StrategyTable {
            weights: [0.0, 1.0, 0.5, 0.05, 0.95],
            current: Strategy::Cautious,
        };
        for _ in 0..100 {
            let child = strategy::inherit(&parent, ELITE_WEIGHT_JITTER, &mut rng);
            for (c, p) in child.weights.iter().zip(parent.weights.iter()) {
                assert!((0.1..=1.0).contains(c));
                assert!((c - p.clamp(0.1, 1.0)).abs() <= ELITE_WEIGHT_JITTER + 1e-12);
            }
        }
    }

    // --- Targeting ---

    #[test]
    fn test_targeting_prefers_close_and_wounded() {
        let pos = Position::new(0.0, 0.0);
        let candidates = [
            TargetCandidate {
                id: 1,
                position: Position::new(10.0, 0.0),
                health: 100.0,
                max_health: 100.0,
            },
            TargetCandidate {
                id: 2,
                position: Position::new(10.0, 0.0),
                health: 20.0,
                max_health: 100.0,
            },
        ];
        assert_eq!(
            targeting::select(&pos, 15.0, Strategy::Aggressive, &candidates),
            Some(2)
        );
        // Cautious scales by remaining health, favouring the healthy one.
        assert_eq!(
            targeting::select(&pos, 15.0, Strategy::Cautious, &candidates),
            Some(1)
        );
    }

    #[test]
    fn test_aggressive_reaches_further() {
        let pos = Position::new(0.0, 0.0);
        let candidates = [TargetCandidate {
            id: 1,
            position: Position::new(17.0, 0.0),
            health: 100.0,
            max_health: 100.0,
        }];
        assert_eq!(
            targeting::select(&pos, 15.0, Strategy::Aggressive, &candidates),
            Some(1)
        );
        assert_eq!(
            targeting::select(&pos, 15.0, Strategy::Evasive, &candidates),
            None
        );
    }

    // --- Reproduction ---

    fn policy(cap: usize) -> Policy {
        Policy::new(&PopulationConfig::default(), cap)
    }

    #[test]
    fn test_reproduction_chance_shrinks_toward_cap() {
        let p = policy(10);
        assert!((reproduction::chance(0, &p) - 0.01).abs() < 1e-12);
        assert!((reproduction::chance(5, &p) - 0.005).abs() < 1e-12);
        assert!((reproduction::chance(10, &p) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_reproduction_never_at_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut p = policy(3);
        p.base_chance = 1.0;
        p.min_chance = 1.0;
        let ready = ReproductionState { ticks_since: 1_000 };
        for _ in 0..100 {
            assert!(!reproduction::should_reproduce(&ready, 100.0, 3, &p, &mut rng));
        }
        assert!(reproduction::should_reproduce(&ready, 100.0, 2, &p, &mut rng));
    }

    #[test]
    fn test_reproduction_gates() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut p = policy(10);
        p.base_chance = 1.0;
        p.min_chance = 1.0;
        let cooling = ReproductionState { ticks_since: 10 };
        assert!(!reproduction::should_reproduce(&cooling, 100.0, 0, &p, &mut rng));
        let ready = ReproductionState { ticks_since: 50 };
        assert!(!reproduction::should_reproduce(&ready, 29.0, 0, &p, &mut rng));
        assert!(reproduction::should_reproduce(&ready, 30.0, 0, &p, &mut rng));
    }

    #[test]
    fn test_child_offset_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let p = policy(10);
        for _ in 0..100 {
            let o = reproduction::child_offset(&p, &mut rng);
            assert!(o.x.abs() <= 2.0 && o.y.abs() <= 2.0);
        }
    }
}
