#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use proptest::prelude::*;

    use crate::actions::AgentAction;
    use crate::components::Health;
    use crate::config::SimConfig;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::geometry::{angle_difference, is_occluded, Occluder};
    use crate::state::TickRecord;
    use crate::types::{EntityId, Position};

    #[test]
    fn test_entity_kind_serde() {
        let variants = vec![
            EntityKind::Agent,
            EntityKind::Drone,
            EntityKind::EliteDrone,
            EntityKind::Turret,
            EntityKind::Kamikaze,
            EntityKind::Mine,
            EntityKind::Projectile,
            EntityKind::Explosion,
            EntityKind::Wall,
            EntityKind::SmokeZone,
            EntityKind::VisionJammer,
            EntityKind::CommJammer,
            EntityKind::Decoy,
            EntityKind::EnergySource,
            EntityKind::Objective,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EntityKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert_eq!(
            serde_json::to_string(&EntityKind::EliteDrone).unwrap(),
            "\"elite_drone\""
        );
    }

    #[test]
    fn test_hostile_classification() {
        assert!(EntityKind::Drone.is_hostile());
        assert!(EntityKind::EliteDrone.is_hostile());
        assert!(EntityKind::Turret.is_hostile());
        assert!(EntityKind::Kamikaze.is_hostile());
        assert!(!EntityKind::Agent.is_hostile());
        assert!(!EntityKind::Mine.is_hostile());
        assert!(!EntityKind::Decoy.is_hostile());
        assert!(EntityKind::Wall.blocks_vision());
        assert!(!EntityKind::SmokeZone.blocks_vision());
    }

    #[test]
    fn test_patrol_pattern_parsing() {
        assert_eq!("circle".parse::<PatrolPattern>().unwrap(), PatrolPattern::Circle);
        assert_eq!(
            "Lemniscate".parse::<PatrolPattern>().unwrap(),
            PatrolPattern::Lemniscate
        );
        assert_eq!(
            "random".parse::<PatrolPattern>().unwrap(),
            PatrolPattern::RandomWalk
        );
        assert_eq!(
            "square_random".parse::<PatrolPattern>().unwrap(),
            PatrolPattern::RandomWaypoint
        );
        let err = "hexagon".parse::<PatrolPattern>().unwrap_err();
        assert_eq!(err.0, "hexagon");
        assert_eq!(
            PatrolPattern::parse_or_default("hexagon"),
            PatrolPattern::Circle
        );
    }

    #[test]
    fn test_action_tags() {
        let action: AgentAction = serde_json::from_str(r#"{"type":"move","dx":1.0,"dy":-1.0}"#)
            .unwrap();
        assert_eq!(action, AgentAction::Move { dx: 1.0, dy: -1.0 });

        let unknown: AgentAction = serde_json::from_str(r#"{"type":"teleport"}"#).unwrap();
        assert_eq!(unknown, AgentAction::Unknown);

        let json = serde_json::to_string(&AgentAction::Cloak).unwrap();
        assert_eq!(json, r#"{"type":"cloak"}"#);
    }

    #[test]
    fn test_health_damage_and_heal() {
        let mut health = Health::new(100.0);
        assert!(!health.apply_damage(40.0));
        assert_eq!(health.current, 60.0);
        health.heal(100.0);
        assert_eq!(health.current, 100.0, "heal is capped at max");
        assert!(health.apply_damage(100.0));
        assert_eq!(health.fraction(), 0.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_config_overrides() {
        let config =
            SimConfig::from_json_str(r#"{"seed": 7, "population": {"max_elite_drones": 3}}"#)
                .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.population.max_elite_drones, 3);
        assert_eq!(config.population.max_drones, crate::constants::MAX_DRONES);
        assert_eq!(config.combat.projectile_ttl, crate::constants::PROJECTILE_TTL);
    }

    #[test]
    fn test_partial_toml_config_overrides() {
        let config = SimConfig::from_toml_str(
            r#"
            seed = 99

            [turret]
            cooldown_min = 2
            cooldown_max = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.turret.cooldown_min, 2);
        assert_eq!(config.turret.cooldown_max, 4);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.turret.cooldown_min = 20;
        config.turret.cooldown_max = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "turret.cooldown_min",
                ..
            })
        ));

        let mut config = SimConfig::default();
        config.population.max_drones = 0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.elite.swarm_share_chance = 1.5;
        assert!(config.validate().is_err());

        assert!(matches!(
            SimConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_negative_elite_spreads_rejected() {
        let mut config = SimConfig::default();
        config.elite.mutation_step = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "elite.mutation_step",
                ..
            })
        ));

        assert!(matches!(
            SimConfig::from_json_str(r#"{"elite": {"weight_jitter": -0.5}}"#),
            Err(ConfigError::Invalid {
                field: "elite.weight_jitter",
                ..
            })
        ));
    }

    #[test]
    fn test_tick_record_serializes() {
        let record = TickRecord {
            events: vec![SimEvent::MineTriggered {
                mine: EntityId(3),
                agent: EntityId(1),
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"mine_triggered\""));
        let back: TickRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events, record.events);
    }

    proptest! {
        #[test]
        fn prop_angle_difference_in_half_open_range(a in -100.0f64..100.0, b in -100.0f64..100.0) {
            let d = angle_difference(a, b);
            prop_assert!(d > -PI && d <= PI);
        }

        #[test]
        fn prop_wall_on_segment_blocks(
            ox in -50.0f64..50.0,
            oy in -50.0f64..50.0,
            length in 1.0f64..100.0,
            t in 0.05f64..0.95,
            radius in 0.5f64..5.0,
            off in -0.9f64..0.9,
        ) {
            let observer = Position::new(ox, oy);
            let target = Position::new(ox + length, oy);
            let walls = [Occluder {
                position: Position::new(ox + t * length, oy + off * radius),
                radius,
            }];
            prop_assert!(is_occluded(&observer, &target, &walls));
        }

        #[test]
        fn prop_wall_far_from_segment_never_blocks(
            length in 1.0f64..100.0,
            t in 0.0f64..1.0,
            radius in 0.5f64..5.0,
        ) {
            let observer = Position::new(0.0, 0.0);
            let target = Position::new(length, 0.0);
            let walls = [Occluder {
                position: Position::new(t * length, radius * 1.5),
                radius,
            }];
            prop_assert!(!is_occluded(&observer, &target, &walls));
        }
    }
}
