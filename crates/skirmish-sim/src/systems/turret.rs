//! Turret system: runs the scan/lock/cool-down machine for every live
//! turret and turns its decisions into projectiles and jammers.

use hecs::{Entity, World};
use tracing::debug;

use skirmish_core::components::{Body, Health, TurretState};
use skirmish_core::config::TurretConfig;
use skirmish_core::enums::EntityKind;
use skirmish_core::types::Position;
use skirmish_hostile_ai::turret::{self, TurretCandidate, TurretContext};

use crate::links::{is_live_kind, read, write, Target};
use crate::spawn::SpawnQueue;
use crate::systems::targetable_agents;

pub fn run(
    world: &mut World,
    objects: &[Entity],
    agents: &[Entity],
    config: &TurretConfig,
    queue: &mut SpawnQueue,
) {
    for &entity in objects {
        if !is_live_kind(world, entity, EntityKind::Turret) {
            continue;
        }
        let (Some(body), Some(position), Some(mut state), Some(health)) = (
            read::<Body>(world, entity),
            read::<Position>(world, entity),
            read::<TurretState>(world, entity),
            read::<Health>(world, entity),
        ) else {
            continue;
        };

        let candidates: Vec<TurretCandidate<Entity>> = targetable_agents(world, agents)
            .into_iter()
            .map(|a| TurretCandidate {
                id: a.entity,
                position: a.position,
            })
            .collect();
        let ctx = TurretContext {
            position,
            radius: body.radius,
            health_fraction: health.fraction(),
            jammer_cooldown: config.jammer_cooldown,
            candidates: &candidates,
        };
        let update = turret::evaluate(&state, &ctx);

        if update.lay_jammer {
            queue.spawn_vision_jammer(position, false);
        }
        if let Some(direction) = update.fire {
            queue.spawn_projectile(position, direction, Some(entity), EntityKind::Turret);
        }

        if update.phase_changed {
            debug!(turret = body.id.0, from = ?state.phase, to = ?update.new_phase, "turret phase");
        }
        state.phase = update.new_phase;
        state.facing = update.new_facing;
        state.cooldown_timer = update.new_cooldown_timer;
        state.jammer_timer = update.new_jammer_timer;
        write(world, entity, state);
        write(world, entity, Target(update.target));
    }
}
