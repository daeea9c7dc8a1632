//! Simulation engine.
//!
//! `Simulation` owns the hecs ECS world, the seeded RNG and the ordered
//! entity collections, runs every system in a fixed order and produces a
//! `TickRecord` per tick. Completely headless, enabling deterministic
//! testing.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use skirmish_core::actions::AgentAction;
use skirmish_core::components::{AgentState, Body};
use skirmish_core::config::SimConfig;
use skirmish_core::enums::EntityKind;
use skirmish_core::events::SimEvent;
use skirmish_core::state::TickRecord;
use skirmish_core::types::{EntityId, Position, SimTime};

use crate::error::SimError;
use crate::spawn::SpawnQueue;
use crate::systems;
use crate::vision;
use crate::world_setup::{self, AgentSpec, Blueprint};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct Simulation {
    world: World,
    config: SimConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    next_id: u64,
    ids: HashMap<EntityId, Entity>,
    /// Non-agent entities in collection order.
    objects: Vec<Entity>,
    /// Agents in collection order.
    agents: Vec<Entity>,
    spawn_queue: SpawnQueue,
    events: Vec<SimEvent>,
    history: VecDeque<TickRecord>,
    despawn_buffer: Vec<Entity>,
}

impl Simulation {
    /// Create an empty simulation. Fails if the config does not validate.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            seed = config.seed,
            width = config.arena.width,
            height = config.arena.height,
            "simulation created"
        );
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_id: 0,
            ids: HashMap::new(),
            objects: Vec::new(),
            agents: Vec::new(),
            spawn_queue: SpawnQueue::new(config.zones.clone()),
            events: Vec::new(),
            history: VecDeque::new(),
            despawn_buffer: Vec::new(),
            config,
        })
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an agent at the end of the agent order.
    pub fn spawn_agent(&mut self, spec: AgentSpec) -> EntityId {
        let id = self.allocate_id();
        let entity = world_setup::spawn_agent(&mut self.world, id, &spec, &self.config);
        self.agents.push(entity);
        self.ids.insert(id, entity);
        id
    }

    /// Add a non-agent entity at the end of the object order.
    pub fn spawn(&mut self, position: Position, blueprint: Blueprint) -> EntityId {
        let id = self.allocate_id();
        let entity = world_setup::spawn_blueprint(
            &mut self.world,
            id,
            position,
            blueprint,
            &self.config,
            &mut self.rng,
        );
        self.objects.push(entity);
        self.ids.insert(id, entity);
        id
    }

    /// Advance the simulation by one tick and return its record.
    pub fn tick(&mut self) -> TickRecord {
        self.events.clear();
        self.run_systems();
        self.time.advance();
        self.flush_spawns();

        systems::cleanup::collect(
            &self.world,
            [self.objects.as_slice(), self.agents.as_slice()],
            &mut self.despawn_buffer,
            &mut self.events,
        );
        let record = systems::snapshot::build_record(
            &self.world,
            &self.time,
            &self.objects,
            &self.agents,
            std::mem::take(&mut self.events),
        );
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.objects,
            &mut self.agents,
            &mut self.ids,
        );

        self.push_history(record.clone());
        record
    }

    /// Advance `steps` ticks.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.tick();
        }
    }

    fn push_history(&mut self, record: TickRecord) {
        self.history.push_back(record);
        if let Some(limit) = self.config.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    /// Recorded ticks, oldest first.
    pub fn history(&self) -> &VecDeque<TickRecord> {
        &self.history
    }

    pub fn tick_count(&self) -> u64 {
        self.time.tick
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world handle for an id, while the entity exists.
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        self.ids.get(&id).copied()
    }

    /// Live entities of `kind`.
    pub fn population(&self, kind: EntityKind) -> usize {
        let order = if kind == EntityKind::Agent {
            &self.agents
        } else {
            &self.objects
        };
        systems::count_live(&self.world, order, kind)
    }

    /// Agent ids in collection order.
    pub fn agent_ids(&self) -> Vec<EntityId> {
        self.agents
            .iter()
            .filter_map(|&e| self.world.get::<&Body>(e).ok().map(|b| b.id))
            .collect()
    }

    /// Non-agent ids in collection order.
    pub fn object_ids(&self) -> Vec<EntityId> {
        self.objects
            .iter()
            .filter_map(|&e| self.world.get::<&Body>(e).ok().map(|b| b.id))
            .collect()
    }

    fn agent_entity(&self, id: EntityId) -> Result<Entity, SimError> {
        let entity = self.entity(id).ok_or(SimError::UnknownEntity(id))?;
        if self.world.get::<&AgentState>(entity).is_err() {
            return Err(SimError::NotAnAgent(id));
        }
        Ok(entity)
    }

    /// What an agent can see right now, with the same rules as its own
    /// perception step.
    pub fn visible_entities(&self, agent: EntityId) -> Result<Vec<EntityId>, SimError> {
        let entity = self.agent_entity(agent)?;
        let Some(observer) = vision::observer(&self.world, entity) else {
            return Ok(Vec::new());
        };
        let candidates: Vec<Entity> = self.objects.iter().chain(&self.agents).copied().collect();
        let sight = vision::visible_entities(&self.world, &observer, &candidates);
        Ok(sight.contacts.iter().map(|c| c.id).collect())
    }

    /// Queue the next action of a `Controlled` agent. Other roles keep
    /// deciding for themselves and ignore it.
    pub fn set_agent_action(&mut self, agent: EntityId, action: AgentAction) -> Result<(), SimError> {
        let entity = match self.agent_entity(agent) {
            Ok(entity) => entity,
            Err(err) => {
                warn!(agent = agent.0, %err, "action dropped");
                return Err(err);
            }
        };
        if let Ok(mut state) = self.world.get::<&mut AgentState>(entity) {
            state.pending_action = Some(action);
        }
        Ok(())
    }

    /// Append queued spawns to the collections.
    fn flush_spawns(&mut self) {
        let requests: Vec<_> = self.spawn_queue.drain().collect();
        for request in requests {
            if let Blueprint::Explosion { radius } = request.blueprint {
                self.events.push(SimEvent::ExplosionSpawned {
                    position: request.position,
                    radius,
                });
            }
            self.spawn(request.position, request.blueprint);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let objects = self.objects.clone();
        let agents = self.agents.clone();

        // 1. Message emission and redistribution
        systems::comms::run(
            &mut self.world,
            &objects,
            &agents,
            &self.config.comms,
            &mut self.rng,
        );
        // 2. Simple drones
        systems::drones::run(
            &mut self.world,
            &objects,
            &agents,
            &self.config,
            &mut self.rng,
            &mut self.spawn_queue,
            &mut self.events,
        );
        // 3. Elite drones
        systems::elite::run(
            &mut self.world,
            &objects,
            &agents,
            &self.config,
            &mut self.rng,
            &mut self.spawn_queue,
            &mut self.events,
            self.time.tick,
        );
        // 4. Turrets
        systems::turret::run(
            &mut self.world,
            &objects,
            &agents,
            &self.config.turret,
            &mut self.spawn_queue,
        );
        // 5. Kamikazes
        systems::kamikaze::run(
            &mut self.world,
            &objects,
            &agents,
            &mut self.spawn_queue,
            &mut self.events,
        );
        // 6. Mines and explosions
        systems::hazards::run(
            &mut self.world,
            &objects,
            &agents,
            &mut self.spawn_queue,
            &mut self.events,
        );
        // 7. Projectiles
        systems::projectiles::run(&mut self.world, &objects, &agents, &mut self.events);
        // 8. Zones, decoys, pickups
        systems::effects::run(
            &mut self.world,
            &objects,
            &agents,
            &mut self.rng,
            &mut self.events,
        );
        // 9. Agents: perceive, decide, act
        systems::agents::run(
            &mut self.world,
            &objects,
            &agents,
            &self.config,
            &mut self.rng,
            &mut self.spawn_queue,
        );
    }
}
