//! Session state for a driver loop
//!
//! `SimState` bundles the pieces a play session owns: the wave scheduler,
//! the live-actor registry, every actor's trajectory player, and one seeded
//! RNG that supplies all randomness (enemy type picks, spawn positions,
//! shooter rolls). Two sessions built with the same seed and content replay
//! identically under the same `dt` sequence.
//!
//! There are no global singletons here: the driver constructs one `SimState`
//! per session and passes it to `tick` explicitly.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::behavior::ShotTimer;
use crate::config::ActorConfig;
use crate::registry::SpawnRegistry;
use crate::scheduler::WaveScheduler;
use crate::trajectory::TrajectoryPlayer;

/// Stable handle for one live actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// One live enemy/threat instance
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    /// Index into the session's enemy-type table
    pub type_index: usize,
    /// Wave that spawned this actor
    pub wave_index: usize,
    pub player: TrajectoryPlayer,
    /// Armed when the spawn roll passed the wave's shoot probability
    pub shot: Option<ShotTimer>,
    /// This actor's projectiles home on the player
    pub homing: bool,
}

/// What happened during a tick, for the driver to react to (scoring, visuals,
/// projectile spawning). The core never calls back into driver systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The governing wave index changed since the last tick
    WaveChanged { wave_index: usize },
    /// An actor spawned at `position`
    Spawned {
        id: ActorId,
        type_index: usize,
        wave_index: usize,
        position: Vec2,
    },
    /// A shooter fired; the driver owns the projectile from here
    ShotFired {
        id: ActorId,
        origin: Vec2,
        direction: Vec2,
        speed: f32,
        homing: bool,
    },
    /// An actor completed its active lifetime at the path exit
    Finished { id: ActorId },
    /// An actor left the bottom of the field and was swept (scores a point)
    Escaped { id: ActorId },
}

/// Complete per-session simulation state.
#[derive(Debug, Clone)]
pub struct SimState {
    /// Session seed, for reproducing a run
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Seconds of running game time (accumulates only while spawning)
    pub game_time: f32,
    /// Escape points awarded so far
    pub score: u64,
    /// Whether the spawner is running
    pub running: bool,
    pub scheduler: WaveScheduler,
    /// Shared enemy-type table; wave pools index into this
    pub enemy_types: Vec<Arc<ActorConfig>>,
    /// Live actors, in spawn (= ID) order for deterministic iteration
    pub actors: Vec<Actor>,
    pub registry: SpawnRegistry<ActorId>,
    pub(crate) last_wave_index: Option<usize>,
    next_id: u32,
}

impl SimState {
    /// Build a stopped session. Call `start` to begin spawning.
    pub fn new(seed: u64, enemy_types: Vec<Arc<ActorConfig>>, scheduler: WaveScheduler) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            game_time: 0.0,
            score: 0,
            running: false,
            scheduler,
            enemy_types,
            actors: Vec::new(),
            registry: SpawnRegistry::new(),
            last_wave_index: None,
            next_id: 1,
        }
    }

    /// Allocate the next actor handle
    pub(crate) fn next_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Begin (or resume) spawning
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pause spawning; live actors freeze until resumed
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Clear every live actor and rewind to game time zero, keeping the seed
    /// stream where it is. The session is left stopped.
    pub fn reset(&mut self) {
        self.actors.clear();
        let _ = self.registry.clear();
        self.game_time = 0.0;
        self.score = 0;
        self.running = false;
        self.scheduler.reset();
        self.last_wave_index = None;
    }

    /// Look up a live actor
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    /// Number of live actors
    pub fn live_count(&self) -> usize {
        self.registry.count()
    }

    /// Externally destroy an actor (driver collision result). The actor is
    /// removed immediately; destruction takes precedence over any pending
    /// lifetime expiry. Returns whether the handle was live.
    pub fn destroy(&mut self, id: ActorId) -> bool {
        if !self.registry.unregister(id) {
            return false;
        }
        if let Some(index) = self.actors.iter().position(|actor| actor.id == id) {
            self.actors[index].player.terminate();
            let _ = self.actors.remove(index);
        }
        true
    }
}
