//! Swarm Sim - deterministic threat choreography for a 2D arcade shooter
//!
//! Core modules:
//! - `path`: control-point path evaluation
//! - `curve`: keyframed progress remapping curves
//! - `config`: validated per-enemy-type static data
//! - `trajectory`: per-actor motion/scale state machine
//! - `scheduler`: difficulty-wave spawn scheduling
//! - `registry`: live-actor bookkeeping
//! - `behavior`: optional shooting/homing policies
//! - `state` / `tick`: seeded session glue for a driver loop
//!
//! Everything in this crate must stay pure and deterministic:
//! - Time advances only through explicit `advance`/`tick` calls
//! - Seeded RNG only (one `Pcg32` per session, nothing ambient)
//! - Stable iteration order (by actor ID)
//! - No rendering, input, or platform dependencies

pub mod behavior;
pub mod config;
pub mod curve;
pub mod path;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use config::{ActorConfig, ConfigError};
pub use curve::{CurveSpec, Keyframe};
pub use path::PathSpec;
pub use registry::SpawnRegistry;
pub use scheduler::{SpawnDecision, WaveDef, WaveScheduler};
pub use state::{ActorId, GameEvent, SimState};
pub use tick::{TickInput, tick};
pub use trajectory::{TrajectoryFrame, TrajectoryPhase, TrajectoryPlayer};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, mobile frame budget)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play field half-extents (world units); spawns enter from the top edge
    pub const FIELD_HALF_WIDTH: f32 = 8.5;
    pub const FIELD_HALF_HEIGHT: f32 = 4.5;
    /// Extra height above the field where actors materialize
    pub const SPAWN_Y_OFFSET: f32 = 1.0;

    /// Spawn cadence baseline: delay = base / rate, floored at the minimum
    pub const BASE_SPAWN_DELAY: f32 = 0.5;
    pub const MIN_SPAWN_DELAY: f32 = 0.2;

    /// Difficulty ramp: effective spawn rate scales by `1 + game_time / RAMP_PERIOD`,
    /// capped at `RAMP_MAX`. Monotonically non-decreasing in game time.
    pub const RAMP_PERIOD: f32 = 120.0;
    pub const RAMP_MAX: f32 = 2.0;

    /// Margin below the field bottom before an actor counts as escaped
    pub const CULL_MARGIN: f32 = 0.5;
}

/// Clamp a progress value to [0, 1]
#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}
