//! Per-actor trajectory playback
//!
//! A `TrajectoryPlayer` owns one actor's elapsed-time counter and turns it
//! into position, velocity, scale, and facing each tick: elapsed time maps
//! through the movement curve into the path evaluator, and through the scale
//! curve into a start/end scale lerp. The player is a tiny state machine:
//!
//! ```text
//! Active -> Leaving    (elapsed reached active_duration; exit snap applied)
//! Active -> Destroyed  (driver called terminate(), e.g. on collision)
//! ```
//!
//! Both end states are terminal; `advance` becomes a no-op returning the last
//! computed frame. This component performs no I/O, no randomness, and no
//! logging - the returned frame is its only output.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp01;
use crate::config::ActorConfig;

/// Lifecycle phase of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrajectoryPhase {
    /// Following the path; `advance` moves the actor
    Active,
    /// Reached the end of its active lifetime at the exit point (terminal)
    Leaving,
    /// Externally terminated mid-flight (terminal)
    Destroyed,
}

/// One tick's worth of computed actor state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryFrame {
    /// World position
    pub position: Vec2,
    /// Position delta since the previous frame
    pub velocity: Vec2,
    /// Render scale; `x` carries the facing sign
    pub scale: Vec2,
    /// Last horizontal movement direction, +1.0 or -1.0
    pub facing: f32,
    /// True once the actor has reached the end of its lifetime
    pub finished: bool,
}

/// Per-actor playback state over a shared, immutable `ActorConfig`.
///
/// `ActorConfig` construction already rejects non-positive durations and
/// speeds, so building a player is infallible.
#[derive(Debug, Clone)]
pub struct TrajectoryPlayer {
    config: Arc<ActorConfig>,
    /// World-space offset applied to the whole path (spawn positioning)
    origin: Vec2,
    elapsed: f32,
    phase: TrajectoryPhase,
    frame: TrajectoryFrame,
}

impl TrajectoryPlayer {
    /// Start playback at the path's authored position.
    pub fn new(config: Arc<ActorConfig>) -> Self {
        Self::new_at(config, Vec2::ZERO)
    }

    /// Start playback with the whole path translated by `origin`.
    pub fn new_at(config: Arc<ActorConfig>, origin: Vec2) -> Self {
        let frame = TrajectoryFrame {
            position: origin + config.path().entry(),
            velocity: Vec2::ZERO,
            scale: config.start_scale(),
            facing: 1.0,
            finished: false,
        };
        Self {
            config,
            origin,
            elapsed: 0.0,
            phase: TrajectoryPhase::Active,
            frame,
        }
    }

    /// Advance playback by `dt` seconds and return the resulting frame.
    ///
    /// Negative (or NaN) `dt` is clamped to 0 - runtime misuse is a no-op,
    /// never an error, to keep the hot path exception-free. After `Leaving`
    /// or `Destroyed` the last computed frame is returned unchanged.
    pub fn advance(&mut self, dt: f32) -> TrajectoryFrame {
        if self.phase != TrajectoryPhase::Active {
            return self.frame;
        }

        // f32::max returns the other operand for NaN, so this also scrubs NaN dt
        self.elapsed += dt.max(0.0);

        let config = &self.config;
        let t = clamp01(self.elapsed * config.move_speed() / config.active_duration());

        // Curve output is not re-clamped; the path evaluator clamps in its
        // own domain, so eased overshoot is well-defined
        let curve_t = config.movement_curve().evaluate(t);
        let position = self.origin + config.path().evaluate(curve_t);
        let velocity = position - self.frame.position;

        let scale_t = config.scale_curve().evaluate(t);
        let mut scale = config.start_scale().lerp(config.end_scale(), scale_t);
        if velocity.x != 0.0 {
            self.frame.facing = velocity.x.signum();
            scale.x = self.frame.facing * scale.x.abs();
        }

        self.frame.velocity = velocity;

        if self.elapsed >= config.active_duration() {
            // Snap to the exact exit pose so float drift never leaks out
            self.frame.position = self.origin + config.path().exit();
            self.frame.scale = config.end_scale();
            self.frame.finished = true;
            self.phase = TrajectoryPhase::Leaving;
        } else {
            self.frame.position = position;
            self.frame.scale = scale;
        }

        self.frame
    }

    /// External termination (e.g. the driver's collision system registered a
    /// hit). Only meaningful while `Active`; afterwards it is a no-op.
    pub fn terminate(&mut self) {
        if self.phase == TrajectoryPhase::Active {
            self.phase = TrajectoryPhase::Destroyed;
        }
    }

    /// Seconds of active lifetime consumed so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn phase(&self) -> TrajectoryPhase {
        self.phase
    }

    /// The most recently computed frame
    pub fn frame(&self) -> TrajectoryFrame {
        self.frame
    }

    pub fn config(&self) -> &Arc<ActorConfig> {
        &self.config
    }
}
