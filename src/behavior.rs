//! Optional per-actor behavior policies
//!
//! Behaviors compose onto an actor instead of subclassing it: a trajectory
//! player plus an optional `ShotTimer`, plus a homing flag the driver applies
//! to the projectiles it spawns. The core never creates projectiles; it only
//! reports when and in which direction a shot happens.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ShotSpec;

/// Fire cadence for a shooting actor.
///
/// The first shot lands at a random phase within one interval so a wave of
/// shooters spawned together does not volley in lockstep. The offset is drawn
/// from the session RNG at construction; after that the timer is pure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotTimer {
    spec: ShotSpec,
    next_shot_time: f32,
}

impl ShotTimer {
    /// Arm a timer at `game_time`, randomizing the first shot's phase.
    pub fn new(spec: ShotSpec, game_time: f32, rng: &mut impl Rng) -> Self {
        let phase = rng.random_range(0.0..spec.interval);
        Self {
            spec,
            next_shot_time: game_time + phase,
        }
    }

    /// Returns true when a shot is due at `game_time`, and schedules the next
    /// one. At most one shot per call; a long stall does not back-fill.
    pub fn due(&mut self, game_time: f32) -> bool {
        if game_time < self.next_shot_time {
            return false;
        }
        self.next_shot_time = game_time + self.spec.interval;
        true
    }

    /// Projectile launch speed from the actor's shot spec
    pub fn projectile_speed(&self) -> f32 {
        self.spec.projectile_speed
    }
}

/// Direction of a shot fired from `origin`: toward the target when one is
/// known, otherwise straight down the field.
pub fn aim(origin: Vec2, target: Option<Vec2>) -> Vec2 {
    match target {
        Some(target) => (target - origin).normalize_or(Vec2::NEG_Y),
        None => Vec2::NEG_Y,
    }
}

/// Steer a homing projectile's velocity toward `target`, turning at most
/// `turn_rate` radians over `dt` while preserving speed.
///
/// Intended for driver-side projectile updates; the core only flags which
/// shots home.
pub fn steer_toward(velocity: Vec2, position: Vec2, target: Vec2, turn_rate: f32, dt: f32) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 {
        return velocity;
    }
    let desired = target - position;
    if desired == Vec2::ZERO {
        return velocity;
    }
    let current_angle = velocity.y.atan2(velocity.x);
    let desired_angle = desired.y.atan2(desired.x);

    let mut delta = desired_angle - current_angle;
    if delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    } else if delta < -std::f32::consts::PI {
        delta += std::f32::consts::TAU;
    }

    let max_turn = turn_rate * dt.max(0.0);
    let angle = current_angle + delta.clamp(-max_turn, max_turn);
    Vec2::new(angle.cos(), angle.sin()) * speed
}
