//! Per-enemy-type static configuration
//!
//! An `ActorConfig` is authored once, validated at load time, and shared
//! read-only by every concurrently-live actor of that type. Validation here
//! is what keeps the per-tick hot path free of error handling: a config that
//! constructs is a config that animates.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::CurveSpec;
use crate::path::PathSpec;

/// Content validation errors. Raised at construction/load time, never from
/// the tick path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("curve has no keyframes")]
    EmptyCurve,
    #[error("curve keyframe at t={time} is not after its predecessor")]
    UnsortedCurve { time: f32 },
    #[error("curve keyframe ({time}, {value}) is not finite")]
    NonFiniteKeyframe { time: f32, value: f32 },
    #[error("active duration must be positive, got {value}")]
    NonPositiveDuration { value: f32 },
    #[error("move speed multiplier must be positive, got {value}")]
    NonPositiveMoveSpeed { value: f32 },
    #[error("shot interval must be positive, got {value}")]
    NonPositiveShotInterval { value: f32 },
    #[error("wave list is empty")]
    EmptyWaveList,
    #[error("wave at start time {start_time} is not sorted after its predecessor")]
    UnsortedWaves { start_time: f32 },
    #[error("wave start time must be non-negative, got {start_time}")]
    NegativeWaveStart { start_time: f32 },
    #[error("spawn rate must be positive, got {value}")]
    NonPositiveSpawnRate { value: f32 },
    #[error("max simultaneous actors must be at least 1")]
    ZeroActorCap,
    #[error("probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { value: f32 },
}

/// Shooting parameters for enemy types that can fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotSpec {
    /// Seconds between shots
    pub interval: f32,
    /// Projectile launch speed (world units/sec), handed to the driver
    pub projectile_speed: f32,
}

/// Static data for one enemy type.
///
/// Immutable after construction; wrap in `Arc` to share across live actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawActorConfig", into = "RawActorConfig")]
pub struct ActorConfig {
    name: String,
    path: PathSpec,
    movement_curve: CurveSpec,
    scale_curve: CurveSpec,
    active_duration: f32,
    move_speed: f32,
    start_scale: Vec2,
    end_scale: Vec2,
    shot: Option<ShotSpec>,
}

/// Serde shadow of `ActorConfig`, so deserialized content goes through the
/// same validation as hand-built content.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawActorConfig {
    name: String,
    path: PathSpec,
    movement_curve: CurveSpec,
    scale_curve: CurveSpec,
    active_duration: f32,
    move_speed: f32,
    start_scale: Vec2,
    end_scale: Vec2,
    #[serde(default)]
    shot: Option<ShotSpec>,
}

impl ActorConfig {
    /// Validate and build a config. Fails fast on non-positive durations,
    /// speeds, or shot intervals; degenerate paths are allowed (they fall
    /// back per the path evaluator's policy).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        path: PathSpec,
        movement_curve: CurveSpec,
        scale_curve: CurveSpec,
        active_duration: f32,
        move_speed: f32,
        start_scale: Vec2,
        end_scale: Vec2,
        shot: Option<ShotSpec>,
    ) -> Result<Self, ConfigError> {
        if !(active_duration > 0.0) {
            return Err(ConfigError::NonPositiveDuration {
                value: active_duration,
            });
        }
        if !(move_speed > 0.0) {
            return Err(ConfigError::NonPositiveMoveSpeed { value: move_speed });
        }
        if let Some(shot) = &shot {
            if !(shot.interval > 0.0) {
                return Err(ConfigError::NonPositiveShotInterval {
                    value: shot.interval,
                });
            }
        }
        Ok(Self {
            name: name.into(),
            path,
            movement_curve,
            scale_curve,
            active_duration,
            move_speed,
            start_scale,
            end_scale,
            shot,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &PathSpec {
        &self.path
    }

    pub fn movement_curve(&self) -> &CurveSpec {
        &self.movement_curve
    }

    pub fn scale_curve(&self) -> &CurveSpec {
        &self.scale_curve
    }

    /// Active lifetime in seconds, always positive
    pub fn active_duration(&self) -> f32 {
        self.active_duration
    }

    /// Movement speed multiplier applied to elapsed time, always positive
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn start_scale(&self) -> Vec2 {
        self.start_scale
    }

    pub fn end_scale(&self) -> Vec2 {
        self.end_scale
    }

    /// Shooting parameters, if this type can fire
    pub fn shot(&self) -> Option<ShotSpec> {
        self.shot
    }
}

impl TryFrom<RawActorConfig> for ActorConfig {
    type Error = ConfigError;

    fn try_from(raw: RawActorConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.name,
            raw.path,
            raw.movement_curve,
            raw.scale_curve,
            raw.active_duration,
            raw.move_speed,
            raw.start_scale,
            raw.end_scale,
            raw.shot,
        )
    }
}

impl From<ActorConfig> for RawActorConfig {
    fn from(config: ActorConfig) -> Self {
        Self {
            name: config.name,
            path: config.path,
            movement_curve: config.movement_curve,
            scale_curve: config.scale_curve,
            active_duration: config.active_duration,
            move_speed: config.move_speed,
            start_scale: config.start_scale,
            end_scale: config.end_scale,
            shot: config.shot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_path() -> PathSpec {
        PathSpec::new(vec![Vec2::new(0.0, 5.0), Vec2::new(0.0, -5.0)])
    }

    fn make(duration: f32, speed: f32) -> Result<ActorConfig, ConfigError> {
        ActorConfig::new(
            "diver",
            base_path(),
            CurveSpec::linear(),
            CurveSpec::linear(),
            duration,
            speed,
            Vec2::ONE,
            Vec2::ONE,
            None,
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(make(2.0, 1.0).is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(matches!(
            make(0.0, 1.0),
            Err(ConfigError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert!(matches!(
            make(-1.0, 1.0),
            Err(ConfigError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn test_nan_duration_rejected() {
        assert!(matches!(
            make(f32::NAN, 1.0),
            Err(ConfigError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn test_zero_move_speed_rejected() {
        assert!(matches!(
            make(2.0, 0.0),
            Err(ConfigError::NonPositiveMoveSpeed { .. })
        ));
    }

    #[test]
    fn test_bad_shot_interval_rejected() {
        let result = ActorConfig::new(
            "gunner",
            base_path(),
            CurveSpec::linear(),
            CurveSpec::linear(),
            2.0,
            1.0,
            Vec2::ONE,
            Vec2::ONE,
            Some(ShotSpec {
                interval: 0.0,
                projectile_speed: 8.0,
            }),
        );
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveShotInterval { .. })
        ));
    }

    #[test]
    fn test_serde_validates_on_load() {
        let config = make(2.0, 1.0).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: ActorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        let bad = json.replace("\"active_duration\":2.0", "\"active_duration\":-1.0");
        assert!(serde_json::from_str::<ActorConfig>(&bad).is_err());
    }
}
