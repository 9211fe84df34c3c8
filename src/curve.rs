//! Keyframed progress-remapping curves
//!
//! A curve maps normalized time to a progress value through a sorted keyframe
//! list with piecewise-linear interpolation. The domain is clamped to the key
//! time range on evaluation; the range is deliberately not clamped, so eased
//! overshoot (values outside [0, 1]) flows through to the path evaluator,
//! which clamps in its own domain.
//!
//! Curves are validated at construction so the per-tick hot path never has to
//! handle a malformed curve.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A single curve keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Normalized time, strictly increasing across the key list
    pub time: f32,
    /// Progress value at that time
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Validated, immutable keyframe curve. Shared read-only by every live actor
/// of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct CurveSpec {
    keys: Vec<Keyframe>,
}

impl CurveSpec {
    /// Build a curve, rejecting empty key lists, non-finite keys, and key
    /// times that are not strictly increasing.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        for key in &keys {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(ConfigError::NonFiniteKeyframe {
                    time: key.time,
                    value: key.value,
                });
            }
        }
        for pair in keys.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(ConfigError::UnsortedCurve {
                    time: pair[1].time,
                });
            }
        }
        Ok(Self { keys })
    }

    /// Identity ramp: 0 -> 0, 1 -> 1
    pub fn linear() -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)],
        }
    }

    /// Constant curve holding a single value
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Keyframes in time order
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Evaluate at time `t`. Input is clamped to the key time range; output
    /// is whatever the keys say, including values outside [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // Keys are few (tens at most); a linear scan is fine and branch-predictable
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                let f = (t - a.time) / span;
                return a.value + (b.value - a.value) * f;
            }
        }
        last.value
    }
}

impl TryFrom<Vec<Keyframe>> for CurveSpec {
    type Error = ConfigError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<CurveSpec> for Vec<Keyframe> {
    fn from(curve: CurveSpec) -> Self {
        curve.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_curve_rejected() {
        assert!(matches!(
            CurveSpec::new(vec![]),
            Err(ConfigError::EmptyCurve)
        ));
    }

    #[test]
    fn test_unsorted_curve_rejected() {
        let keys = vec![Keyframe::new(0.0, 0.0), Keyframe::new(0.0, 1.0)];
        assert!(matches!(
            CurveSpec::new(keys),
            Err(ConfigError::UnsortedCurve { .. })
        ));
    }

    #[test]
    fn test_non_finite_keyframe_rejected() {
        let keys = vec![Keyframe::new(0.0, f32::NAN)];
        assert!(matches!(
            CurveSpec::new(keys),
            Err(ConfigError::NonFiniteKeyframe { .. })
        ));
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let curve = CurveSpec::linear();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(0.25), 0.25);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_input_clamped_to_key_range() {
        let curve = CurveSpec::linear();
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(42.0), 1.0);
    }

    #[test]
    fn test_constant_curve() {
        let curve = CurveSpec::constant(0.4);
        assert_eq!(curve.evaluate(0.0), 0.4);
        assert_eq!(curve.evaluate(0.9), 0.4);
    }

    #[test]
    fn test_output_not_clamped() {
        // Overshoot ease: peaks at 1.2 before settling at 1.0
        let curve = CurveSpec::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.6, 1.2),
            Keyframe::new(1.0, 1.0),
        ])
        .unwrap();
        assert!(curve.evaluate(0.6) > 1.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_piecewise_interpolation() {
        let curve = CurveSpec::new(vec![
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.5, 1.0),
            Keyframe::new(1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(curve.evaluate(0.25), 0.5);
        assert_eq!(curve.evaluate(0.5), 1.0);
        assert_eq!(curve.evaluate(0.75), 0.5);
    }

    #[test]
    fn test_serde_rejects_bad_curve() {
        let json = r#"[{"time":0.5,"value":0.0},{"time":0.1,"value":1.0}]"#;
        assert!(serde_json::from_str::<CurveSpec>(json).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let curve = CurveSpec::new(vec![
            Keyframe::new(0.0, 0.1),
            Keyframe::new(1.0, 0.9),
        ])
        .unwrap();
        let json = serde_json::to_string(&curve).unwrap();
        let back: CurveSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(curve, back);
    }
}
