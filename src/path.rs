//! Control-point paths for actor motion
//!
//! A path is an ordered set of 2D control points: entry point, zero or more
//! interior waypoints, exit point. N points define N-1 equal-length segments
//! in parameter space; evaluation maps a normalized progress value to a
//! linearly interpolated position along the segments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp01;

/// Immutable ordered control-point sequence.
///
/// Shared read-only by every live actor of a type; entry/exit offsets are
/// folded into the first and last points at authoring time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    points: Vec<Vec2>,
}

impl PathSpec {
    /// Build a path from raw control points. Any point count is accepted;
    /// empty and single-point paths degenerate per `evaluate`.
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Build the usual entry + waypoints + exit layout.
    pub fn with_endpoints(entry: Vec2, waypoints: &[Vec2], exit: Vec2) -> Self {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(entry);
        points.extend_from_slice(waypoints);
        points.push(exit);
        Self { points }
    }

    /// Control points in order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// First control point, or origin for an empty path
    pub fn entry(&self) -> Vec2 {
        self.points.first().copied().unwrap_or(Vec2::ZERO)
    }

    /// Last control point, or origin for an empty path
    pub fn exit(&self) -> Vec2 {
        self.points.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Evaluate the path at normalized progress `t`.
    ///
    /// `t` is clamped to [0, 1] internally, so curve outputs that overshoot
    /// are safe to pass straight through. Degenerate inputs are policy, not
    /// errors: an empty path evaluates to the origin, a single-point path to
    /// that point for all `t`.
    ///
    /// For N >= 2 points the segment index is `min(floor(t * (N-1)), N-2)`;
    /// the clamp keeps `t = 1.0` inside the final segment instead of running
    /// off the end of the point list.
    pub fn evaluate(&self, t: f32) -> Vec2 {
        match self.points.len() {
            0 => Vec2::ZERO,
            1 => self.points[0],
            n => {
                let t = clamp01(t);
                if t == 1.0 {
                    // Exact, not lerp(a, b, 1.0): the exit point must come
                    // back bit-identical
                    return self.points[n - 1];
                }
                let segment_count = (n - 1) as f32;
                let scaled = t * segment_count;
                let segment = (scaled.floor() as usize).min(n - 2);
                let local = scaled - segment as f32;
                self.points[segment].lerp(self.points[segment + 1], local)
            }
        }
    }
}
