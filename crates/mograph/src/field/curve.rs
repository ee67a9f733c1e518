//! Fixed shaping curves for field falloff.
//!
//! Control points are interpolated with a Catmull-Rom spline, sampled densely
//! and looked up by binary search with linear interpolation between samples.
//! Outputs are clipped to `[0, 1]`.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Samples per span between two control points.
pub const SEGMENTS_PER_SPAN: usize = 32;

/// Shape applied to the linear falloff ramp.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    /// Symmetric ease in and out.
    #[default]
    SCurve,
    /// Slow start, fast finish.
    EaseIn,
    /// Fast start, slow finish.
    EaseOut,
}

impl InterpolationMode {
    /// Control points of the curve, sorted by x.
    pub fn control_points(self) -> &'static [(f32, f32)] {
        match self {
            InterpolationMode::SCurve => &[(0.0, 0.0), (0.25, 0.125), (0.75, 0.875), (1.0, 1.0)],
            InterpolationMode::EaseIn => &[(0.0, 0.0), (0.5, 0.15), (1.0, 1.0)],
            InterpolationMode::EaseOut => &[(0.0, 0.0), (0.5, 0.85), (1.0, 1.0)],
        }
    }
}

/// A densely sampled spline through a set of control points.
#[derive(Debug, Clone)]
pub struct SampledCurve {
    samples: Vec<(f32, f32)>,
}

impl SampledCurve {
    pub fn for_mode(mode: InterpolationMode) -> Self {
        Self::from_points(mode.control_points(), SEGMENTS_PER_SPAN)
    }

    /// Samples a Catmull-Rom spline through `points` (sorted by x).
    pub fn from_points(points: &[(f32, f32)], segments: usize) -> Self {
        Self {
            samples: catmull_rom(points, segments.max(1)),
        }
    }

    /// Evaluates the curve at `x`, clamping `x` to the control range and the
    /// result to `[0, 1]`.
    pub fn eval(&self, x: f32) -> f32 {
        let s = &self.samples;
        let (Some(first), Some(last)) = (s.first(), s.last()) else {
            return x;
        };
        if x <= first.0 {
            return first.1.clamp(0.0, 1.0);
        }
        if x >= last.0 {
            return last.1.clamp(0.0, 1.0);
        }

        let mut lo = 0usize;
        let mut hi = s.len() - 1;
        while lo < hi.saturating_sub(1) {
            let mid = (lo + hi) >> 1;
            if s[mid].0 <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let (x0, y0) = s[lo];
        let (x1, y1) = s[hi];
        let dx = x1 - x0;
        let t = if dx == 0.0 { 0.0 } else { (x - x0) / dx };
        (y0 + (y1 - y0) * t).clamp(0.0, 1.0)
    }
}

fn catmull_rom(points: &[(f32, f32)], segments: usize) -> Vec<(f32, f32)> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let n = points.len();
    let mut out = Vec::with_capacity((n - 1) * segments + 1);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        for s in 0..segments {
            let t = s as f32 / segments as f32;
            out.push((spline(p0.0, p1.0, p2.0, p3.0, t), spline(p0.1, p1.1, p2.1, p3.1, t)));
        }
    }
    out.push(points[n - 1]);
    out
}

#[inline]
fn spline(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}
