//! Start/end interpolation across an element sequence.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalised position of element `index` in a sequence of `count`:
/// `index / max(count - 1, 1)`, clamped to `[0, 1]`.
///
/// A single-element sequence yields `0`.
pub fn factor(index: usize, count: usize) -> f32 {
    let denom = count.saturating_sub(1).max(1) as f32;
    (index as f32 / denom).clamp(0.0, 1.0)
}

/// Per-component linear blend, no easing.
#[inline]
pub fn lerp_vec3(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start + (end - start) * t
}

/// Start and end values of one interpolated channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub start: Vec3,
    pub end: Vec3,
}

impl Ramp {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn constant(value: Vec3) -> Self {
        Self::new(value, value)
    }

    /// Value for element `index` of `count`.
    pub fn at(&self, index: usize, count: usize) -> Vec3 {
        lerp_vec3(self.start, self.end, factor(index, count))
    }
}
