//! Random effectors: per-element translate, rotate and scale applied on top of
//! an already composed cloner output.
//!
//! Effectors work in each element's local frame. Translation offsets follow the
//! element's current rotation and scale, rotations are post-multiplied, and
//! scale factors multiply the current scale. Chaining effectors is therefore
//! order dependent.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cloner::{ensure_non_negative, Element};
use crate::error::{Error, Result};
use crate::jitter::{self, Channel};
use crate::transform::Transform;

/// Configuration of one random effector.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct EffectorConfig {
    pub enabled: bool,
    /// Multiplies the position and rotation magnitudes, in `[0, 1]`.
    pub strength: f32,
    /// Position jitter magnitude per axis.
    pub position_range: Vec3,
    /// Rotation jitter magnitude per axis, degrees.
    pub rotation_range: Vec3,
    /// Scale jitter magnitude per axis, each in `[0, 1]`. Not affected by `strength`.
    pub scale_range: Vec3,
    /// One scale factor for all axes, drawn with the largest `scale_range` component.
    pub uniform_scale: bool,
    pub seed: u64,
    /// Name of the field that weights this effector, if any.
    pub field: Option<String>,
}

impl Default for EffectorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 0.0,
            position_range: Vec3::ZERO,
            rotation_range: Vec3::ZERO,
            scale_range: Vec3::ZERO,
            uniform_scale: true,
            seed: 0,
            field: None,
        }
    }
}

impl EffectorConfig {
    /// An enabled effector at full strength with zero ranges.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            strength: 1.0,
            ..Default::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_position_range(mut self, range: Vec3) -> Self {
        self.position_range = range;
        self
    }

    pub fn with_rotation_range(mut self, range: Vec3) -> Self {
        self.rotation_range = range;
        self
    }

    pub fn with_scale_range(mut self, range: Vec3, uniform: bool) -> Self {
        self.scale_range = range;
        self.uniform_scale = uniform;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_field(mut self, field: Option<String>) -> Self {
        self.field = field;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(Error::invalid(format!(
                "effector strength must be in [0, 1], got {}",
                self.strength
            )));
        }
        ensure_non_negative("position_range", self.position_range)?;
        ensure_non_negative("rotation_range", self.rotation_range)?;
        ensure_non_negative("scale_range", self.scale_range)?;
        if self.scale_range.max_element() > 1.0 {
            return Err(Error::invalid(format!(
                "scale_range components must be <= 1, got {}",
                self.scale_range
            )));
        }
        Ok(())
    }

    /// Offsets drawn for element `index` before weighting.
    pub fn sample(&self, index: usize) -> EffectorSample {
        let id = index as u64;
        EffectorSample {
            position: jitter::symmetric_vec3(
                self.seed,
                id,
                Channel::EFFECTOR_POSITION,
                self.position_range,
            ),
            rotation: jitter::symmetric_vec3(
                self.seed,
                id,
                Channel::EFFECTOR_ROTATION,
                self.rotation_range,
            ),
            scale: jitter::effector_scale_factor(
                self.seed,
                id,
                self.scale_range,
                self.uniform_scale,
            ),
        }
    }

    /// Applies this effector to `transform` of element `index` with field
    /// weight `weight`.
    ///
    /// A disabled effector leaves the transform untouched.
    pub fn apply(&self, transform: &mut Transform, index: usize, weight: f32) {
        if !self.enabled {
            return;
        }
        let sample = self.sample(index);
        let k = self.strength * weight;
        transform.translate_local(sample.position * k);
        transform.rotate_local(sample.rotation * k);
        transform.scale_by(sample.scale);
    }

    /// Applies this effector to an element in place.
    pub fn apply_to(&self, element: &mut Element, weight: f32) {
        self.apply(&mut element.transform, element.index, weight);
    }
}

/// Raw per-element draws of one effector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectorSample {
    pub position: Vec3,
    /// Degrees.
    pub rotation: Vec3,
    /// Multiplicative factor around one.
    pub scale: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn defaults_are_disabled() {
        let cfg = EffectorConfig::default();
        assert!(!cfg.enabled);
        assert_eq!(cfg.strength, 0.0);
        assert!(cfg.uniform_scale);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn disabled_effector_is_identity() {
        let cfg = EffectorConfig::enabled()
            .with_position_range(Vec3::splat(5.0))
            .with_scale_range(Vec3::splat(0.5), true)
            .with_enabled(false);
        let original = Transform::new(Vec3::ONE, Vec3::new(10.0, 0.0, 0.0), Vec3::splat(2.0));
        let mut t = original;
        cfg.apply(&mut t, 3, 1.0);
        assert_eq!(t, original);
    }

    #[test]
    fn zero_strength_still_applies_scale() {
        let cfg = EffectorConfig::enabled()
            .with_strength(0.0)
            .with_position_range(Vec3::splat(5.0))
            .with_rotation_range(Vec3::splat(45.0))
            .with_scale_range(Vec3::splat(0.5), true)
            .with_seed(2);
        let mut t = Transform::IDENTITY;
        cfg.apply(&mut t, 0, 1.0);
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, cfg.sample(0).scale);
    }

    #[test]
    fn weight_scales_position_offset() {
        let cfg = EffectorConfig::enabled()
            .with_position_range(Vec3::splat(2.0))
            .with_seed(9);
        let sample = cfg.sample(4);
        let mut full = Transform::IDENTITY;
        cfg.apply(&mut full, 4, 1.0);
        let mut half = Transform::IDENTITY;
        cfg.apply(&mut half, 4, 0.5);
        assert!(approx(full.translation, sample.position));
        assert!(approx(half.translation, sample.position * 0.5));
    }

    #[test]
    fn offsets_follow_element_orientation() {
        let cfg = EffectorConfig::enabled()
            .with_position_range(Vec3::new(1.0, 0.0, 0.0))
            .with_seed(1);
        let dx = cfg.sample(0).position.x;
        let mut t = Transform::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 90.0), Vec3::ONE);
        cfg.apply(&mut t, 0, 1.0);
        assert!(approx(t.translation, Vec3::new(0.0, dx, 0.0)));
    }

    #[test]
    fn chain_order_matters() {
        let a = EffectorConfig::enabled()
            .with_rotation_range(Vec3::new(0.0, 0.0, 90.0))
            .with_seed(1);
        let b = EffectorConfig::enabled()
            .with_position_range(Vec3::new(3.0, 0.0, 0.0))
            .with_scale_range(Vec3::splat(0.5), true)
            .with_seed(2);

        let differs = (0..16).any(|index| {
            let mut ab = Transform::IDENTITY;
            a.apply(&mut ab, index, 1.0);
            b.apply(&mut ab, index, 1.0);

            let mut ba = Transform::IDENTITY;
            b.apply(&mut ba, index, 1.0);
            a.apply(&mut ba, index, 1.0);

            !approx(ab.translation, ba.translation)
        });
        assert!(differs);
    }

    #[test]
    fn pure_translations_commute() {
        let a = EffectorConfig::enabled()
            .with_position_range(Vec3::splat(1.0))
            .with_seed(3);
        let b = EffectorConfig::enabled()
            .with_position_range(Vec3::splat(2.0))
            .with_seed(4);
        let mut ab = Transform::IDENTITY;
        a.apply(&mut ab, 7, 1.0);
        b.apply(&mut ab, 7, 1.0);
        let mut ba = Transform::IDENTITY;
        b.apply(&mut ba, 7, 1.0);
        a.apply(&mut ba, 7, 1.0);
        assert!(approx(ab.translation, ba.translation));
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        assert!(EffectorConfig::enabled().with_strength(1.5).validate().is_err());
        assert!(EffectorConfig::enabled()
            .with_scale_range(Vec3::new(0.0, 1.2, 0.0), false)
            .validate()
            .is_err());
        assert!(EffectorConfig::enabled()
            .with_position_range(Vec3::new(-1.0, 0.0, 0.0))
            .validate()
            .is_err());
    }
}
