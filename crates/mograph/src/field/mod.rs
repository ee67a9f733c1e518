//! Spherical influence field.
//!
//! A [`SphereField`] maps a query point to a weight between `outer_strength`
//! (at or beyond the source radius) and `inner_strength` (at the source
//! centre). The linear ramp in between can be sharpened with `falloff` and
//! reshaped by one of the fixed [`InterpolationMode`] curves.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cloner::ensure_finite;
use crate::error::{Error, Result};

pub mod curve;

pub use curve::{InterpolationMode, SampledCurve};

/// Upper bound of the falloff factor; keeps the ramp from becoming a step.
pub const FALLOFF_LIMIT: f32 = 0.999;

/// Weight reported when a field has no source.
pub const NEUTRAL_WEIGHT: f32 = 1.0;

/// Position and scale of the reference object the field is centred on.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSource {
    pub position: Vec3,
    /// The radius is the largest absolute scale component.
    pub scale: Vec3,
}

impl FieldSource {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Sphere with a uniform radius.
    pub fn sphere(position: Vec3, radius: f32) -> Self {
        Self::new(position, Vec3::splat(radius))
    }

    pub fn radius(&self) -> f32 {
        self.scale.abs().max_element()
    }
}

/// Configuration of a spherical field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Reference object; `None` yields [`NEUTRAL_WEIGHT`] everywhere.
    pub source: Option<FieldSource>,
    /// Sharpness of the edge in `[0, 1]`.
    pub falloff: f32,
    /// Weight at the centre, in `[0, 1]`.
    pub inner_strength: f32,
    /// Weight at and beyond the radius, in `[0, 1]`.
    pub outer_strength: f32,
    pub interpolation_mode: InterpolationMode,
    /// How far the ramp is pulled towards the shaping curve, in `[0, 1]`.
    pub interpolation_strength: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            source: None,
            falloff: 0.0,
            inner_strength: 1.0,
            outer_strength: 0.0,
            interpolation_mode: InterpolationMode::SCurve,
            interpolation_strength: 0.0,
        }
    }
}

impl FieldConfig {
    pub fn new(source: FieldSource) -> Self {
        Self {
            source: Some(source),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: Option<FieldSource>) -> Self {
        self.source = source;
        self
    }

    pub fn with_falloff(mut self, falloff: f32) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_strengths(mut self, inner: f32, outer: f32) -> Self {
        self.inner_strength = inner;
        self.outer_strength = outer;
        self
    }

    pub fn with_interpolation(mut self, mode: InterpolationMode, strength: f32) -> Self {
        self.interpolation_mode = mode;
        self.interpolation_strength = strength;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("falloff", self.falloff),
            ("inner_strength", self.inner_strength),
            ("outer_strength", self.outer_strength),
            ("interpolation_strength", self.interpolation_strength),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::invalid(format!("{name} must be in [0, 1], got {v}")));
            }
        }
        if let Some(source) = &self.source {
            ensure_finite("field source position", source.position)?;
            ensure_finite("field source scale", source.scale)?;
        }
        Ok(())
    }
}

/// A validated field ready for evaluation.
#[derive(Debug, Clone)]
pub struct SphereField {
    config: FieldConfig,
    curve: SampledCurve,
}

impl SphereField {
    pub fn try_new(config: FieldConfig) -> Result<Self> {
        config.validate()?;
        let curve = SampledCurve::for_mode(config.interpolation_mode);
        Ok(Self { config, curve })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Whether the field has a source to measure distance from.
    pub fn has_source(&self) -> bool {
        self.config.source.is_some()
    }

    /// Linear ramp: `1` at the centre, `0` at and beyond the radius.
    ///
    /// `(1 - d / r) / (1 - falloff * 0.999)`, clamped to `[0, 1]`.
    pub fn ramp(&self, point: Vec3) -> Option<f32> {
        let source = self.config.source?;
        let d = point.distance(source.position);
        let r = source.radius();
        if r <= 0.0 {
            return Some(if d == 0.0 { 1.0 } else { 0.0 });
        }
        let normalized = (d / r).clamp(0.0, 1.0);
        let span = 1.0 - self.config.falloff * FALLOFF_LIMIT;
        Some(((1.0 - normalized) / span).clamp(0.0, 1.0))
    }

    /// Ramp after the shaping curve, blended by `interpolation_strength`.
    pub fn shaped(&self, ramp: f32) -> f32 {
        let curved = self.curve.eval(ramp);
        ramp + (curved - ramp) * self.config.interpolation_strength
    }

    /// [`SphereField::weight`] for points coming from other math libraries.
    pub fn weight_at(&self, point: impl Into<mint::Vector3<f32>>) -> f32 {
        self.weight(Vec3::from(point.into()))
    }

    /// Weight at `point`, between `outer_strength` and `inner_strength`.
    ///
    /// Without a source this is [`NEUTRAL_WEIGHT`].
    pub fn weight(&self, point: Vec3) -> f32 {
        let Some(ramp) = self.ramp(point) else {
            return NEUTRAL_WEIGHT;
        };
        let s = self.shaped(ramp);
        let outer = self.config.outer_strength;
        let inner = self.config.inner_strength;
        let w = outer * (1.0 - s) + inner * s;
        w.clamp(outer.min(inner), outer.max(inner))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn field(config: FieldConfig) -> SphereField {
        SphereField::try_new(config).unwrap()
    }

    fn rand_unit(rng: &mut StdRng) -> f32 {
        (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    #[test]
    fn centre_resolves_to_inner_and_edge_to_outer() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..64 {
            let modes = [
                InterpolationMode::SCurve,
                InterpolationMode::EaseIn,
                InterpolationMode::EaseOut,
            ];
            let cfg = FieldConfig::new(FieldSource::sphere(Vec3::new(1.0, 2.0, 3.0), 2.0))
                .with_falloff(rand_unit(&mut rng))
                .with_strengths(rand_unit(&mut rng), rand_unit(&mut rng))
                .with_interpolation(
                    modes[(rng.next_u32() % 3) as usize],
                    rand_unit(&mut rng),
                );
            let f = field(cfg.clone());
            assert_eq!(f.weight(Vec3::new(1.0, 2.0, 3.0)), cfg.inner_strength);
            assert_eq!(f.weight(Vec3::new(3.0, 2.0, 3.0)), cfg.outer_strength);
            assert_eq!(f.weight(Vec3::new(1.0, 2.0, 30.0)), cfg.outer_strength);
        }
    }

    #[test]
    fn linear_ramp_without_falloff() {
        let f = field(FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 4.0)));
        assert!((f.weight(Vec3::new(1.0, 0.0, 0.0)) - 0.75).abs() < 1e-6);
        assert!((f.weight(Vec3::new(0.0, 2.0, 0.0)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn falloff_widens_the_full_strength_core() {
        let soft = field(FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 1.0)));
        let hard = field(FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 1.0)).with_falloff(0.5));
        let p = Vec3::new(0.4, 0.0, 0.0);
        assert!(hard.weight(p) > soft.weight(p));
        assert_eq!(hard.weight(Vec3::new(0.45, 0.0, 0.0)), 1.0);

        let max = field(FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 1.0)).with_falloff(1.0));
        assert_eq!(max.weight(Vec3::new(0.99, 0.0, 0.0)), 1.0);
        assert_eq!(max.weight(Vec3::new(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn radius_uses_largest_absolute_scale() {
        let source = FieldSource::new(Vec3::ZERO, Vec3::new(1.0, -3.0, 2.0));
        assert_eq!(source.radius(), 3.0);
        let f = field(FieldConfig::new(source));
        assert!(f.weight(Vec3::new(2.9, 0.0, 0.0)) > 0.0);
    }

    #[test]
    fn zero_strength_interpolation_is_linear() {
        let f = field(
            FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 1.0))
                .with_interpolation(InterpolationMode::EaseIn, 0.0),
        );
        assert!((f.shaped(0.3) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn full_strength_interpolation_follows_curve() {
        let f = field(
            FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 1.0))
                .with_interpolation(InterpolationMode::EaseIn, 1.0),
        );
        assert!((f.shaped(0.5) - 0.15).abs() < 1e-3);
        let g = field(
            FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 1.0))
                .with_interpolation(InterpolationMode::EaseOut, 1.0),
        );
        assert!((g.shaped(0.5) - 0.85).abs() < 1e-3);
    }

    #[test]
    fn inverted_strengths_are_supported() {
        let f = field(
            FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 2.0)).with_strengths(0.0, 1.0),
        );
        assert_eq!(f.weight(Vec3::ZERO), 0.0);
        assert_eq!(f.weight(Vec3::splat(5.0)), 1.0);
    }

    #[test]
    fn weight_at_accepts_mint_points() {
        let f = field(FieldConfig::new(FieldSource::sphere(Vec3::ZERO, 4.0)));
        let p = mint::Vector3 { x: 2.0, y: 0.0, z: 0.0 };
        assert_eq!(f.weight_at(p), f.weight(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn missing_source_is_neutral() {
        let f = field(FieldConfig::default());
        assert!(!f.has_source());
        assert_eq!(f.weight(Vec3::new(100.0, 0.0, 0.0)), NEUTRAL_WEIGHT);
    }

    #[test]
    fn zero_radius_only_hits_the_centre() {
        let f = field(FieldConfig::new(FieldSource::sphere(Vec3::ONE, 0.0)));
        assert_eq!(f.weight(Vec3::ONE), 1.0);
        assert_eq!(f.weight(Vec3::ZERO), 0.0);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(FieldConfig::default().with_falloff(1.2).validate().is_err());
        assert!(FieldConfig::default().with_strengths(-0.1, 0.0).validate().is_err());
        assert!(SphereField::try_new(
            FieldConfig::new(FieldSource::sphere(Vec3::splat(f32::INFINITY), 1.0))
        )
        .is_err());
    }
}
