//! Cloner configuration and per-element output records.
//!
//! A [`ClonerConfig`] describes one array of duplicated geometry: its layout
//! ([`ClonerKind`]), per-instance transform, jitter magnitudes, material override
//! and global placement. [`compose::Cloner`] turns a validated configuration into
//! a sequence of [`Element`]s.
use glam::{UVec3, Vec3, Vec4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::placement::{CircularPlacement, GridPlacement, LinearPlacement, PlacementGenerator};
use crate::transform::Transform;

pub mod compose;
pub mod interpolation;

pub use compose::Cloner;
pub use interpolation::Ramp;

/// Smallest element count accepted by a circular cloner.
pub const MIN_CIRCLE_COUNT: u32 = 3;

/// Layout of a cloner and its layout-specific parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum ClonerKind {
    Grid {
        /// Elements per axis.
        counts: UVec3,
        spacing: Vec3,
        /// Centre the grid's bounding box on the cloner origin.
        center: bool,
    },
    Linear {
        count: u32,
        offset: Vec3,
        /// Scale ramp from the first to the last element.
        scale: Ramp,
        /// Rotation ramp (XYZ Euler, degrees) from the first to the last element.
        rotation: Ramp,
    },
    Circular {
        count: u32,
        radius: f32,
        height: f32,
    },
}

impl ClonerKind {
    /// Default 3x3x1 grid with unit spacing.
    pub fn grid() -> Self {
        ClonerKind::Grid {
            counts: UVec3::new(3, 3, 1),
            spacing: Vec3::ONE,
            center: false,
        }
    }

    /// Default line of five elements along +X.
    pub fn linear() -> Self {
        ClonerKind::Linear {
            count: 5,
            offset: Vec3::X,
            scale: Ramp::constant(Vec3::ONE),
            rotation: Ramp::constant(Vec3::ZERO),
        }
    }

    /// Default ring of eight elements with unit radius.
    pub fn circular() -> Self {
        ClonerKind::Circular {
            count: 8,
            radius: 1.0,
            height: 0.0,
        }
    }

    /// Short lowercase name, used for naming and logging.
    pub fn label(&self) -> &'static str {
        match self {
            ClonerKind::Grid { .. } => "grid",
            ClonerKind::Linear { .. } => "linear",
            ClonerKind::Circular { .. } => "circular",
        }
    }

    /// Number of elements this layout produces.
    pub fn element_count(&self) -> usize {
        match self {
            ClonerKind::Grid { counts, .. } => {
                counts.x as usize * counts.y as usize * counts.z as usize
            }
            ClonerKind::Linear { count, .. } | ClonerKind::Circular { count, .. } => {
                *count as usize
            }
        }
    }

    /// Builds the placement generator for this layout.
    pub fn generator(&self) -> Box<dyn PlacementGenerator> {
        match self {
            ClonerKind::Grid {
                counts,
                spacing,
                center,
            } => Box::new(GridPlacement::new(*counts, *spacing, *center)),
            ClonerKind::Linear { count, offset, .. } => {
                Box::new(LinearPlacement::new(*count as usize, *offset))
            }
            ClonerKind::Circular {
                count,
                radius,
                height,
            } => Box::new(CircularPlacement::new(*count as usize, *radius, *height)),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ClonerKind::Grid {
                counts, spacing, ..
            } => {
                if counts.min_element() < 1 {
                    return Err(Error::invalid("grid counts must be >= 1 on every axis"));
                }
                ensure_finite("spacing", *spacing)?;
            }
            ClonerKind::Linear {
                count,
                offset,
                scale,
                rotation,
            } => {
                if *count < 1 {
                    return Err(Error::invalid("linear count must be >= 1"));
                }
                ensure_finite("offset", *offset)?;
                ensure_finite("scale start", scale.start)?;
                ensure_finite("scale end", scale.end)?;
                ensure_finite("rotation start", rotation.start)?;
                ensure_finite("rotation end", rotation.end)?;
            }
            ClonerKind::Circular {
                count,
                radius,
                height,
            } => {
                if *count < MIN_CIRCLE_COUNT {
                    return Err(Error::invalid(format!(
                        "circular count must be >= {MIN_CIRCLE_COUNT}, got {count}"
                    )));
                }
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(Error::invalid(format!(
                        "radius must be finite and >= 0, got {radius}"
                    )));
                }
                if !height.is_finite() {
                    return Err(Error::invalid("height must be finite"));
                }
            }
        }
        Ok(())
    }
}

/// Name of a material assigned to cloned instances.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialRef(String);

impl MaterialRef {
    /// Validates and wraps a material name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid("material name must not be empty"));
        }
        if name.trim() != name {
            return Err(Error::invalid(format!(
                "material name '{name}' has leading or trailing whitespace"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(Error::invalid(format!(
                "material name {name:?} contains control characters"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(&self) -> Result<()> {
        Self::new(self.0.clone()).map(|_| ())
    }
}

/// Material outcome for one element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialSlot {
    /// The source geometry keeps its own materials.
    Keep,
    /// Every face gets the given material.
    Override(MaterialRef),
}

/// Full configuration of one cloner.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ClonerConfig {
    pub kind: ClonerKind,
    /// Translation applied to the whole array after per-element transforms.
    pub global_position: Vec3,
    /// Rotation (XYZ Euler, degrees) applied to the whole array last.
    pub global_rotation: Vec3,
    /// Per-instance scale. Linear cloners use their scale ramp instead.
    pub instance_scale: Vec3,
    /// Per-instance rotation (degrees). Linear cloners use their rotation ramp instead.
    pub instance_rotation: Vec3,
    /// Position jitter magnitude per axis.
    pub random_position: Vec3,
    /// Rotation jitter magnitude per axis, degrees.
    pub random_rotation: Vec3,
    /// Uniform scale jitter magnitude in `[0, 1]`.
    pub random_scale: f32,
    pub seed: u64,
    pub material: Option<MaterialRef>,
    /// RGBA tint carried to every element.
    pub color: Vec4,
    pub keep_original_materials: bool,
    /// Give each element one randomly chosen source variant.
    pub pick_random_instance: bool,
    /// Number of source variants available for random picking.
    pub variant_count: usize,
}

impl Default for ClonerConfig {
    fn default() -> Self {
        Self::new(ClonerKind::grid())
    }
}

impl ClonerConfig {
    /// Creates a configuration for the given layout with neutral transforms.
    pub fn new(kind: ClonerKind) -> Self {
        Self {
            kind,
            global_position: Vec3::ZERO,
            global_rotation: Vec3::ZERO,
            instance_scale: Vec3::ONE,
            instance_rotation: Vec3::ZERO,
            random_position: Vec3::ZERO,
            random_rotation: Vec3::ZERO,
            random_scale: 0.0,
            seed: 0,
            material: None,
            color: Vec4::ONE,
            keep_original_materials: true,
            pick_random_instance: false,
            variant_count: 1,
        }
    }

    pub fn grid(counts: UVec3, spacing: Vec3) -> Self {
        Self::new(ClonerKind::Grid {
            counts,
            spacing,
            center: false,
        })
    }

    pub fn linear(count: u32, offset: Vec3) -> Self {
        Self::new(ClonerKind::Linear {
            count,
            offset,
            scale: Ramp::constant(Vec3::ONE),
            rotation: Ramp::constant(Vec3::ZERO),
        })
    }

    pub fn circular(count: u32, radius: f32) -> Self {
        Self::new(ClonerKind::Circular {
            count,
            radius,
            height: 0.0,
        })
    }

    /// Centres a grid layout. No effect on other layouts.
    pub fn with_center_grid(mut self, centered: bool) -> Self {
        if let ClonerKind::Grid { center, .. } = &mut self.kind {
            *center = centered;
        }
        self
    }

    /// Sets the start/end scale of a linear layout. No effect on other layouts.
    pub fn with_scale_ramp(mut self, start: Vec3, end: Vec3) -> Self {
        if let ClonerKind::Linear { scale, .. } = &mut self.kind {
            *scale = Ramp::new(start, end);
        }
        self
    }

    /// Sets the start/end rotation of a linear layout. No effect on other layouts.
    pub fn with_rotation_ramp(mut self, start: Vec3, end: Vec3) -> Self {
        if let ClonerKind::Linear { rotation, .. } = &mut self.kind {
            *rotation = Ramp::new(start, end);
        }
        self
    }

    /// Sets the ring height of a circular layout. No effect on other layouts.
    pub fn with_height(mut self, value: f32) -> Self {
        if let ClonerKind::Circular { height, .. } = &mut self.kind {
            *height = value;
        }
        self
    }

    pub fn with_global_transform(mut self, position: Vec3, rotation: Vec3) -> Self {
        self.global_position = position;
        self.global_rotation = rotation;
        self
    }

    pub fn with_instance_scale(mut self, scale: Vec3) -> Self {
        self.instance_scale = scale;
        self
    }

    pub fn with_instance_rotation(mut self, rotation: Vec3) -> Self {
        self.instance_rotation = rotation;
        self
    }

    /// Sets the position, rotation and scale jitter magnitudes.
    pub fn with_random(mut self, position: Vec3, rotation: Vec3, scale: f32) -> Self {
        self.random_position = position;
        self.random_rotation = rotation;
        self.random_scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the material of every element unless originals are kept.
    pub fn with_material(mut self, material: MaterialRef, keep_original: bool) -> Self {
        self.material = Some(material);
        self.keep_original_materials = keep_original;
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Enables random variant picking among `variant_count` sources.
    pub fn with_random_instance(mut self, variant_count: usize) -> Self {
        self.pick_random_instance = true;
        self.variant_count = variant_count;
        self
    }

    /// Number of elements the cloner produces.
    pub fn element_count(&self) -> usize {
        self.kind.element_count()
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()?;
        ensure_finite("global_position", self.global_position)?;
        ensure_finite("global_rotation", self.global_rotation)?;
        ensure_finite("instance_scale", self.instance_scale)?;
        ensure_finite("instance_rotation", self.instance_rotation)?;
        ensure_non_negative("random_position", self.random_position)?;
        ensure_non_negative("random_rotation", self.random_rotation)?;
        if !(0.0..=1.0).contains(&self.random_scale) {
            return Err(Error::invalid(format!(
                "random_scale must be in [0, 1], got {}",
                self.random_scale
            )));
        }
        if let Some(material) = &self.material {
            material.validate()?;
        }
        if !self.color.is_finite() {
            return Err(Error::invalid("color must be finite"));
        }
        if self.pick_random_instance && self.variant_count < 1 {
            return Err(Error::invalid(
                "variant_count must be >= 1 when picking random instances",
            ));
        }
        Ok(())
    }
}

/// One produced copy in a cloner's output sequence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Zero-based element index.
    pub index: usize,
    pub transform: Transform,
    pub material: MaterialSlot,
    pub color: Vec4,
    /// Picked source variant, or `None` when the whole source is instanced.
    pub variant: Option<usize>,
}

pub(crate) fn ensure_finite(name: &str, v: Vec3) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be finite, got {v}")))
    }
}

pub(crate) fn ensure_non_negative(name: &str, v: Vec3) -> Result<()> {
    ensure_finite(name, v)?;
    if v.min_element() < 0.0 {
        return Err(Error::invalid(format!("{name} must be >= 0, got {v}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_cloner_kinds() {
        assert_eq!(ClonerConfig::default().element_count(), 9);
        assert_eq!(ClonerConfig::new(ClonerKind::linear()).element_count(), 5);
        assert_eq!(ClonerConfig::new(ClonerKind::circular()).element_count(), 8);
        assert!(ClonerConfig::default().keep_original_materials);
    }

    #[test]
    fn validate_rejects_small_counts() {
        let grid = ClonerConfig::grid(UVec3::new(2, 0, 1), Vec3::ONE);
        assert!(matches!(grid.validate(), Err(Error::InvalidConfig(_))));
        assert!(ClonerConfig::linear(0, Vec3::X).validate().is_err());
        assert!(ClonerConfig::circular(2, 1.0).validate().is_err());
        assert!(ClonerConfig::circular(3, 1.0).validate().is_ok());
        assert!(ClonerConfig::linear(1, Vec3::X).validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_radius() {
        let err = ClonerConfig::circular(4, -1.0).validate().unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn validate_rejects_out_of_range_random_scale() {
        let cfg = ClonerConfig::default().with_random(Vec3::ZERO, Vec3::ZERO, 1.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_vectors() {
        let cfg = ClonerConfig::default().with_instance_scale(Vec3::new(1.0, f32::NAN, 1.0));
        assert!(cfg.validate().is_err());
        let cfg = ClonerConfig::default().with_random(Vec3::splat(-1.0), Vec3::ZERO, 0.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn material_names_are_checked() {
        assert!(MaterialRef::new("Steel").is_ok());
        assert!(MaterialRef::new("").is_err());
        assert!(MaterialRef::new("  ").is_err());
        assert!(MaterialRef::new(" Steel").is_err());
        assert!(MaterialRef::new("Ste\nel").is_err());
    }

    #[test]
    fn kind_specific_builders_ignore_other_layouts() {
        let cfg = ClonerConfig::circular(6, 2.0).with_center_grid(true);
        assert_eq!(cfg.kind, ClonerKind::Circular { count: 6, radius: 2.0, height: 0.0 });
        let cfg = ClonerConfig::linear(3, Vec3::X).with_scale_ramp(Vec3::ONE, Vec3::ZERO);
        match cfg.kind {
            ClonerKind::Linear { scale, .. } => assert_eq!(scale.end, Vec3::ZERO),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn random_instance_requires_variants() {
        let cfg = ClonerConfig::default().with_random_instance(0);
        assert!(cfg.validate().is_err());
        let cfg = ClonerConfig::default().with_random_instance(3);
        assert!(cfg.validate().is_ok());
    }
}
