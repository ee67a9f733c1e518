//! Compositor turning a validated [`ClonerConfig`] into per-element transforms.
//!
//! Each element goes through the same fixed order:
//! 1. base placement position, plus position jitter;
//! 2. layout rotation bias, plus instance (or interpolated) rotation, plus rotation jitter;
//! 3. instance (or interpolated) scale times `1 + scale jitter`;
//! 4. material slot, source variant and color;
//! 5. the global translation and rotation of the whole array.
//!
//! Jitter operates in cloner space, so the global transform moves the finished
//! array without changing its internal randomisation.
use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cloner::interpolation::factor;
use crate::cloner::{ClonerConfig, ClonerKind, Element, MaterialSlot};
use crate::error::Result;
use crate::jitter;
use crate::placement::PlacementGenerator;
use crate::transform::Transform;

/// A validated cloner ready to produce elements.
pub struct Cloner {
    config: ClonerConfig,
    generator: Box<dyn PlacementGenerator>,
}

impl std::fmt::Debug for Cloner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cloner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Cloner {
    /// Validates the configuration and builds its placement generator.
    pub fn try_new(config: ClonerConfig) -> Result<Self> {
        config.validate()?;
        let generator = config.kind.generator();
        Ok(Self { config, generator })
    }

    pub fn config(&self) -> &ClonerConfig {
        &self.config
    }

    /// Number of elements produced.
    pub fn element_count(&self) -> usize {
        self.generator.element_count()
    }

    /// Composes element `index` from scratch.
    pub fn element(&self, index: usize) -> Element {
        let cfg = &self.config;
        let seed = cfg.seed;
        let id = index as u64;
        let count = self.generator.element_count();
        let placement = self.generator.place(index);

        let position = placement.position + jitter::position_jitter(seed, id, cfg.random_position);

        let (base_rotation, base_scale) = match &cfg.kind {
            ClonerKind::Linear {
                scale, rotation, ..
            } => (rotation.at(index, count), scale.at(index, count)),
            _ => (cfg.instance_rotation, cfg.instance_scale),
        };
        let rotation = placement.rotation_bias
            + base_rotation
            + jitter::rotation_jitter(seed, id, cfg.random_rotation);

        let scale_jitter = jitter::scale_jitter(seed, id, cfg.random_scale);
        let scale = base_scale * Vec3::splat(1.0 + scale_jitter);

        let material = match (&cfg.material, cfg.keep_original_materials) {
            (Some(material), false) => MaterialSlot::Override(material.clone()),
            _ => MaterialSlot::Keep,
        };
        let variant = cfg
            .pick_random_instance
            .then(|| jitter::pick_variant(seed, id, cfg.variant_count));

        let local = Transform::new(position, rotation, scale);
        Element {
            index,
            transform: local.in_parent(cfg.global_position, cfg.global_rotation),
            material,
            color: cfg.color,
            variant,
        }
    }

    /// Composes every element in index order.
    pub fn elements(&self) -> Vec<Element> {
        let count = self.element_count();
        #[cfg(feature = "parallel")]
        {
            (0..count).into_par_iter().map(|i| self.element(i)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..count).map(|i| self.element(i)).collect()
        }
    }

    /// Interpolation factor of element `index`; `0` for non-linear layouts.
    pub fn interpolation_factor(&self, index: usize) -> f32 {
        match self.config.kind {
            ClonerKind::Linear { .. } => factor(index, self.element_count()),
            _ => 0.0,
        }
    }
}
