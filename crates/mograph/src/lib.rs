#![forbid(unsafe_code)]
//! mograph: deterministic cloners, random effectors and sphere fields.
//!
//! Modules:
//! - placement: index-addressable grid, linear and circular layouts
//! - jitter: stateless per-element random values keyed by (seed, index, channel)
//! - cloner: configuration, start/end interpolation and per-element composition
//! - effector: local-space translate/rotate/scale perturbation of cloned elements
//! - field: distance-based weights with falloff and shaping curves
//! - rig: named items, per-cloner effector linkage, recompute and events
//!
//! Every element is a pure function of its index and the configuration, so
//! output is reproducible and any element can be computed on its own.
pub mod cloner;
pub mod effector;
pub mod error;
pub mod field;
pub mod jitter;
pub mod placement;
pub mod rig;
pub mod transform;

/// Convenient re-exports for common types. Import with `use mograph::prelude::*;`.
pub mod prelude {
    pub use crate::cloner::{
        Cloner, ClonerConfig, ClonerKind, Element, MaterialRef, MaterialSlot, Ramp,
    };
    pub use crate::effector::{EffectorConfig, EffectorSample};
    pub use crate::error::{Error, Result};
    pub use crate::field::{FieldConfig, FieldSource, InterpolationMode, SphereField};
    pub use crate::placement::{
        CircularPlacement, GridPlacement, LinearPlacement, Placement, PlacementGenerator,
    };
    #[cfg(feature = "serde")]
    pub use crate::rig::{ClonerDef, EffectorDef, FieldDef, RigDef};
    pub use crate::rig::{
        CloneEvent, CloneEventKind, ClonerRecord, Direction, EventSink, FnSink, Linkage,
        MultiSink, Rig, VecSink,
    };
    pub use crate::transform::Transform;
}
