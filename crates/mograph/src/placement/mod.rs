//! Placement generators mapping an element index to a base position.
//!
//! This module defines the [`PlacementGenerator`] trait and the concrete layouts
//! used by the cloners: [`GridPlacement`], [`LinearPlacement`] and
//! [`CircularPlacement`]. Generators are stateless; any index can be placed on
//! its own.
use glam::Vec3;

pub mod circular;
pub mod grid;
pub mod linear;

pub use circular::CircularPlacement;
pub use grid::GridPlacement;
pub use linear::LinearPlacement;

/// Base placement of a single element, before any jitter or user transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position in cloner space.
    pub position: Vec3,
    /// Fixed rotation (XYZ Euler, degrees) the layout applies before user rotation.
    pub rotation_bias: Vec3,
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation_bias: Vec3::ZERO,
        }
    }
}

/// Trait for index-addressable placement layouts.
pub trait PlacementGenerator: Send + Sync {
    /// Total number of elements `N`; valid indices are `0..N`.
    fn element_count(&self) -> usize;

    /// Base placement of element `index`.
    fn place(&self, index: usize) -> Placement;

    /// All placements in index order.
    fn generate_all(&self) -> Vec<Placement> {
        (0..self.element_count()).map(|i| self.place(i)).collect()
    }

    /// Base positions in index order, as `mint` vectors for use outside `glam`.
    fn positions(&self) -> Vec<mint::Vector3<f32>> {
        (0..self.element_count())
            .map(|i| self.place(i).position.into())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl PlacementGenerator for Fixed {
        fn element_count(&self) -> usize {
            3
        }

        fn place(&self, index: usize) -> Placement {
            Placement::at(Vec3::splat(index as f32))
        }
    }

    #[test]
    fn generate_all_visits_every_index_in_order() {
        let all = Fixed.generate_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].position, Vec3::splat(2.0));
        assert_eq!(all[0].rotation_bias, Vec3::ZERO);
    }

    #[test]
    fn positions_match_placements() {
        let positions = Fixed.positions();
        assert_eq!(positions.len(), 3);
        assert_eq!(Vec3::from(positions[1]), Vec3::ONE);
    }
}
