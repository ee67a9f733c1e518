//! Three-axis grid layout.
use glam::{UVec3, Vec3};

use crate::placement::{Placement, PlacementGenerator};

/// Grid layout with `counts.x * counts.y * counts.z` elements.
///
/// Index `i` decomposes as `x = i % cx`, `y = (i / cx) % cy`, `z = i / (cx * cy)`.
#[derive(Debug, Clone)]
pub struct GridPlacement {
    /// Elements per axis; each component is at least 1.
    pub counts: UVec3,
    /// Distance between neighbours per axis.
    pub spacing: Vec3,
    /// Shift the grid so its bounding box is centred on the origin.
    pub centered: bool,
}

impl GridPlacement {
    /// Creates a grid layout. Zero counts are raised to 1.
    pub fn new(counts: UVec3, spacing: Vec3, centered: bool) -> Self {
        Self {
            counts: counts.max(UVec3::ONE),
            spacing,
            centered,
        }
    }

    /// Size of the grid's bounding box: `(count - 1) * spacing` per axis.
    pub fn extent(&self) -> Vec3 {
        (self.counts.as_vec3() - Vec3::ONE) * self.spacing
    }

    /// Offset applied to every element, zero unless the grid is centred.
    pub fn center_offset(&self) -> Vec3 {
        if self.centered {
            -self.extent() * 0.5
        } else {
            Vec3::ZERO
        }
    }

    /// Per-axis cell coordinates of element `index`.
    pub fn cell(&self, index: usize) -> UVec3 {
        let cx = self.counts.x as usize;
        let cy = self.counts.y as usize;
        UVec3::new(
            (index % cx) as u32,
            ((index / cx) % cy) as u32,
            (index / (cx * cy)) as u32,
        )
    }
}

impl PlacementGenerator for GridPlacement {
    fn element_count(&self) -> usize {
        self.counts.x as usize * self.counts.y as usize * self.counts.z as usize
    }

    fn place(&self, index: usize) -> Placement {
        let cell = self.cell(index).as_vec3();
        Placement::at(cell * self.spacing + self.center_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_decomposes_into_cells() {
        let grid = GridPlacement::new(UVec3::new(3, 2, 1), Vec3::ONE, false);
        assert_eq!(grid.element_count(), 6);
        assert_eq!(grid.cell(4), UVec3::new(1, 1, 0));
        assert_eq!(grid.place(4).position, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn centered_grid_shifts_by_half_extent() {
        let plain = GridPlacement::new(UVec3::new(3, 2, 1), Vec3::ONE, false);
        let centered = GridPlacement::new(UVec3::new(3, 2, 1), Vec3::ONE, true);
        assert_eq!(centered.extent(), Vec3::new(2.0, 1.0, 0.0));
        for i in 0..plain.element_count() {
            let delta = centered.place(i).position - plain.place(i).position;
            assert_eq!(delta, Vec3::new(-1.0, -0.5, 0.0));
        }
    }

    #[test]
    fn third_axis_advances_after_full_layer() {
        let grid = GridPlacement::new(UVec3::new(2, 2, 3), Vec3::new(1.0, 1.0, 2.0), false);
        assert_eq!(grid.element_count(), 12);
        assert_eq!(grid.place(4).position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(grid.place(11).position, Vec3::new(1.0, 1.0, 4.0));
    }

    #[test]
    fn single_count_axis_collapses_to_zero() {
        let grid = GridPlacement::new(UVec3::new(1, 4, 1), Vec3::new(5.0, 1.0, 7.0), true);
        for p in grid.generate_all() {
            assert_eq!(p.position.x, 0.0);
            assert_eq!(p.position.z, 0.0);
        }
    }

    #[test]
    fn zero_counts_are_raised_to_one() {
        let grid = GridPlacement::new(UVec3::new(0, 2, 0), Vec3::ONE, false);
        assert_eq!(grid.counts, UVec3::new(1, 2, 1));
        assert_eq!(grid.element_count(), 2);
    }
}
