//! Ring layout in the XY plane.
use std::f32::consts::TAU;

use glam::Vec3;

use crate::placement::{Placement, PlacementGenerator};

/// Fixed Z rotation (degrees) applied to every ring element before user rotation.
pub const FACE_CENTER_BIAS_DEG: f32 = 90.0;

/// `count` elements evenly spaced on a circle of `radius` at height `height`.
#[derive(Debug, Clone)]
pub struct CircularPlacement {
    pub count: usize,
    pub radius: f32,
    pub height: f32,
}

impl CircularPlacement {
    pub fn new(count: usize, radius: f32, height: f32) -> Self {
        Self {
            count,
            radius,
            height,
        }
    }

    /// Angle in radians of element `index`.
    pub fn angle(&self, index: usize) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        TAU * index as f32 / self.count as f32
    }
}

impl PlacementGenerator for CircularPlacement {
    fn element_count(&self) -> usize {
        self.count
    }

    fn place(&self, index: usize) -> Placement {
        let (sin, cos) = self.angle(index).sin_cos();
        Placement {
            position: Vec3::new(self.radius * cos, self.radius * sin, self.height),
            rotation_bias: Vec3::new(0.0, 0.0, FACE_CENTER_BIAS_DEG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn four_elements_hit_the_axes() {
        let ring = CircularPlacement::new(4, 2.0, 0.5);
        assert!(approx(ring.place(0).position, Vec3::new(2.0, 0.0, 0.5)));
        assert!(approx(ring.place(1).position, Vec3::new(0.0, 2.0, 0.5)));
        assert!(approx(ring.place(2).position, Vec3::new(-2.0, 0.0, 0.5)));
        assert!(approx(ring.place(3).position, Vec3::new(0.0, -2.0, 0.5)));
    }

    #[test]
    fn every_element_carries_face_center_bias() {
        let ring = CircularPlacement::new(8, 1.0, 0.0);
        for p in ring.generate_all() {
            assert_eq!(p.rotation_bias, Vec3::new(0.0, 0.0, 90.0));
            assert!((p.position.truncate().length() - 1.0).abs() < 1e-5);
        }
    }
}
