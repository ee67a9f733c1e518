//! Straight-line layout.
use glam::Vec3;

use crate::placement::{Placement, PlacementGenerator};

/// `count` elements where element `i` sits at `i * offset`.
#[derive(Debug, Clone)]
pub struct LinearPlacement {
    pub count: usize,
    pub offset: Vec3,
}

impl LinearPlacement {
    pub fn new(count: usize, offset: Vec3) -> Self {
        Self { count, offset }
    }
}

impl PlacementGenerator for LinearPlacement {
    fn element_count(&self) -> usize {
        self.count
    }

    fn place(&self, index: usize) -> Placement {
        Placement::at(self.offset * index as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_multiples_of_offset() {
        let line = LinearPlacement::new(4, Vec3::new(1.5, 0.0, -1.0));
        let all = line.generate_all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].position, Vec3::ZERO);
        assert_eq!(all[3].position, Vec3::new(4.5, 0.0, -3.0));
    }
}
