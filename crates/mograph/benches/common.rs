#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::UVec3;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Grid sizes from a small array up to a quarter million elements.
pub const GRID_SIZES: [UVec3; 4] = [
    UVec3::new(8, 8, 1),
    UVec3::new(32, 32, 4),
    UVec3::new(64, 64, 16),
    UVec3::new(128, 128, 16),
];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

pub fn label(counts: UVec3) -> String {
    format!("{}x{}x{}", counts.x, counts.y, counts.z)
}
