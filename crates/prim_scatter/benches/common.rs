#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use prim_scatter::prelude::{GenerationRequest, PrimPath};

/// Points per side of the square grids; the Z axis stays at [`GRID_LAYERS`].
pub const GRID_EDGES: [i64; 4] = [4, 16, 32, 64];
pub const GRID_LAYERS: i64 = 4;
pub const JITTER_LEVELS: [f64; 2] = [0.0, 0.5];

/// Points per side of the single-layer grids fed to duplication.
pub const BATCH_EDGES: [i64; 3] = [8, 32, 64];
pub const SOURCE_PRIMS: [&str; 3] = ["/World/rock", "/World/tree", "/World/bush"];
pub const TARGET_PATH: &str = "/World/Scatter";

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

pub fn items_throughput(items: usize) -> Throughput {
    Throughput::Elements(items.max(1) as u64)
}

/// Seeded grid with `id_count` variants, `edge` x `edge` x `layers` points.
pub fn grid_request(edge: i64, layers: i64, id_count: usize, jitter: f64) -> GenerationRequest {
    GenerationRequest::new(id_count)
        .with_counts([edge, edge, layers])
        .with_distances([2.0, 2.0, 1.0])
        .with_randomizations([jitter, jitter, 0.0])
        .with_seed(0x5CA7 ^ edge as u64)
}

pub fn source_prims() -> Vec<PrimPath> {
    SOURCE_PRIMS.iter().filter_map(|p| p.parse().ok()).collect()
}

pub fn target_path() -> PrimPath {
    TARGET_PATH.parse().unwrap_or_else(|_| PrimPath::root())
}
