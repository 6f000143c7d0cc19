//! Scatter generation: centered 3D grids with optional per-axis jitter and random variant ids.
//!
//! This module defines the request types and the lazy [`Scatter`] iterator consumed by the
//! duplication pipeline in [`crate::scatter`].
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub mod axis;
pub mod grid;
pub mod request;

pub use axis::{Axis, AxisSpec};
pub use grid::{scatter, Scatter, ScatterItem, ScatterResult, Transform};
pub use request::GenerationRequest;

/// Generate a random float in the range [0, 1).
///
/// Uses the top 53 bits of a `u64` draw, so the result is strictly below 1.0.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Map one draw onto `[0, count)`.
#[inline]
pub(crate) fn pick_index(rng: &mut dyn RngCore, count: usize) -> usize {
    debug_assert!(count > 0, "count must be > 0");
    ((rand01(rng) * count as f64) as usize).min(count.saturating_sub(1))
}

/// Build the generator for one scatter call.
///
/// A missing seed draws fresh entropy from the thread-local generator, so such runs are not
/// reproducible.
pub(crate) fn rng_for_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
