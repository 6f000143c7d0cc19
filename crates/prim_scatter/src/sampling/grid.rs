//! Centered grid scatter with per-axis jitter and random variant ids.
use std::iter::FusedIterator;

use glam::{DMat4, DVec3};
use rand::rngs::StdRng;
use rand::RngCore;
use tracing::{debug, info};

use crate::error::Result;
use crate::sampling::{pick_index, rand01, rng_for_seed, AxisSpec, GenerationRequest};

/// A translation-only affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: DMat4::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            matrix: DMat4::from_translation(translation),
        }
    }

    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    pub fn translation(&self) -> DVec3 {
        self.matrix.w_axis.truncate()
    }
}

impl From<Transform> for mint::ColumnMatrix4<f64> {
    fn from(value: Transform) -> Self {
        value.matrix.into()
    }
}

/// One generated placement: where to put a duplicate and which source it copies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterItem {
    pub transform: Transform,
    /// Index into the list of source prims, in `[0, id_count)`.
    pub variant_id: usize,
}

impl ScatterItem {
    pub fn new(transform: Transform, variant_id: usize) -> Self {
        Self {
            transform,
            variant_id,
        }
    }
}

/// Collected output of a [`Scatter`], in generation order.
pub type ScatterResult = Vec<ScatterItem>;

/// Creates a lazy scatter for `request`, seeding a fresh generator from `request.seed`.
///
/// Items come out in nested-loop order with X outermost and Z innermost. The random stream is
/// consumed in that same order: per point, one draw for each jittered axis (X, Y, Z), then one
/// draw for the variant id.
pub fn scatter(request: &GenerationRequest) -> Result<Scatter> {
    Scatter::from_rng(request, rng_for_seed(request.seed))
}

/// Lazy, finite and non-restartable sequence of [`ScatterItem`]s.
pub struct Scatter<R: RngCore = StdRng> {
    axes: [AxisSpec; 3],
    lens: [usize; 3],
    id_count: usize,
    rng: R,
    next_index: usize,
    total: usize,
}

impl<R: RngCore> Scatter<R> {
    /// Creates a scatter that draws from the supplied generator instead of seeding one.
    pub fn from_rng(request: &GenerationRequest, rng: R) -> Result<Self> {
        request.validate()?;

        let lens = [
            request.axes[0].len(),
            request.axes[1].len(),
            request.axes[2].len(),
        ];
        let total = request.len();
        info!(
            "Scatter: {}x{}x{} points, {} variants, seed {:?}.",
            lens[0], lens[1], lens[2], request.id_count, request.seed
        );

        Ok(Self {
            axes: request.axes,
            lens,
            id_count: request.id_count,
            rng,
            next_index: 0,
            total,
        })
    }

    /// Total number of items this scatter yields from the start.
    pub fn total(&self) -> usize {
        self.total
    }

    fn grid_indices(&self, index: usize) -> [usize; 3] {
        let plane = self.lens[1] * self.lens[2];
        [
            index / plane,
            (index / self.lens[2]) % self.lens[1],
            index % self.lens[2],
        ]
    }
}

impl<R: RngCore> Iterator for Scatter<R> {
    type Item = ScatterItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total {
            return None;
        }

        let cell = self.grid_indices(self.next_index);
        let mut position = [0.0f64; 3];
        for (a, spec) in self.axes.iter().enumerate() {
            let mut p = spec.position(cell[a]);
            if spec.has_jitter() {
                let r = rand01(&mut self.rng) * 2.0 - 1.0;
                p += r * spec.randomization;
            }
            position[a] = p;
        }
        let variant_id = pick_index(&mut self.rng, self.id_count);

        debug!(
            "Scatter item {} at {:?} -> variant {}.",
            self.next_index, position, variant_id
        );
        self.next_index += 1;

        Some(ScatterItem {
            transform: Transform::from_translation(DVec3::from_array(position)),
            variant_id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next_index;
        (remaining, Some(remaining))
    }
}

impl<R: RngCore> ExactSizeIterator for Scatter<R> {}

impl<R: RngCore> FusedIterator for Scatter<R> {}
