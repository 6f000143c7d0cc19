//! Generation requests for the grid scatter.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::{Axis, AxisSpec};

/// Parameters for one scatter generation call.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Per-axis grid parameters, indexed by [`Axis::index`].
    pub axes: [AxisSpec; 3],
    /// Number of distinct variant ids to draw from.
    pub id_count: usize,
    /// Seed for the request-scoped generator; `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            axes: [AxisSpec::default(); 3],
            id_count: 1,
            seed: None,
        }
    }
}

impl GenerationRequest {
    /// Creates a request for a single point per axis with the given variant count.
    pub fn new(id_count: usize) -> Self {
        Self {
            id_count,
            ..Default::default()
        }
    }

    /// Replaces the parameters of one axis.
    pub fn with_axis(mut self, axis: Axis, spec: AxisSpec) -> Self {
        self.axes[axis.index()] = spec;
        self
    }

    /// Sets the point counts for X, Y and Z.
    pub fn with_counts(mut self, counts: [i64; 3]) -> Self {
        for (spec, count) in self.axes.iter_mut().zip(counts) {
            spec.count = count;
        }
        self
    }

    /// Sets the spacing for X, Y and Z.
    pub fn with_distances(mut self, distances: [f64; 3]) -> Self {
        for (spec, distance) in self.axes.iter_mut().zip(distances) {
            spec.distance = distance;
        }
        self
    }

    /// Sets the jitter magnitude for X, Y and Z.
    pub fn with_randomizations(mut self, randomizations: [f64; 3]) -> Self {
        for (spec, randomization) in self.axes.iter_mut().zip(randomizations) {
            spec.randomization = randomization;
        }
        self
    }

    /// Sets the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn axis(&self, axis: Axis) -> &AxisSpec {
        &self.axes[axis.index()]
    }

    /// Number of items the request produces. Only meaningful after [`GenerationRequest::validate`].
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Product of the axis counts, or `None` when a count is negative or the product overflows.
    ///
    /// A zero count on any axis makes the product zero regardless of the other axes.
    pub fn checked_len(&self) -> Option<usize> {
        let mut lens = [0usize; 3];
        for (len, spec) in lens.iter_mut().zip(&self.axes) {
            *len = usize::try_from(spec.count).ok()?;
        }
        if lens.contains(&0) {
            return Some(0);
        }
        lens.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates the request, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.id_count < 1 {
            return Err(Error::InvalidArgument("id_count must be >= 1".into()));
        }
        for axis in Axis::ALL {
            self.axis(axis).validate(axis)?;
        }
        if self.checked_len().is_none() {
            let counts = self.axes.map(|spec| spec.count);
            return Err(Error::InvalidArgument(format!(
                "grid of {counts:?} points is too large"
            )));
        }
        Ok(())
    }
}
