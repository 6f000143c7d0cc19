//! Per-axis scatter parameters.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three scatter axes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in iteration order (X outermost, Z innermost).
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Grid parameters along a single axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSpec {
    /// Number of points along the axis. Zero empties the whole scatter.
    pub count: i64,
    /// Spacing between neighbouring points.
    pub distance: f64,
    /// Maximum jitter magnitude; each point moves by up to this much in either direction.
    pub randomization: f64,
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            count: 1,
            distance: 1.0,
            randomization: 0.0,
        }
    }
}

impl AxisSpec {
    pub fn new(count: i64, distance: f64) -> Self {
        Self {
            count,
            distance,
            randomization: 0.0,
        }
    }

    /// Sets the jitter magnitude.
    pub fn with_randomization(mut self, randomization: f64) -> Self {
        self.randomization = randomization;
        self
    }

    /// Coordinate of point `n` before jitter; the points are symmetric about zero.
    #[inline]
    pub fn position(&self, n: usize) -> f64 {
        (n as f64 - 0.5 * (self.count as f64 - 1.0)) * self.distance
    }

    /// Point count as an unsigned value. Only meaningful after [`AxisSpec::validate`].
    #[inline]
    pub(crate) fn len(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }

    pub(crate) fn has_jitter(&self) -> bool {
        self.randomization > 0.0
    }

    /// Validates the axis, naming it in the error message.
    pub fn validate(&self, axis: Axis) -> Result<()> {
        if self.count < 0 {
            return Err(Error::InvalidArgument(format!(
                "count along {} must be >= 0, got {}",
                axis.label(),
                self.count
            )));
        }
        if usize::try_from(self.count).is_err() {
            return Err(Error::InvalidArgument(format!(
                "count along {} is too large: {}",
                axis.label(),
                self.count
            )));
        }
        if !self.distance.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "distance along {} must be finite",
                axis.label()
            )));
        }
        if !self.randomization.is_finite() || self.randomization < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "randomization along {} must be finite and >= 0",
                axis.label()
            )));
        }
        Ok(())
    }
}
