//! Distributed loads on members

use serde::{Deserialize, Serialize};

use super::point_load::PointLoad;

/// A uniformly distributed load over part of a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformLoad {
    /// Load per unit length
    pub intensity: f64,
    /// Start position (distance from the start node)
    pub start: f64,
    /// Loaded length
    pub span: f64,
}

impl UniformLoad {
    /// Create a uniform load occupying `[start, start + span]`
    pub fn new(intensity: f64, start: f64, span: f64) -> Self {
        Self {
            intensity,
            start,
            span,
        }
    }

    /// End position (distance from the start node)
    pub fn end(&self) -> f64 {
        self.start + self.span
    }

    /// Get the total force from this load
    pub fn total_force(&self) -> f64 {
        self.intensity * self.span
    }

    /// Statically equivalent point load at the loaded length's midpoint
    pub fn resultant(&self) -> PointLoad {
        PointLoad::new(self.total_force(), self.start + self.span / 2.0)
    }
}

/// A linearly varying (triangular) distributed load
///
/// Intensity is zero at `low_position` and `peak` at `high_position`; the
/// high end may lie on either side of the low end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaryingLoad {
    /// Intensity at the high end
    pub peak: f64,
    /// Position of zero intensity (distance from the start node)
    pub low_position: f64,
    /// Position of peak intensity (distance from the start node)
    pub high_position: f64,
}

impl VaryingLoad {
    /// Create a new varying load
    pub fn new(peak: f64, low_position: f64, high_position: f64) -> Self {
        Self {
            peak,
            low_position,
            high_position,
        }
    }

    /// Loaded length
    pub fn span(&self) -> f64 {
        (self.high_position - self.low_position).abs()
    }

    /// Whether the peak lies to the right of (further along than) the low end
    pub fn rises_forward(&self) -> bool {
        self.high_position > self.low_position
    }

    /// Get the total force from this load
    pub fn total_force(&self) -> f64 {
        0.5 * self.peak * self.span()
    }

    /// Statically equivalent point load at the triangle's centroid
    pub fn resultant(&self) -> PointLoad {
        let centroid =
            self.low_position + 2.0 * (self.high_position - self.low_position) / 3.0;
        PointLoad::new(self.total_force(), centroid)
    }

    /// Intensity as `c0 + c1 * x` over the loaded length
    pub(crate) fn linear_coefficients(&self) -> (f64, f64) {
        let slope = self.peak / (self.high_position - self.low_position);
        (-slope * self.low_position, slope)
    }
}
