//! Point loads on members

use serde::{Deserialize, Serialize};

/// A concentrated load on a member
///
/// Positive magnitudes act to the right of the member's direction of travel,
/// i.e. downward on a beam running left to right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load magnitude
    pub magnitude: f64,
    /// Distance from the start node
    pub position: f64,
}

impl PointLoad {
    /// Create a new point load
    pub fn new(magnitude: f64, position: f64) -> Self {
        Self {
            magnitude,
            position,
        }
    }

    /// Moment of the load about the member's start node
    pub fn moment_about_start(&self) -> f64 {
        self.magnitude * self.position
    }
}
