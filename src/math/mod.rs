//! Numerical utilities for the slope-deflection solver

use nalgebra::{DMatrix, DVector};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// Running sum with Neumaier error compensation
///
/// Keeps the low-order bits lost by each addition in a separate
/// compensation term, so long runs of terms of mixed sign do not drift.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    /// Create an empty sum
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to the sum
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// Current value of the sum
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::new();
        sum.extend(iter);
        sum
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// Sum an iterator of values with error compensation
pub fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().collect::<CompensatedSum>().value()
}

/// Solve a linear system using LU decomposition with partial pivoting
///
/// Returns `None` when a pivot is smaller than `tolerance` relative to the
/// largest pivot, or when the solution is not finite.
pub fn solve_linear_system(a: &Mat, b: &Vec, tolerance: f64) -> Option<Vec> {
    let lu = a.clone().lu();
    let u = lu.u();
    let pivots = u.diagonal();
    let largest = pivots.iter().fold(0.0_f64, |acc, p| acc.max(p.abs()));
    if largest == 0.0 || pivots.iter().any(|p| p.abs() <= tolerance * largest) {
        return None;
    }

    let x = lu.solve(b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}
