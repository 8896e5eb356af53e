//! Simultaneous solution of the joint equilibrium equations

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::equations::{CollectedEquation, TermKey};
use crate::error::{SDError, SDResult};
use crate::math::{solve_linear_system, Mat, Vec as DVec};

/// Solved values of the unknown rotations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    values: BTreeMap<TermKey, f64>,
}

impl Solution {
    /// Solved value of an unknown
    pub fn get(&self, key: TermKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Value a term is multiplied by when evaluating a moment
    ///
    /// Known terms (constant and settlement) are absent from the solution and
    /// evaluate as 1, so their coefficient is taken as is.
    pub fn value_or_unit(&self, key: TermKey) -> f64 {
        self.get(key).unwrap_or(1.0)
    }

    /// Solved rotation per joint id
    pub fn rotations(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().filter_map(|(key, value)| match key {
            TermKey::Rotation(id) => Some((*id, *value)),
            _ => None,
        })
    }

    /// Number of solved unknowns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Solve `Σ coefficient·unknown = −(constant + settlement)` for every joint
///
/// The system must be square: one equation per unknown rotation.
pub fn solve(equations: &[CollectedEquation], tolerance: f64) -> SDResult<Solution> {
    let unknowns: BTreeSet<TermKey> = equations.iter().flat_map(|e| e.unknowns()).collect();
    if unknowns.len() != equations.len() {
        return Err(SDError::IndeterminateSystem {
            equations: equations.len(),
            unknowns: unknowns.len(),
        });
    }
    if unknowns.is_empty() {
        return Ok(Solution::default());
    }

    let index: BTreeMap<TermKey, usize> = unknowns
        .iter()
        .enumerate()
        .map(|(i, key)| (*key, i))
        .collect();

    let n = unknowns.len();
    let mut a = Mat::zeros(n, n);
    let mut b = DVec::zeros(n);
    for (row, equation) in equations.iter().enumerate() {
        for key in equation.unknowns() {
            a[(row, index[&key])] = equation.coefficient(key);
        }
        b[row] = -equation.known();
    }
    debug!("Solving {n}x{n} slope-deflection system");

    let x = solve_linear_system(&a, &b, tolerance).ok_or(SDError::SingularMatrix)?;
    let values = unknowns.into_iter().zip(x.iter().copied()).collect();
    Ok(Solution { values })
}
