//! Back-substitution of solved rotations into the member-end moments

use std::collections::BTreeMap;

use super::equations::{JointEquations, Term};
use super::solver::Solution;
use crate::elements::MemberEnd;
use crate::math::compensated_sum;

/// Final moments, keyed by moment name and indexed by member
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMoments {
    /// `MOMENT<near><far>` to moment
    pub by_key: BTreeMap<String, f64>,
    /// `[start, end]` moment of each member
    pub by_member: Vec<[f64; 2]>,
}

impl ResolvedMoments {
    /// Moment at one end of a member
    pub fn at(&self, member: usize, end: MemberEnd) -> f64 {
        match end {
            MemberEnd::Start => self.by_member[member][0],
            MemberEnd::End => self.by_member[member][1],
        }
    }
}

/// Evaluate a list of terms against the solution
pub fn evaluate(terms: &[Term], solution: &Solution) -> f64 {
    compensated_sum(
        terms
            .iter()
            .map(|t| t.coefficient * solution.value_or_unit(t.key)),
    )
}

/// Resolve the moment at every member end
///
/// A moment key seen at more than one joint is summed, never overwritten.
pub fn final_moments(
    joints: &[JointEquations],
    solution: &Solution,
    member_count: usize,
) -> ResolvedMoments {
    let mut resolved = ResolvedMoments {
        by_key: BTreeMap::new(),
        by_member: vec![[0.0; 2]; member_count],
    };

    for joint in joints {
        for half in joint.half_equations() {
            let moment = evaluate(&half.terms, solution);
            *resolved.by_key.entry(half.key.clone()).or_insert(0.0) += moment;
            let slot = match half.end {
                MemberEnd::Start => 0,
                MemberEnd::End => 1,
            };
            resolved.by_member[half.member][slot] += moment;
        }
    }
    resolved
}
