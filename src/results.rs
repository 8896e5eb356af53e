//! Result types for slope-deflection analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisMode;
use crate::error::SDResult;

/// Name of the moment at the `near` end of the member running to `far`
pub fn moment_key(near: &str, far: &str) -> String {
    format!("MOMENT{near}{far}")
}

/// Reactions at a supported node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment (anticlockwise positive), non-zero only at fixed supports
    pub mz: f64,
}

impl Reactions {
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self { fx, fy, mz }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2)).sqrt()
    }
}

/// End moments and shears of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberResult {
    /// Fixed-end moment at the start node
    pub fem_start: f64,
    /// Fixed-end moment at the end node
    pub fem_end: f64,
    /// Final moment at the start node
    pub moment_start: f64,
    /// Final moment at the end node
    pub moment_end: f64,
    /// Shear at the start node, along the local y axis
    pub shear_start: f64,
    /// Shear at the end node, along the local y axis
    pub shear_end: f64,
}

/// Applied loads compared against the total reaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticsCheck {
    pub applied_fx: f64,
    pub applied_fy: f64,
    pub reaction_fx: f64,
    pub reaction_fy: f64,
    /// Whether reactions and loads sum to zero in both directions
    pub balanced: bool,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Reaction recovery mode used
    pub mode: AnalysisMode,
    /// Solved rotation of each free joint, by node name
    pub rotations: BTreeMap<String, f64>,
    /// Final member-end moments, by moment key
    pub moments: BTreeMap<String, f64>,
    /// Per-member results, by member name
    pub members: BTreeMap<String, MemberResult>,
    /// Reactions, by support node name
    pub reactions: BTreeMap<String, Reactions>,
    /// Outcome of the sidesway check (frames only)
    pub sidesway_determinate: Option<bool>,
    /// Equilibrium check, when requested
    pub statics: Option<StaticsCheck>,
}

impl AnalysisResults {
    /// Final moment at `near` on the member running to `far`
    pub fn moment(&self, near: &str, far: &str) -> Option<f64> {
        self.moments.get(&moment_key(near, far)).copied()
    }

    /// Reactions at a support
    pub fn reaction(&self, node: &str) -> Option<&Reactions> {
        self.reactions.get(node)
    }

    /// Solved rotation of a joint; fixed joints and free tips are absent
    pub fn rotation(&self, node: &str) -> Option<f64> {
        self.rotations.get(node).copied()
    }

    /// Per-member results
    pub fn member(&self, name: &str) -> Option<&MemberResult> {
        self.members.get(name)
    }

    /// Sum of all reactions `[fx, fy]`
    pub fn total_reaction(&self) -> [f64; 2] {
        self.reactions
            .values()
            .fold([0.0, 0.0], |[fx, fy], r| [fx + r.fx, fy + r.fy])
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SDResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
