//! Analysis pipeline and options
//!
//! Stages run strictly in order: fixed-end moments, joint equations,
//! simultaneous solution, moment back-substitution, reactions.

pub mod equations;
pub mod fem;
pub mod moments;
pub mod reactions;
pub mod solver;

use serde::{Deserialize, Serialize};

pub use equations::{
    collect_like_terms, CollectedEquation, EquationBuilder, HalfEquation, JointEquations, Term,
    TermKey,
};
pub use fem::{
    all_fixed_end_moments, fixed_end_moment, load_fixed_end_moments, member_fixed_end_moments,
    SupportFixedEndMoments,
};
pub use moments::{final_moments, ResolvedMoments};
pub use reactions::{member_end_shears, sidesway_check, SideswayCheck};
pub use solver::{solve, Solution};

/// How reactions are recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Beam when every member is a beam, otherwise frame
    Auto,
    /// Continuous beam: supports in a single left-to-right chain
    Beam,
    /// General frame with joint force transfer
    Frame,
}

impl Default for AnalysisMode {
    fn default() -> Self {
        Self::Auto
    }
}

/// Options for slope-deflection analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Reaction recovery mode
    pub mode: AnalysisMode,
    /// Smallest pivot accepted, relative to the largest
    pub pivot_tolerance: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Enable logging/progress output
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Auto,
            pivot_tolerance: 1e-12,
            check_statics: false,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Options for a continuous beam
    pub fn beam() -> Self {
        Self {
            mode: AnalysisMode::Beam,
            ..Self::default()
        }
    }

    /// Options for a frame
    pub fn frame() -> Self {
        Self {
            mode: AnalysisMode::Frame,
            ..Self::default()
        }
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the relative pivot tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Check equilibrium of the reactions against the applied loads
    pub fn with_statics_check(mut self) -> Self {
        self.check_statics = true;
        self
    }
}
