//! Slope Deflection - classical slope-deflection analysis of planar structures
//!
//! This library analyses statically indeterminate beams and frames by the
//! hand-calculation slope-deflection procedure:
//! - Fixed-end moments for point, uniform and linearly varying loads
//! - Joint equations with support settlement and overhangs
//! - Simultaneous solution for joint rotations
//! - Member-end moments, shears and support reactions
//!
//! ## Example
//! ```rust
//! use slope_deflection::prelude::*;
//!
//! let mut model = SDModel::new();
//!
//! // Add nodes with supports
//! model.add_node("A", Node::supported(0.0, 0.0, Support::fixed())).unwrap();
//! model.add_node("B", Node::supported(10.0, 0.0, Support::roller())).unwrap();
//!
//! // Add member and load
//! model.add_member("AB", Member::beam("A", "B")).unwrap();
//! model.add_member_load("AB", Load::uniform(2.0, 0.0, 10.0)).unwrap();
//!
//! // Analyze
//! let results = model.analyze(&AnalysisOptions::default()).unwrap();
//!
//! // Get results
//! let fixed_end = results.moment("A", "B").unwrap();
//! assert!((fixed_end - 25.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod input;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisMode, AnalysisOptions};
    pub use crate::elements::{Member, MemberKind, Node, Support, SupportKind};
    pub use crate::error::{SDError, SDResult};
    pub use crate::input::ModelInput;
    pub use crate::loads::{Load, PointLoad, UniformLoad, VaryingLoad};
    pub use crate::model::SDModel;
    pub use crate::results::{AnalysisResults, MemberResult, Reactions};
}
