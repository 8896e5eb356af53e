//! Error types for the slope-deflection solver

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements::MemberKind;

/// Broad classification of an [`SDError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The model was built with invalid data
    Validation,
    /// The model's connectivity cannot be analysed
    Topology,
    /// The simultaneous system could not be solved
    Numerical,
    /// Reading or parsing an input failed
    Io,
}

/// Main error type for slope-deflection operations
#[derive(Error, Debug)]
pub enum SDError {
    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Nodes '{0}' and '{1}' are already connected by a member")]
    DuplicateMember(String, String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("{kind:?} member '{member}' has a disallowed angle of {angle_deg:.2} degrees")]
    InvalidOrientation {
        member: String,
        kind: MemberKind,
        angle_deg: f64,
    },

    #[error("Load at {position} lies outside member '{member}' of length {length}")]
    LoadOutsideMember {
        member: String,
        position: f64,
        length: f64,
    },

    #[error("Varying load has coincident low and high positions at {0}")]
    DegenerateVaryingLoad(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Joint '{0}' has no connected members")]
    DisconnectedJoint(String),

    #[error("Member '{0}' is not connected to any supported joint")]
    DisconnectedMember(String),

    #[error("Unsupported topology: {0}")]
    UnsupportedTopology(String),

    #[error("System has {equations} equations for {unknowns} unknowns")]
    IndeterminateSystem { equations: usize, unknowns: usize },

    #[error("Singular equation system - model may be unstable or have redundant joints")]
    SingularMatrix,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SDError {
    /// Classify the error by the stage that raised it
    pub fn category(&self) -> ErrorCategory {
        match self {
            SDError::NodeNotFound(_)
            | SDError::MemberNotFound(_)
            | SDError::DuplicateName(_)
            | SDError::DuplicateMember(..)
            | SDError::InvalidGeometry(_)
            | SDError::InvalidOrientation { .. }
            | SDError::LoadOutsideMember { .. }
            | SDError::DegenerateVaryingLoad(_)
            | SDError::InvalidInput(_) => ErrorCategory::Validation,
            SDError::DisconnectedJoint(_)
            | SDError::DisconnectedMember(_)
            | SDError::UnsupportedTopology(_) => ErrorCategory::Topology,
            SDError::IndeterminateSystem { .. } | SDError::SingularMatrix => {
                ErrorCategory::Numerical
            }
            SDError::IoError(_) | SDError::SerializationError(_) => ErrorCategory::Io,
        }
    }
}

/// Result type for slope-deflection operations
pub type SDResult<T> = Result<T, SDError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            SDError::DegenerateVaryingLoad(2.0).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            SDError::DisconnectedJoint("A".to_string()).category(),
            ErrorCategory::Topology
        );
        assert_eq!(SDError::SingularMatrix.category(), ErrorCategory::Numerical);
    }

    #[test]
    fn test_error_message() {
        let err = SDError::LoadOutsideMember {
            member: "AB".to_string(),
            position: 20.0,
            length: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Load at 20 lies outside member 'AB' of length 5"
        );
    }
}
