//! Member element - planar beam, column or inclined member

use serde::{Deserialize, Serialize};

use crate::loads::{Load, PointLoad};

/// Tolerance (radians) used when classifying member orientation
pub const ANGLE_TOLERANCE: f64 = 0.01;

/// Variant of a member, constraining its orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// Horizontal member
    Beam,
    /// Vertical member
    Column,
    /// Member that is neither horizontal nor vertical
    Inclined,
}

impl MemberKind {
    /// Check whether a member at `angle` (radians, from `atan2`) is allowed for this kind
    pub fn allows_angle(self, angle: f64) -> bool {
        let horizontal = angle.sin().abs() < ANGLE_TOLERANCE.sin();
        let vertical = angle.cos().abs() < ANGLE_TOLERANCE.sin();
        match self {
            MemberKind::Beam => horizontal,
            MemberKind::Column => vertical,
            MemberKind::Inclined => !horizontal && !vertical,
        }
    }
}

/// A planar frame member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Name of the start node
    pub i_node: String,
    /// Name of the end node
    pub j_node: String,
    /// Member variant
    pub kind: MemberKind,
    /// Relative modulus of elasticity
    #[serde(default = "unit")]
    pub e: f64,
    /// Relative second moment of area
    #[serde(default = "unit")]
    pub i: f64,

    /// Name assigned when the member is added to a model
    #[serde(skip)]
    pub(crate) name: String,

    /// Loads applied to the member
    #[serde(skip)]
    pub(crate) loads: Vec<Load>,

    /// Index of the start node, resolved when added to a model
    #[serde(skip)]
    pub(crate) start: usize,

    /// Index of the end node, resolved when added to a model
    #[serde(skip)]
    pub(crate) end: usize,

    /// Calculated length
    #[serde(skip)]
    pub(crate) length: f64,

    /// Calculated orientation (radians)
    #[serde(skip)]
    pub(crate) angle: f64,
}

fn unit() -> f64 {
    1.0
}

impl Member {
    /// Create a new member of the given kind with unit stiffness coefficients
    pub fn new(i_node: &str, j_node: &str, kind: MemberKind) -> Self {
        Self {
            i_node: i_node.to_string(),
            j_node: j_node.to_string(),
            kind,
            e: 1.0,
            i: 1.0,
            name: String::new(),
            loads: Vec::new(),
            start: 0,
            end: 0,
            length: 0.0,
            angle: 0.0,
        }
    }

    /// Create a horizontal beam
    pub fn beam(i_node: &str, j_node: &str) -> Self {
        Self::new(i_node, j_node, MemberKind::Beam)
    }

    /// Create a vertical column
    pub fn column(i_node: &str, j_node: &str) -> Self {
        Self::new(i_node, j_node, MemberKind::Column)
    }

    /// Create an inclined member
    pub fn inclined(i_node: &str, j_node: &str) -> Self {
        Self::new(i_node, j_node, MemberKind::Inclined)
    }

    /// Set the relative stiffness coefficients
    pub fn with_stiffness(mut self, e: f64, i: f64) -> Self {
        self.e = e;
        self.i = i;
        self
    }

    /// Flexural rigidity E*I
    pub fn ei(&self) -> f64 {
        self.e * self.i
    }

    /// Name of the member within its model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the member length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Get the member orientation in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Index of the start node
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the end node
    pub fn end(&self) -> usize {
        self.end
    }

    /// Index of the node at the given end
    pub fn node_at(&self, end: super::MemberEnd) -> usize {
        match end {
            super::MemberEnd::Start => self.start,
            super::MemberEnd::End => self.end,
        }
    }

    /// Loads applied to the member
    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// Reduce every load to its statically equivalent point load
    pub fn equivalent_point_loads(&self) -> Vec<PointLoad> {
        self.loads.iter().map(Load::equivalent_point_load).collect()
    }

    /// Unit vector of the local y axis (x axis rotated a quarter turn anticlockwise)
    pub fn local_y(&self) -> [f64; 2] {
        [-self.angle.sin(), self.angle.cos()]
    }
}

/// Angle of a vector measured from global X, in radians
pub(crate) fn orientation(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx)
}

/// Angle in degrees, folded into [0, 180)
pub(crate) fn folded_degrees(angle: f64) -> f64 {
    let deg = angle.to_degrees().rem_euclid(180.0);
    if (deg - 180.0).abs() < 1e-12 {
        0.0
    } else {
        deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_member_creation() {
        let member = Member::beam("A", "B").with_stiffness(1.0, 2.0);
        assert_eq!(member.i_node, "A");
        assert_eq!(member.j_node, "B");
        assert_eq!(member.ei(), 2.0);
    }

    #[test]
    fn test_orientation_rules() {
        assert!(MemberKind::Beam.allows_angle(0.0));
        assert!(MemberKind::Beam.allows_angle(std::f64::consts::PI));
        assert!(!MemberKind::Beam.allows_angle(0.3));

        assert!(MemberKind::Column.allows_angle(FRAC_PI_2));
        assert!(MemberKind::Column.allows_angle(-FRAC_PI_2));
        assert!(!MemberKind::Column.allows_angle(0.0));

        assert!(MemberKind::Inclined.allows_angle(0.5));
        assert!(!MemberKind::Inclined.allows_angle(FRAC_PI_2 + 0.001));
        assert!(!MemberKind::Inclined.allows_angle(0.005));
    }

    #[test]
    fn test_folded_degrees() {
        assert!((folded_degrees(-FRAC_PI_2) - 90.0).abs() < 1e-9);
        assert!(folded_degrees(std::f64::consts::PI).abs() < 1e-9);
    }
}
