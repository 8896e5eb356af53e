//! Node element - a joint in the plane

use serde::{Deserialize, Serialize};

use super::Support;

/// Which end of a member a node sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberEnd {
    /// The member's start (i) node
    Start,
    /// The member's end (j) node
    End,
}

impl MemberEnd {
    /// The opposite end of the same member
    pub fn opposite(self) -> Self {
        match self {
            MemberEnd::Start => MemberEnd::End,
            MemberEnd::End => MemberEnd::Start,
        }
    }
}

/// A member attached to a node, stored as an index into the model's members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConnection {
    /// Index of the member in the model
    pub member: usize,
    /// Which end of the member touches this node
    pub end: MemberEnd,
}

/// A 2D joint in the structural model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Support at this node, if any
    pub support: Option<Support>,

    /// Name assigned when the node is added to a model
    #[serde(skip)]
    pub(crate) name: String,

    /// Members framing into this node
    #[serde(skip)]
    pub(crate) connections: Vec<NodeConnection>,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            support: None,
            name: String::new(),
            connections: Vec::new(),
        }
    }

    /// Create a node that carries a support
    pub fn supported(x: f64, y: f64, support: Support) -> Self {
        Self {
            support: Some(support),
            ..Self::new(x, y)
        }
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Name of the node within its model
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members connected to this node
    pub fn connections(&self) -> &[NodeConnection] {
        &self.connections
    }

    /// Whether the node carries a support
    pub fn is_supported(&self) -> bool {
        self.support.is_some()
    }

    /// Whether the node's rotation is restrained by a fixed support
    pub fn is_fixed(&self) -> bool {
        self.support.map_or(false, |s| s.is_fixed())
    }

    /// Vertical settlement of the node's support (zero when unsupported)
    pub fn settlement(&self) -> f64 {
        self.support.map_or(0.0, |s| s.settlement)
    }

    /// An unsupported node with a single member is the free tip of an overhang
    pub fn is_free_tip(&self) -> bool {
        self.support.is_none() && self.connections.len() == 1
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
