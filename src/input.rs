//! JSON model description
//!
//! A flat, serializable description of a model. Building it replays the
//! validated `add_*` calls, so a malformed file fails the same way as a
//! malformed program.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::elements::{Member, MemberKind, Node, Support, SupportKind};
use crate::error::SDResult;
use crate::loads::Load;
use crate::model::SDModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportInput {
    pub node: String,
    pub kind: SupportKind,
    #[serde(default)]
    pub settlement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInput {
    pub name: String,
    pub i_node: String,
    pub j_node: String,
    pub kind: MemberKind,
    #[serde(default = "unit")]
    pub e: f64,
    #[serde(default = "unit")]
    pub i: f64,
}

fn unit() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadInput {
    pub member: String,
    #[serde(flatten)]
    pub load: Load,
}

/// Serializable description of a whole model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub nodes: Vec<NodeInput>,
    #[serde(default)]
    pub supports: Vec<SupportInput>,
    pub members: Vec<MemberInput>,
    #[serde(default)]
    pub loads: Vec<LoadInput>,
}

impl ModelInput {
    /// Parse a model description from JSON text
    pub fn from_json(json: &str) -> SDResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a model description from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> SDResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build the model, validating every node, support, member and load
    pub fn build(&self) -> SDResult<SDModel> {
        let mut model = SDModel::new();
        for node in &self.nodes {
            model.add_node(&node.name, Node::new(node.x, node.y))?;
        }
        for support in &self.supports {
            model.add_support(
                &support.node,
                Support::new(support.kind).with_settlement(support.settlement),
            )?;
        }
        for member in &self.members {
            model.add_member(
                &member.name,
                Member::new(&member.i_node, &member.j_node, member.kind)
                    .with_stiffness(member.e, member.i),
            )?;
        }
        for load in &self.loads {
            model.add_member_load(&load.member, load.load)?;
        }
        Ok(model)
    }

    /// Describe an existing model
    pub fn from_model(model: &SDModel) -> Self {
        let nodes = model
            .nodes()
            .iter()
            .map(|n| NodeInput {
                name: n.name().to_string(),
                x: n.x,
                y: n.y,
            })
            .collect();
        let supports = model
            .nodes()
            .iter()
            .filter_map(|n| {
                n.support.map(|s| SupportInput {
                    node: n.name().to_string(),
                    kind: s.kind,
                    settlement: s.settlement,
                })
            })
            .collect();
        let members = model
            .members()
            .iter()
            .map(|m| MemberInput {
                name: m.name().to_string(),
                i_node: m.i_node.clone(),
                j_node: m.j_node.clone(),
                kind: m.kind,
                e: m.e,
                i: m.i,
            })
            .collect();
        let loads = model
            .members()
            .iter()
            .flat_map(|m| {
                m.loads().iter().map(|load| LoadInput {
                    member: m.name().to_string(),
                    load: *load,
                })
            })
            .collect();

        Self {
            nodes,
            supports,
            members,
            loads,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SDResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
