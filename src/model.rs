//! SD Model - structural model container and analysis entry point

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};

use crate::analysis::reactions::{
    all_member_shears, chain_reactions, frame_reactions, load_scale, sidesway_check,
    statics_check,
};
use crate::analysis::{
    final_moments, solve, AnalysisMode, AnalysisOptions, EquationBuilder, SideswayCheck,
};
use crate::elements::{
    folded_degrees, orientation, Member, MemberEnd, MemberKind, Node, NodeConnection, Support,
};
use crate::error::{SDError, SDResult};
use crate::loads::Load;
use crate::results::{AnalysisResults, MemberResult};

/// Planar structural model: named joints and the members between them
///
/// Nodes and members live in flat arenas; connections are stored as indices.
#[derive(Debug, Clone, Default)]
pub struct SDModel {
    pub(crate) nodes: Vec<Node>,
    pub(crate) members: Vec<Member>,
    node_lookup: HashMap<String, usize>,
    member_lookup: HashMap<String, usize>,
}

impl SDModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model, returning its index
    pub fn add_node(&mut self, name: &str, mut node: Node) -> SDResult<usize> {
        if self.node_lookup.contains_key(name) {
            return Err(SDError::DuplicateName(name.to_string()));
        }
        if !node.x.is_finite() || !node.y.is_finite() {
            return Err(SDError::InvalidGeometry(format!(
                "node '{name}' has non-finite coordinates"
            )));
        }
        if let Some(support) = node.support {
            check_support(name, &support)?;
        }

        node.name = name.to_string();
        node.connections.clear();
        let index = self.nodes.len();
        self.nodes.push(node);
        self.node_lookup.insert(name.to_string(), index);
        Ok(index)
    }

    /// Add or replace the support at a node
    pub fn add_support(&mut self, node_name: &str, support: Support) -> SDResult<()> {
        let index = self.node_index(node_name)?;
        check_support(node_name, &support)?;
        self.nodes[index].support = Some(support);
        Ok(())
    }

    /// Add a member to the model, returning its index
    pub fn add_member(&mut self, name: &str, mut member: Member) -> SDResult<usize> {
        let start = self.node_index(&member.i_node)?;
        let end = self.node_index(&member.j_node)?;
        if self.member_lookup.contains_key(name) {
            return Err(SDError::DuplicateName(name.to_string()));
        }
        if start == end {
            return Err(SDError::InvalidGeometry(format!(
                "member '{name}' starts and ends at node '{}'",
                member.i_node
            )));
        }
        if self.member_between(start, end).is_some() {
            return Err(SDError::DuplicateMember(
                member.i_node.clone(),
                member.j_node.clone(),
            ));
        }
        for (label, value) in [("E", member.e), ("I", member.i)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SDError::InvalidInput(format!(
                    "member '{name}' has non-positive {label} = {value}"
                )));
            }
        }

        let (a, b) = (&self.nodes[start], &self.nodes[end]);
        let length = a.distance_to(b);
        if length < 1e-10 {
            return Err(SDError::InvalidGeometry(format!(
                "Member has zero length: i={}, j={}",
                member.i_node, member.j_node
            )));
        }
        let angle = orientation(b.x - a.x, b.y - a.y);
        if !member.kind.allows_angle(angle) {
            return Err(SDError::InvalidOrientation {
                member: name.to_string(),
                kind: member.kind,
                angle_deg: folded_degrees(angle),
            });
        }
        for load in &member.loads {
            load.validate(name, length)?;
        }

        member.name = name.to_string();
        member.start = start;
        member.end = end;
        member.length = length;
        member.angle = angle;

        let index = self.members.len();
        self.nodes[start].connections.push(NodeConnection {
            member: index,
            end: MemberEnd::Start,
        });
        self.nodes[end].connections.push(NodeConnection {
            member: index,
            end: MemberEnd::End,
        });
        self.members.push(member);
        self.member_lookup.insert(name.to_string(), index);
        Ok(index)
    }

    /// Add a load to a member
    pub fn add_member_load(&mut self, member_name: &str, load: impl Into<Load>) -> SDResult<()> {
        let index = self.member_index(member_name)?;
        let load = load.into();
        load.validate(member_name, self.members[index].length)?;
        self.members[index].loads.push(load);
        Ok(())
    }

    // ========================
    // Lookups
    // ========================

    /// Index of a node by name
    pub fn node_index(&self, name: &str) -> SDResult<usize> {
        self.node_lookup
            .get(name)
            .copied()
            .ok_or_else(|| SDError::NodeNotFound(name.to_string()))
    }

    /// Index of a member by name
    pub fn member_index(&self, name: &str) -> SDResult<usize> {
        self.member_lookup
            .get(name)
            .copied()
            .ok_or_else(|| SDError::MemberNotFound(name.to_string()))
    }

    /// Get a node by name
    pub fn node(&self, name: &str) -> SDResult<&Node> {
        Ok(&self.nodes[self.node_index(name)?])
    }

    /// Get a member by name
    pub fn member(&self, name: &str) -> SDResult<&Member> {
        Ok(&self.members[self.member_index(name)?])
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All members, in insertion order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Index of the member joining two nodes, in either direction
    pub fn member_between(&self, a: usize, b: usize) -> Option<usize> {
        self.nodes[a]
            .connections
            .iter()
            .map(|c| c.member)
            .find(|&m| {
                let member = &self.members[m];
                (member.start, member.end) == (a, b) || (member.start, member.end) == (b, a)
            })
    }

    /// Supported nodes ordered left to right
    pub fn support_chain(&self) -> SupportChain {
        let mut order: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].is_supported())
            .collect();
        order.sort_by(|&a, &b| {
            self.nodes[a]
                .x
                .total_cmp(&self.nodes[b].x)
                .then(self.nodes[a].y.total_cmp(&self.nodes[b].y))
        });
        SupportChain { order }
    }

    /// Joint, support and member counts for the sidesway check
    pub fn sidesway_check(&self) -> SideswayCheck {
        sidesway_check(self)
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Run analysis with default options
    pub fn analyze_default(&self) -> SDResult<AnalysisResults> {
        self.analyze(&AnalysisOptions::default())
    }

    /// Run the slope-deflection analysis
    ///
    /// The model is not modified; every run starts from clean accumulators.
    pub fn analyze(&self, options: &AnalysisOptions) -> SDResult<AnalysisResults> {
        if self.members.is_empty() {
            return Err(SDError::InvalidInput("model has no members".to_string()));
        }
        let mode = self.resolve_mode(options.mode)?;

        let builder = EquationBuilder::new(self)?;
        let joints = builder.all_joint_equations()?;
        let system = builder.system(&joints);
        debug!(
            "Assembled {} joint equations for {} joints",
            system.len(),
            joints.len()
        );
        for equation in &system {
            debug!("{}: {}", self.nodes[equation.joint].name(), equation);
        }

        let solution = solve(&system, options.pivot_tolerance)?;
        let moments = final_moments(&joints, &solution, self.members.len());
        let shears = all_member_shears(self, &moments);
        let tolerance = 1e-9 * load_scale(self).max(1.0);

        let (reactions, sidesway_determinate) = if mode == AnalysisMode::Beam {
            let chain = self.support_chain();
            (chain_reactions(self, &chain, &shears, &moments), None)
        } else {
            let check = self.sidesway_check();
            if !check.is_determinate() {
                warn!(
                    "Sidesway check failed (degree {}): results assume no sidesway",
                    check.degree()
                );
            }
            (
                frame_reactions(self, &shears, &moments, tolerance, !check.is_determinate())?,
                Some(check.is_determinate()),
            )
        };

        let statics = if options.check_statics {
            let check = statics_check(self, &reactions, tolerance.max(1e-6));
            if !check.balanced {
                warn!(
                    "Reactions ({}, {}) do not balance applied loads ({}, {})",
                    check.reaction_fx, check.reaction_fy, check.applied_fx, check.applied_fy
                );
            }
            Some(check)
        } else {
            None
        };

        let rotations: BTreeMap<String, f64> = solution
            .rotations()
            .filter_map(|(id, value)| {
                let node = builder.joint_node(id)?;
                Some((self.nodes[node].name().to_string(), value))
            })
            .collect();

        let members = self
            .members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                let (fem_start, fem_end) = builder.fixed_end_moments(index);
                (
                    member.name().to_string(),
                    MemberResult {
                        fem_start,
                        fem_end,
                        moment_start: moments.at(index, MemberEnd::Start),
                        moment_end: moments.at(index, MemberEnd::End),
                        shear_start: shears[index][0],
                        shear_end: shears[index][1],
                    },
                )
            })
            .collect();

        let message = format!(
            "Analysis complete: {:?} mode, {} unknown rotations, {} supports",
            mode,
            solution.len(),
            reactions.len()
        );
        if options.log {
            info!("{message}");
        } else {
            debug!("{message}");
        }

        Ok(AnalysisResults {
            mode,
            rotations,
            moments: moments.by_key,
            members,
            reactions,
            sidesway_determinate,
            statics,
        })
    }

    /// Pick beam or frame reaction recovery
    fn resolve_mode(&self, requested: AnalysisMode) -> SDResult<AnalysisMode> {
        let all_beams = self.members.iter().all(|m| m.kind == MemberKind::Beam);
        let chain_like = self
            .nodes
            .iter()
            .filter(|n| !n.is_supported())
            .all(Node::is_free_tip);

        match requested {
            AnalysisMode::Auto if all_beams && chain_like => Ok(AnalysisMode::Beam),
            AnalysisMode::Auto | AnalysisMode::Frame => Ok(AnalysisMode::Frame),
            AnalysisMode::Beam => {
                if let Some(member) = self.members.iter().find(|m| m.kind != MemberKind::Beam) {
                    return Err(SDError::UnsupportedTopology(format!(
                        "beam analysis needs beams only, member '{}' is a {:?}",
                        member.name(),
                        member.kind
                    )));
                }
                if let Some(node) = self
                    .nodes
                    .iter()
                    .find(|n| !n.is_supported() && !n.is_free_tip())
                {
                    return Err(SDError::UnsupportedTopology(format!(
                        "beam analysis needs every joint supported, '{}' is not",
                        node.name()
                    )));
                }
                Ok(AnalysisMode::Beam)
            }
        }
    }
}

fn check_support(node: &str, support: &Support) -> SDResult<()> {
    if support.settlement.is_finite() {
        Ok(())
    } else {
        Err(SDError::InvalidInput(format!(
            "support at '{node}' has non-finite settlement"
        )))
    }
}

/// Supported joints in left-to-right order
///
/// A support's id is its number of predecessors in the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportChain {
    order: Vec<usize>,
}

impl SupportChain {
    /// Number of supports
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node index of the support with the given id
    pub fn node(&self, id: usize) -> Option<usize> {
        self.order.get(id).copied()
    }

    /// Node index of the previous support
    pub fn prev(&self, id: usize) -> Option<usize> {
        id.checked_sub(1).and_then(|p| self.node(p))
    }

    /// Node index of the next support
    pub fn next(&self, id: usize) -> Option<usize> {
        self.node(id + 1)
    }

    /// Node indices left to right
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}
