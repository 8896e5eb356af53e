//! Slope-deflection equation assembly
//!
//! Every member end yields a half-equation expressing its end moment as a
//! linear combination of named terms. The half-equations meeting at a joint
//! are collected into that joint's moment-equilibrium equation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::fem::member_fixed_end_moments;
use crate::elements::{Member, MemberEnd, MemberKind};
use crate::error::{SDError, SDResult};
use crate::loads::PointLoad;
use crate::math::{compensated_sum, CompensatedSum};
use crate::model::SDModel;
use crate::results::moment_key;

/// Name of a term in a slope-deflection equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TermKey {
    /// Known constant (fixed-end or overhang moment)
    Constant,
    /// Known chord rotation caused by support settlement
    Settlement,
    /// Unknown rotation of the joint with this id
    ///
    /// Supports are numbered by their predecessor count in the support
    /// chain; unsupported joints continue the numbering left to right.
    Rotation(usize),
}

impl TermKey {
    /// Whether the term is an unknown to be solved for
    pub fn is_unknown(self) -> bool {
        matches!(self, TermKey::Rotation(_))
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKey::Constant => write!(f, "c"),
            TermKey::Settlement => write!(f, "delta"),
            TermKey::Rotation(id) => write!(f, "theta{id}"),
        }
    }
}

/// A coefficient attached to a named term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub key: TermKey,
    pub coefficient: f64,
}

impl Term {
    pub fn new(key: TermKey, coefficient: f64) -> Self {
        Self { key, coefficient }
    }
}

/// End moment of one member at its near joint, as a sum of terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalfEquation {
    /// Moment key, `MOMENT<near><far>`
    pub key: String,
    /// Index of the member
    pub member: usize,
    /// Which end of the member this moment acts at
    pub end: MemberEnd,
    /// Node index of the near joint
    pub near: usize,
    /// Node index of the far joint
    pub far: usize,
    /// Non-zero terms
    pub terms: Vec<Term>,
}

impl HalfEquation {
    fn push(&mut self, key: TermKey, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push(Term::new(key, coefficient));
        }
    }
}

/// Half-equations of every member end meeting at a joint
///
/// `left` holds the members that end at the joint, `right` those that start
/// there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointEquations {
    /// Node index of the joint
    pub joint: usize,
    pub left: Vec<HalfEquation>,
    pub right: Vec<HalfEquation>,
}

impl JointEquations {
    /// All half-equations at the joint, right side first
    pub fn half_equations(&self) -> impl Iterator<Item = &HalfEquation> {
        self.right.iter().chain(self.left.iter())
    }

    /// Collapse the joint's half-equations into a single equilibrium equation
    pub fn collect(&self) -> CollectedEquation {
        CollectedEquation {
            joint: self.joint,
            terms: collect_like_terms(self.half_equations().flat_map(|h| h.terms.iter())),
        }
    }
}

/// Joint equilibrium `Σ terms = 0` with like terms combined
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedEquation {
    /// Node index of the joint
    pub joint: usize,
    /// Combined coefficient per term; always contains [`TermKey::Constant`]
    pub terms: BTreeMap<TermKey, f64>,
}

impl CollectedEquation {
    /// Coefficient of a term, zero when absent
    pub fn coefficient(&self, key: TermKey) -> f64 {
        self.terms.get(&key).copied().unwrap_or(0.0)
    }

    /// Sum of the known terms, to be moved to the right-hand side
    pub fn known(&self) -> f64 {
        self.coefficient(TermKey::Constant) + self.coefficient(TermKey::Settlement)
    }

    /// Unknown rotations appearing in the equation
    pub fn unknowns(&self) -> impl Iterator<Item = TermKey> + '_ {
        self.terms.keys().copied().filter(|k| k.is_unknown())
    }
}

impl fmt::Display for CollectedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, coefficient) in &self.terms {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{coefficient}·{key}")?;
            first = false;
        }
        write!(f, " = 0")
    }
}

/// Combine terms sharing a key using compensated summation
///
/// Keys whose combined coefficient is exactly zero are dropped, except the
/// constant, which is always present.
pub fn collect_like_terms<'a, I>(terms: I) -> BTreeMap<TermKey, f64>
where
    I: IntoIterator<Item = &'a Term>,
{
    let mut sums: BTreeMap<TermKey, CompensatedSum> = BTreeMap::new();
    for term in terms {
        sums.entry(term.key).or_default().add(term.coefficient);
    }

    let mut collected: BTreeMap<TermKey, f64> = sums
        .into_iter()
        .map(|(key, sum)| (key, sum.value()))
        .filter(|(key, value)| *key == TermKey::Constant || *value != 0.0)
        .collect();
    collected.entry(TermKey::Constant).or_insert(0.0);
    collected
}

/// Builds slope-deflection equations for the joints of a model
pub struct EquationBuilder<'a> {
    model: &'a SDModel,
    /// Signed fixed-end moments `(start, end)` per member
    fems: Vec<(f64, f64)>,
    /// Free-tip end of each overhanging member
    overhangs: Vec<Option<MemberEnd>>,
    /// Joint id per node index
    joint_ids: Vec<usize>,
    /// Node index per joint id
    joint_nodes: Vec<usize>,
}

impl<'a> EquationBuilder<'a> {
    /// Compute member fixed-end moments and classify overhangs
    pub fn new(model: &'a SDModel) -> SDResult<Self> {
        let mut fems = Vec::with_capacity(model.members.len());
        let mut overhangs = Vec::with_capacity(model.members.len());

        for member in &model.members {
            fems.push(member_fixed_end_moments(member)?);

            let start_tip = model.nodes[member.start()].is_free_tip();
            let end_tip = model.nodes[member.end()].is_free_tip();
            let overhang = match (start_tip, end_tip) {
                (true, true) => {
                    return Err(SDError::DisconnectedMember(member.name().to_string()))
                }
                (true, false) => Some(MemberEnd::Start),
                (false, true) => Some(MemberEnd::End),
                (false, false) => None,
            };
            overhangs.push(overhang);
        }

        let joint_nodes = joint_order(model);
        let mut joint_ids = vec![0; model.nodes.len()];
        for (id, &node) in joint_nodes.iter().enumerate() {
            joint_ids[node] = id;
        }

        Ok(Self {
            model,
            fems,
            overhangs,
            joint_ids,
            joint_nodes,
        })
    }

    /// Rotation unknown of a joint
    pub fn rotation_key(&self, joint: usize) -> TermKey {
        TermKey::Rotation(self.joint_ids[joint])
    }

    /// Node index behind a joint id
    pub fn joint_node(&self, id: usize) -> Option<usize> {
        self.joint_nodes.get(id).copied()
    }

    /// Signed fixed-end moments `(start, end)` of a member
    pub fn fixed_end_moments(&self, member: usize) -> (f64, f64) {
        self.fems[member]
    }

    /// Free-tip end of a member, if it is an overhang
    pub fn overhang_tip(&self, member: usize) -> Option<MemberEnd> {
        self.overhangs[member]
    }

    /// Whether a joint takes part in the simultaneous system
    ///
    /// Fixed joints have no rotation and free tips are statically determinate.
    pub fn needs_equation(&self, joint: usize) -> bool {
        let node = &self.model.nodes[joint];
        !node.is_fixed() && !node.is_free_tip()
    }

    /// Half-equation for the moment at one end of a member
    pub fn half_equation(&self, member: usize, end: MemberEnd) -> HalfEquation {
        let nodes = &self.model.nodes;
        let m = &self.model.members[member];
        let near = m.node_at(end);
        let far = m.node_at(end.opposite());
        let mut half = HalfEquation {
            key: moment_key(nodes[near].name(), nodes[far].name()),
            member,
            end,
            near,
            far,
            terms: Vec::new(),
        };

        match self.overhangs[member] {
            Some(tip) if tip == end => {}
            Some(_) => half.push(TermKey::Constant, overhang_moment(m, end)),
            None => {
                let (fem_start, fem_end) = self.fems[member];
                let fem = match end {
                    MemberEnd::Start => fem_start,
                    MemberEnd::End => fem_end,
                };
                half.push(TermKey::Constant, fem);

                let k = m.ei() / m.length();
                if !nodes[near].is_fixed() {
                    half.push(self.rotation_key(near), 4.0 * k);
                }
                if !nodes[far].is_fixed() {
                    half.push(self.rotation_key(far), 2.0 * k);
                }

                let cosine = match m.kind {
                    MemberKind::Column => 0.0,
                    _ => m.angle().cos(),
                };
                let relative = nodes[m.end()].settlement() - nodes[m.start()].settlement();
                half.push(
                    TermKey::Settlement,
                    6.0 * m.ei() / (m.length() * m.length()) * cosine * relative,
                );
            }
        }
        half
    }

    /// Half-equations of every member end meeting at a joint
    pub fn joint_equations(&self, joint: usize) -> SDResult<JointEquations> {
        let node = &self.model.nodes[joint];
        if node.connections().is_empty() {
            return Err(SDError::DisconnectedJoint(node.name().to_string()));
        }

        let mut equations = JointEquations {
            joint,
            left: Vec::new(),
            right: Vec::new(),
        };
        for connection in node.connections() {
            let half = self.half_equation(connection.member, connection.end);
            match connection.end {
                MemberEnd::End => equations.left.push(half),
                MemberEnd::Start => equations.right.push(half),
            }
        }
        Ok(equations)
    }

    /// Collected equilibrium equation of a joint
    pub fn collected_equation(&self, joint: usize) -> SDResult<CollectedEquation> {
        Ok(self.joint_equations(joint)?.collect())
    }

    /// Half-equations for every joint in the model
    pub fn all_joint_equations(&self) -> SDResult<Vec<JointEquations>> {
        (0..self.model.nodes.len())
            .map(|joint| self.joint_equations(joint))
            .collect()
    }

    /// Equilibrium equations of the joints whose rotation is unknown
    pub fn system(&self, joints: &[JointEquations]) -> Vec<CollectedEquation> {
        joints
            .iter()
            .filter(|j| self.needs_equation(j.joint))
            .map(JointEquations::collect)
            .collect()
    }
}

/// Supports in chain order, then the unsupported joints left to right
fn joint_order(model: &SDModel) -> Vec<usize> {
    let mut order: Vec<usize> = model.support_chain().nodes().collect();
    let mut free: Vec<usize> = (0..model.nodes.len())
        .filter(|&i| !model.nodes[i].is_supported())
        .collect();
    free.sort_by(|&a, &b| {
        let (a, b) = (&model.nodes[a], &model.nodes[b]);
        a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
    });
    order.extend(free);
    order
}

/// Moment the joint at `end` must exert to hold an overhang's loads
fn overhang_moment(member: &Member, end: MemberEnd) -> f64 {
    let loads = member.equivalent_point_loads();
    match end {
        MemberEnd::Start => compensated_sum(loads.iter().map(PointLoad::moment_about_start)),
        MemberEnd::End => -compensated_sum(
            loads
                .iter()
                .map(|p| p.magnitude * (member.length() - p.position)),
        ),
    }
}
