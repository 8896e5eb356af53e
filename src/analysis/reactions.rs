//! Member-end shears and support reactions
//!
//! Shears come from moment equilibrium of each member under its equivalent
//! point loads and resolved end moments. Beam chains sum them straight into
//! the supports. Frames accumulate them on every joint and then push the
//! residual on unsupported joints through the members until it reaches a
//! support.

use std::collections::BTreeMap;

use log::debug;

use super::moments::ResolvedMoments;
use crate::elements::{Member, MemberEnd, MemberKind, SupportKind};
use crate::error::{SDError, SDResult};
use crate::loads::PointLoad;
use crate::math::{compensated_sum, CompensatedSum};
use crate::model::{SDModel, SupportChain};
use crate::results::{Reactions, StaticsCheck};

/// Shears `(start, end)` at the two ends of a member, along its local y axis
pub fn member_end_shears(member: &Member, moment_start: f64, moment_end: f64) -> (f64, f64) {
    let loads = member.equivalent_point_loads();
    let total = compensated_sum(loads.iter().map(|p| p.magnitude));
    let load_moment = compensated_sum(loads.iter().map(PointLoad::moment_about_start));
    let end = (load_moment - moment_start - moment_end) / member.length();
    (total - end, end)
}

/// End shears of every member
pub fn all_member_shears(model: &SDModel, moments: &ResolvedMoments) -> Vec<[f64; 2]> {
    model
        .members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let (start, end) = member_end_shears(
                member,
                moments.at(index, MemberEnd::Start),
                moments.at(index, MemberEnd::End),
            );
            [start, end]
        })
        .collect()
}

/// Reactions of a continuous beam, summing the shears either side of each
/// support in chain order
pub fn chain_reactions(
    model: &SDModel,
    chain: &SupportChain,
    shears: &[[f64; 2]],
    moments: &ResolvedMoments,
) -> BTreeMap<String, Reactions> {
    chain
        .nodes()
        .map(|node| {
            let mut fx = CompensatedSum::new();
            let mut fy = CompensatedSum::new();
            for connection in model.nodes[node].connections() {
                let [lx, ly] = model.members[connection.member].local_y();
                let shear = shear_at(shears, connection.member, connection.end);
                fx.add(shear * lx);
                fy.add(shear * ly);
            }
            (
                model.nodes[node].name().to_string(),
                Reactions::new(fx.value(), fy.value(), support_moment(model, node, moments)),
            )
        })
        .collect()
}

/// Reactions of a frame, with residual joint forces transferred to supports
///
/// `sidesway` marks a frame that failed the sidesway check; its horizontal
/// residuals may also run down a column to the supports below.
pub fn frame_reactions(
    model: &SDModel,
    shears: &[[f64; 2]],
    moments: &ResolvedMoments,
    tolerance: f64,
    sidesway: bool,
) -> SDResult<BTreeMap<String, Reactions>> {
    let mut forces = vec![[0.0_f64; 2]; model.nodes.len()];
    for (index, member) in model.members.iter().enumerate() {
        let [lx, ly] = member.local_y();
        for end in [MemberEnd::Start, MemberEnd::End] {
            let node = member.node_at(end);
            let shear = shear_at(shears, index, end);
            forces[node][0] += shear * lx;
            forces[node][1] += shear * ly;
        }
    }

    transfer_residuals(model, &mut forces, tolerance, sidesway)?;

    Ok(model
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_supported())
        .map(|(index, node)| {
            let [fx, fy] = forces[index];
            (
                node.name().to_string(),
                Reactions::new(fx, fy, support_moment(model, index, moments)),
            )
        })
        .collect())
}

/// Push the forces left on unsupported joints towards the supports
///
/// Joints are visited left to right, top to bottom. Horizontal residuals run
/// along the single beam (else the single inclined member) leading to larger
/// x; vertical residuals run down the single column below the joint. Rollers
/// keep their vertical force but pass horizontal force on like a free joint.
fn transfer_residuals(
    model: &SDModel,
    forces: &mut [[f64; 2]],
    tolerance: f64,
    sidesway: bool,
) -> SDResult<()> {
    let nodes = &model.nodes;
    let mut order: Vec<usize> = (0..nodes.len())
        .filter(|&i| nodes[i].support.map_or(true, |s| !s.restrains_horizontal()))
        .collect();
    order.sort_by(|&a, &b| {
        nodes[a]
            .x
            .total_cmp(&nodes[b].x)
            .then(nodes[b].y.total_cmp(&nodes[a].y))
    });

    for node in order {
        let horizontal = forces[node][0];
        forces[node][0] = 0.0;
        if horizontal.abs() > tolerance {
            transfer_horizontal(model, forces, node, horizontal, sidesway)?;
        }

        if nodes[node].is_supported() {
            continue;
        }
        let vertical = forces[node][1];
        forces[node][1] = 0.0;
        if vertical.abs() > tolerance {
            let [far] = columns_below(model, node)[..] else {
                return Err(no_path(model, node, "vertical", vertical));
            };
            debug!(
                "Transferring vertical {vertical} from {} to {}",
                nodes[node].name(),
                nodes[far].name()
            );
            forces[far][1] += vertical;
        }
    }
    Ok(())
}

fn transfer_horizontal(
    model: &SDModel,
    forces: &mut [[f64; 2]],
    node: usize,
    horizontal: f64,
    sidesway: bool,
) -> SDResult<()> {
    let nodes = &model.nodes;
    let rightward = |kind: MemberKind| {
        neighbours(model, node, kind)
            .filter(|&far| nodes[far].x > nodes[node].x)
            .collect::<Vec<_>>()
    };

    match rightward(MemberKind::Beam)[..] {
        [far] => {
            debug!(
                "Transferring horizontal {horizontal} from {} to {}",
                nodes[node].name(),
                nodes[far].name()
            );
            forces[far][0] += horizontal;
            return Ok(());
        }
        [] => {}
        _ => return Err(no_path(model, node, "horizontal", horizontal)),
    }

    match rightward(MemberKind::Inclined)[..] {
        [far] => {
            let slope = (nodes[far].y - nodes[node].y) / (nodes[far].x - nodes[node].x);
            debug!(
                "Transferring horizontal {horizontal} from {} to {} along incline",
                nodes[node].name(),
                nodes[far].name()
            );
            forces[far][0] += horizontal;
            forces[far][1] += horizontal * slope;
            forces[node][1] -= horizontal * slope;
            return Ok(());
        }
        [] => {}
        _ => return Err(no_path(model, node, "horizontal", horizontal)),
    }

    match columns_below(model, node)[..] {
        [far] if sidesway => {
            debug!(
                "Transferring sway shear {horizontal} from {} down to {}",
                nodes[node].name(),
                nodes[far].name()
            );
            forces[far][0] += horizontal;
            Ok(())
        }
        _ => Err(no_path(model, node, "horizontal", horizontal)),
    }
}

/// Far nodes of the columns running down from `node`
fn columns_below(model: &SDModel, node: usize) -> Vec<usize> {
    neighbours(model, node, MemberKind::Column)
        .filter(|&far| model.nodes[far].y < model.nodes[node].y)
        .collect()
}

/// Far node of each member of `kind` at `node`
fn neighbours(
    model: &SDModel,
    node: usize,
    kind: MemberKind,
) -> impl Iterator<Item = usize> + '_ {
    model.nodes[node]
        .connections()
        .iter()
        .filter(move |c| model.members[c.member].kind == kind)
        .map(move |c| model.members[c.member].node_at(c.end.opposite()))
}

fn no_path(model: &SDModel, node: usize, direction: &str, residual: f64) -> SDError {
    SDError::UnsupportedTopology(format!(
        "no single load path carries the {direction} force {residual} away from joint '{}'",
        model.nodes[node].name()
    ))
}

fn shear_at(shears: &[[f64; 2]], member: usize, end: MemberEnd) -> f64 {
    match end {
        MemberEnd::Start => shears[member][0],
        MemberEnd::End => shears[member][1],
    }
}

/// Moment reaction of a fixed support: the sum of the member-end moments there
fn support_moment(model: &SDModel, node: usize, moments: &ResolvedMoments) -> f64 {
    if !model.nodes[node].is_fixed() {
        return 0.0;
    }
    compensated_sum(
        model.nodes[node]
            .connections()
            .iter()
            .map(|c| moments.at(c.member, c.end)),
    )
}

/// Total applied load `[fx, fy]` in global axes
pub fn applied_load(model: &SDModel) -> [f64; 2] {
    let mut fx = CompensatedSum::new();
    let mut fy = CompensatedSum::new();
    for member in &model.members {
        let [lx, ly] = member.local_y();
        for load in member.equivalent_point_loads() {
            fx.add(-load.magnitude * lx);
            fy.add(-load.magnitude * ly);
        }
    }
    [fx.value(), fy.value()]
}

/// Sum of absolute equivalent load magnitudes, used to scale tolerances
pub fn load_scale(model: &SDModel) -> f64 {
    compensated_sum(
        model
            .members
            .iter()
            .flat_map(|m| m.equivalent_point_loads())
            .map(|p| p.magnitude.abs()),
    )
}

/// Compare the applied loads against the reactions
pub fn statics_check(
    model: &SDModel,
    reactions: &BTreeMap<String, Reactions>,
    tolerance: f64,
) -> StaticsCheck {
    let [applied_fx, applied_fy] = applied_load(model);
    let reaction_fx = compensated_sum(reactions.values().map(|r| r.fx));
    let reaction_fy = compensated_sum(reactions.values().map(|r| r.fy));
    let balanced = (applied_fx + reaction_fx).abs() <= tolerance
        && (applied_fy + reaction_fy).abs() <= tolerance;
    StaticsCheck {
        applied_fx,
        applied_fy,
        reaction_fx,
        reaction_fy,
        balanced,
    }
}

/// Counts behind the sidesway determinacy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideswayCheck {
    pub joints: usize,
    pub fixed: usize,
    pub pinned: usize,
    pub rollers: usize,
    /// Restrained translations over all supports, `2(f + h) + r`
    pub restraints: usize,
    pub members: usize,
}

impl SideswayCheck {
    /// `2j − (2(f + h) + r + m)`
    pub fn degree(&self) -> i64 {
        2 * self.joints as i64 - (self.restraints + self.members) as i64
    }

    /// Whether the no-sidesway assumption holds
    pub fn is_determinate(&self) -> bool {
        self.degree() == 0
    }
}

/// Count joints, supports and members for the sidesway check
pub fn sidesway_check(model: &SDModel) -> SideswayCheck {
    let mut check = SideswayCheck {
        joints: 0,
        fixed: 0,
        pinned: 0,
        rollers: 0,
        restraints: 0,
        members: model.members.len(),
    };
    for node in model.nodes.iter().filter(|n| !n.connections().is_empty()) {
        check.joints += 1;
        let Some(support) = node.support else {
            continue;
        };
        check.restraints += support.translation_restraints();
        match support.kind {
            SupportKind::Fixed => check.fixed += 1,
            SupportKind::Pinned => check.pinned += 1,
            SupportKind::Roller => check.rollers += 1,
        }
    }
    check
}
