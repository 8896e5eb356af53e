//! Fixed-end moments for point, uniform and linearly varying loads
//!
//! Values are anticlockwise-positive: a downward load on a left-to-right beam
//! gives a positive moment at the start end and a negative one at the end.

use crate::elements::{Member, MemberEnd};
use crate::error::{SDError, SDResult};
use crate::loads::{Load, PointLoad, UniformLoad, VaryingLoad};
use crate::math::{compensated_sum, CompensatedSum};
use crate::model::{SDModel, SupportChain};

/// Fixed-end moment at one end of a clamped span carrying `loads`
///
/// `side` selects the start (left) or end (right) of the span. Load
/// positions are measured from the start end.
pub fn fixed_end_moment(loads: &[Load], span: f64, side: MemberEnd) -> SDResult<f64> {
    let mut sum = CompensatedSum::new();
    for load in loads {
        let (left, right) = load_fixed_end_moments(load, span)?;
        match side {
            MemberEnd::Start => sum.add(left),
            MemberEnd::End => sum.add(-right),
        }
    }
    Ok(sum.value())
}

/// Signed fixed-end moments `(start, end)` of a member
pub fn member_fixed_end_moments(member: &Member) -> SDResult<(f64, f64)> {
    let start = fixed_end_moment(member.loads(), member.length(), MemberEnd::Start)?;
    let end = fixed_end_moment(member.loads(), member.length(), MemberEnd::End)?;
    Ok((start, end))
}

/// Unsigned physical clamping moments `(left, right)` produced by one load
pub fn load_fixed_end_moments(load: &Load, span: f64) -> SDResult<(f64, f64)> {
    if span <= 0.0 {
        return Err(SDError::InvalidGeometry(format!(
            "span must be positive, got {span}"
        )));
    }
    match load {
        Load::Point(point) => Ok(point_moments(point, span)),
        Load::Uniform(uniform) => Ok(uniform_moments(uniform, span)),
        Load::Varying(varying) => varying_moments(varying, span),
    }
}

fn point_moments(load: &PointLoad, span: f64) -> (f64, f64) {
    let a = load.position;
    let b = span - a;
    let l2 = span * span;
    (
        load.magnitude * a * b * b / l2,
        load.magnitude * a * a * b / l2,
    )
}

fn uniform_moments(load: &UniformLoad, span: f64) -> (f64, f64) {
    let (x1, x2) = (load.start.min(load.end()), load.start.max(load.end()));
    linear_intensity_moments(load.intensity, 0.0, x1, x2, span)
}

fn varying_moments(load: &VaryingLoad, span: f64) -> SDResult<(f64, f64)> {
    if load.low_position == load.high_position {
        return Err(SDError::DegenerateVaryingLoad(load.low_position));
    }
    let (c0, c1) = load.linear_coefficients();
    let (x1, x2) = if load.rises_forward() {
        (load.low_position, load.high_position)
    } else {
        (load.high_position, load.low_position)
    };
    Ok(linear_intensity_moments(c0, c1, x1, x2, span))
}

/// Clamping moments of an intensity `c0 + c1·x` acting over `[x1, x2]`
///
/// Integrates `q·x·(L−x)²/L²` for the left end and `q·x²·(L−x)/L²` for the
/// right end.
fn linear_intensity_moments(c0: f64, c1: f64, x1: f64, x2: f64, span: f64) -> (f64, f64) {
    let power_integral = |k: i32| (x2.powi(k + 1) - x1.powi(k + 1)) / f64::from(k + 1);
    let i1 = power_integral(1);
    let i2 = power_integral(2);
    let i3 = power_integral(3);
    let i4 = power_integral(4);
    let l = span;
    let l2 = span * span;

    let left = compensated_sum([
        c0 * l2 * i1,
        -2.0 * c0 * l * i2,
        c0 * i3,
        c1 * l2 * i2,
        -2.0 * c1 * l * i3,
        c1 * i4,
    ]) / l2;
    let right = compensated_sum([c0 * l * i2, -c0 * i3, c1 * l * i3, -c1 * i4]) / l2;
    (left, right)
}

/// Fixed-end moments either side of a support in a beam chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportFixedEndMoments {
    /// Chain id of the support (its number of predecessors)
    pub id: usize,
    /// Node index of the support
    pub node: usize,
    /// FEM at this support's end of the member to its left
    pub left: Option<f64>,
    /// FEM at this support's end of the member to its right
    pub right: Option<f64>,
}

/// Walk the support chain left to right, computing the FEM on each side of
/// every support from its neighbouring spans
pub fn all_fixed_end_moments(
    model: &SDModel,
    chain: &SupportChain,
) -> SDResult<Vec<SupportFixedEndMoments>> {
    let mut result = Vec::with_capacity(chain.len());
    for id in 0..chain.len() {
        let Some(node) = chain.node(id) else {
            continue;
        };
        let left = match chain.prev(id) {
            Some(prev) => near_end_fem(model, node, prev)?,
            None => None,
        };
        let right = match chain.next(id) {
            Some(next) => near_end_fem(model, node, next)?,
            None => None,
        };
        result.push(SupportFixedEndMoments {
            id,
            node,
            left,
            right,
        });
    }
    Ok(result)
}

/// FEM at `near`'s end of the member joining `near` and `far`, if one exists
fn near_end_fem(model: &SDModel, near: usize, far: usize) -> SDResult<Option<f64>> {
    let Some(index) = model.member_between(near, far) else {
        return Ok(None);
    };
    let member = &model.members[index];
    let side = if member.start() == near {
        MemberEnd::Start
    } else {
        MemberEnd::End
    };
    fixed_end_moment(member.loads(), member.length(), side).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_load_midspan() {
        let loads = [Load::point(10.0, 5.0)];
        assert_relative_eq!(fixed_end_moment(&loads, 10.0, MemberEnd::Start).unwrap(), 12.5);
        assert_relative_eq!(fixed_end_moment(&loads, 10.0, MemberEnd::End).unwrap(), -12.5);
    }

    #[test]
    fn test_point_load_off_centre() {
        let loads = [Load::point(10.0, 18.0)];
        assert_relative_eq!(
            fixed_end_moment(&loads, 25.0, MemberEnd::Start).unwrap(),
            14.112,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            fixed_end_moment(&loads, 25.0, MemberEnd::End).unwrap(),
            -36.288,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_full_uniform_load() {
        let loads = [Load::uniform(2.0, 0.0, 6.0)];
        assert_relative_eq!(
            fixed_end_moment(&loads, 6.0, MemberEnd::Start).unwrap(),
            6.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            fixed_end_moment(&loads, 6.0, MemberEnd::End).unwrap(),
            -6.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_partial_uniform_load() {
        // w·a²/(12L²)·(6L² − 8aL + 3a²) and w·a³/(12L²)·(4L − 3a)
        let (w, a, l): (f64, f64, f64) = (2.0, 5.0, 30.0);
        let left = w * a * a / (12.0 * l * l) * (6.0 * l * l - 8.0 * a * l + 3.0 * a * a);
        let right = w * a.powi(3) / (12.0 * l * l) * (4.0 * l - 3.0 * a);
        let loads = [Load::uniform(w, 0.0, a)];
        assert_relative_eq!(
            fixed_end_moment(&loads, l, MemberEnd::Start).unwrap(),
            left,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            fixed_end_moment(&loads, l, MemberEnd::End).unwrap(),
            -right,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_triangular_load_both_directions() {
        let rising = [Load::varying(6.0, 0.0, 10.0)];
        assert_relative_eq!(
            fixed_end_moment(&rising, 10.0, MemberEnd::Start).unwrap(),
            20.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            fixed_end_moment(&rising, 10.0, MemberEnd::End).unwrap(),
            -30.0,
            epsilon = 1e-9
        );

        let falling = [Load::varying(6.0, 10.0, 0.0)];
        assert_relative_eq!(
            fixed_end_moment(&falling, 10.0, MemberEnd::Start).unwrap(),
            30.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            fixed_end_moment(&falling, 10.0, MemberEnd::End).unwrap(),
            -20.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_uniform_load_split_into_pieces() {
        let whole = [Load::uniform(3.0, 1.0, 6.0)];
        let pieces = [
            Load::uniform(3.0, 1.0, 2.0),
            Load::uniform(3.0, 3.0, 2.5),
            Load::uniform(3.0, 5.5, 1.5),
        ];
        for side in [MemberEnd::Start, MemberEnd::End] {
            assert_relative_eq!(
                fixed_end_moment(&whole, 8.0, side).unwrap(),
                fixed_end_moment(&pieces, 8.0, side).unwrap(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_degenerate_varying_load() {
        let loads = [Load::varying(3.0, 2.0, 2.0)];
        assert!(matches!(
            fixed_end_moment(&loads, 5.0, MemberEnd::Start),
            Err(SDError::DegenerateVaryingLoad(_))
        ));
    }

    #[test]
    fn test_no_loads() {
        assert_eq!(fixed_end_moment(&[], 4.0, MemberEnd::Start).unwrap(), 0.0);
    }

    #[test]
    fn test_chain_sweep() {
        use crate::elements::{Node, Support};

        let mut model = SDModel::new();
        model
            .add_node("C", Node::supported(55.0, 0.0, Support::fixed()))
            .unwrap();
        model
            .add_node("A", Node::supported(0.0, 0.0, Support::fixed()))
            .unwrap();
        model
            .add_node("B", Node::supported(25.0, 0.0, Support::roller()))
            .unwrap();
        model.add_member("AB", Member::beam("A", "B")).unwrap();
        model.add_member("BC", Member::beam("B", "C")).unwrap();
        model.add_member_load("AB", Load::point(10.0, 18.0)).unwrap();
        model
            .add_member_load("BC", Load::uniform(2.0, 0.0, 5.0))
            .unwrap();

        let sweep = all_fixed_end_moments(&model, &model.support_chain()).unwrap();
        assert_eq!(sweep.len(), 3);
        assert_eq!(
            sweep.iter().map(|s| (s.id, s.node)).collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (2, 0)]
        );

        let (a, b, c) = (&sweep[0], &sweep[1], &sweep[2]);
        assert_eq!(a.left, None);
        assert_relative_eq!(a.right.unwrap(), 14.112, epsilon = 1e-12);
        assert_relative_eq!(b.left.unwrap(), -36.288, epsilon = 1e-12);
        assert_relative_eq!(b.right.unwrap(), 19.791666666666668, epsilon = 1e-12);
        assert_relative_eq!(c.left.unwrap(), -2.4305555555555554, epsilon = 1e-12);
        assert_eq!(c.right, None);
    }

    #[test]
    fn test_chain_sweep_skips_missing_span() {
        use crate::elements::{Node, Support};

        let mut model = SDModel::new();
        model
            .add_node("A", Node::supported(0.0, 0.0, Support::fixed()))
            .unwrap();
        model
            .add_node("B", Node::supported(4.0, 0.0, Support::pinned()))
            .unwrap();
        model
            .add_node("C", Node::supported(8.0, 0.0, Support::fixed()))
            .unwrap();
        model.add_member("AB", Member::beam("A", "B")).unwrap();

        let sweep = all_fixed_end_moments(&model, &model.support_chain()).unwrap();
        assert_eq!(sweep[1].left, Some(0.0));
        assert_eq!(sweep[1].right, None);
        assert_eq!(sweep[2].left, None);
    }
}
