//! Frame analyses: joint force transfer and the sidesway check

use approx::assert_relative_eq;
use slope_deflection::prelude::*;

fn portal_frame() -> SDModel {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::fixed()))
        .unwrap();
    model
        .add_node("B", Node::supported(30.0, 0.0, Support::fixed()))
        .unwrap();
    model.add_node("C", Node::new(0.0, 20.0)).unwrap();
    model.add_node("D", Node::new(30.0, 20.0)).unwrap();
    model
        .add_node("E", Node::supported(60.0, 20.0, Support::pinned()))
        .unwrap();

    model.add_member("AC", Member::column("A", "C")).unwrap();
    model.add_member("BD", Member::column("B", "D")).unwrap();
    model
        .add_member("CD", Member::beam("C", "D").with_stiffness(1.0, 2.0))
        .unwrap();
    model
        .add_member("DE", Member::beam("D", "E").with_stiffness(1.0, 2.0))
        .unwrap();

    model.add_member_load("AC", Load::point(10.0, 10.0)).unwrap();
    model
        .add_member_load("CD", Load::uniform(2.0, 0.0, 30.0))
        .unwrap();
    model
        .add_member_load("DE", Load::uniform(2.0, 0.0, 30.0))
        .unwrap();
    model
}

#[test]
fn test_portal_frame_with_side_span() {
    let results = portal_frame()
        .analyze(&AnalysisOptions::default().with_statics_check())
        .unwrap();

    assert_eq!(results.mode, AnalysisMode::Frame);
    assert_eq!(results.sidesway_determinate, Some(true));

    let [fx, fy] = results.total_reaction();
    assert_relative_eq!(fx, -10.0, epsilon = 1e-6);
    assert_relative_eq!(fy, 120.0, epsilon = 1e-6);
    assert!(results.statics.unwrap().balanced);

    assert!(results.reaction("C").is_none());
    assert!(results.reaction("D").is_none());
    assert_eq!(results.reactions.len(), 3);

    assert_relative_eq!(results.rotation("C").unwrap(), -250.0, epsilon = 1e-9);
    assert_relative_eq!(results.rotation("D").unwrap(), -62.5, epsilon = 1e-9);
    assert_relative_eq!(results.rotation("E").unwrap(), 593.75, epsilon = 1e-9);

    let b = results.reaction("B").unwrap();
    assert_relative_eq!(b.fx, 0.9375, epsilon = 1e-9);
    assert_relative_eq!(b.fy, 71.25, epsilon = 1e-9);
    assert_relative_eq!(b.mz, -6.25, epsilon = 1e-9);

    let e = results.reaction("E").unwrap();
    assert_relative_eq!(e.fx, -9.6875, epsilon = 1e-9);
    assert_relative_eq!(e.fy, 22.916666666666668, epsilon = 1e-9);
    assert_eq!(e.mz, 0.0);
}

#[test]
fn test_joint_moments_balance() {
    let results = portal_frame().analyze_default().unwrap();
    let at_c = results.moment("C", "A").unwrap() + results.moment("C", "D").unwrap();
    let at_d = results.moment("D", "B").unwrap()
        + results.moment("D", "C").unwrap()
        + results.moment("D", "E").unwrap();
    assert_relative_eq!(at_c, 0.0, epsilon = 1e-9);
    assert_relative_eq!(at_d, 0.0, epsilon = 1e-9);
    assert_relative_eq!(results.moment("C", "D").unwrap(), 75.0, epsilon = 1e-9);
    assert_relative_eq!(results.moment("E", "D").unwrap(), 0.0, epsilon = 1e-9);
}

#[test]
fn test_fixed_portal_reports_sidesway() {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::fixed()))
        .unwrap();
    model
        .add_node("D", Node::supported(10.0, 0.0, Support::fixed()))
        .unwrap();
    model.add_node("B", Node::new(0.0, 5.0)).unwrap();
    model.add_node("C", Node::new(10.0, 5.0)).unwrap();
    model.add_member("AB", Member::column("A", "B")).unwrap();
    model.add_member("BC", Member::beam("B", "C")).unwrap();
    model.add_member("DC", Member::column("D", "C")).unwrap();
    model
        .add_member_load("BC", Load::uniform(3.0, 0.0, 10.0))
        .unwrap();

    let results = model.analyze_default().unwrap();
    assert_eq!(results.sidesway_determinate, Some(false));
    assert_eq!(model.sidesway_check().degree(), 1);

    assert_relative_eq!(results.moment("B", "C").unwrap(), 20.0, epsilon = 1e-9);
    assert_relative_eq!(results.moment("C", "B").unwrap(), -20.0, epsilon = 1e-9);
    let a = results.reaction("A").unwrap();
    let d = results.reaction("D").unwrap();
    assert_relative_eq!(a.fy, 15.0, epsilon = 1e-9);
    assert_relative_eq!(d.fy, 15.0, epsilon = 1e-9);
    assert_relative_eq!(a.fx, 6.0, epsilon = 1e-9);
    assert_relative_eq!(d.fx, -6.0, epsilon = 1e-9);
    assert_relative_eq!(a.mz, -10.0, epsilon = 1e-9);
    assert_relative_eq!(d.mz, 10.0, epsilon = 1e-9);
}

#[test]
fn test_swaying_portal_with_off_centre_load() {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::fixed()))
        .unwrap();
    model
        .add_node("D", Node::supported(10.0, 0.0, Support::fixed()))
        .unwrap();
    model.add_node("B", Node::new(0.0, 5.0)).unwrap();
    model.add_node("C", Node::new(10.0, 5.0)).unwrap();
    model.add_member("AB", Member::column("A", "B")).unwrap();
    model.add_member("BC", Member::beam("B", "C")).unwrap();
    model.add_member("DC", Member::column("D", "C")).unwrap();
    model.add_member_load("BC", Load::point(10.0, 3.0)).unwrap();

    let results = model
        .analyze(&AnalysisOptions::default().with_statics_check())
        .unwrap();
    assert_eq!(results.sidesway_determinate, Some(false));
    assert!(results.statics.unwrap().balanced);

    assert_relative_eq!(results.rotation("B").unwrap(), -13.5, epsilon = 1e-9);
    assert_relative_eq!(results.rotation("C").unwrap(), 7.5, epsilon = 1e-9);
    assert_relative_eq!(results.moment("B", "C").unwrap(), 10.8, epsilon = 1e-9);
    assert_relative_eq!(results.moment("C", "B").unwrap(), -6.0, epsilon = 1e-9);

    let a = results.reaction("A").unwrap();
    assert_relative_eq!(a.fx, 3.24, epsilon = 1e-9);
    assert_relative_eq!(a.fy, 7.48, epsilon = 1e-9);
    assert_relative_eq!(a.mz, -5.4, epsilon = 1e-9);

    let d = results.reaction("D").unwrap();
    assert_relative_eq!(d.fx, -3.24, epsilon = 1e-9);
    assert_relative_eq!(d.fy, 2.52, epsilon = 1e-9);
    assert_relative_eq!(d.mz, 3.0, epsilon = 1e-9);
}

#[test]
fn test_roller_passes_horizontal_force_on() {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::pinned()))
        .unwrap();
    model.add_node("B", Node::new(0.0, 4.0)).unwrap();
    model
        .add_node("C", Node::supported(6.0, 4.0, Support::roller()))
        .unwrap();
    model
        .add_node("D", Node::supported(12.0, 4.0, Support::pinned()))
        .unwrap();
    model.add_member("AB", Member::column("A", "B")).unwrap();
    model.add_member("BC", Member::beam("B", "C")).unwrap();
    model.add_member("CD", Member::beam("C", "D")).unwrap();
    model.add_member_load("AB", Load::point(3.0, 2.0)).unwrap();
    model
        .add_member_load("BC", Load::uniform(2.0, 0.0, 6.0))
        .unwrap();

    let results = model
        .analyze(&AnalysisOptions::default().with_statics_check())
        .unwrap();
    assert_eq!(results.mode, AnalysisMode::Frame);
    assert_eq!(results.sidesway_determinate, Some(true));
    assert!(results.statics.unwrap().balanced);

    let c = results.reaction("C").unwrap();
    assert_eq!(c.fx, 0.0);
    assert_relative_eq!(c.fy, 6.162162162162162, epsilon = 1e-9);

    let a = results.reaction("A").unwrap();
    assert_relative_eq!(a.fx, -0.16216216216216228, epsilon = 1e-9);
    assert_relative_eq!(a.fy, 6.364864864864866, epsilon = 1e-9);

    let d = results.reaction("D").unwrap();
    assert_relative_eq!(d.fx, -2.8378378378378377, epsilon = 1e-9);
    assert_relative_eq!(d.fy, -0.5270270270270272, epsilon = 1e-9);
}

#[test]
fn test_roller_without_horizontal_path() {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::pinned()))
        .unwrap();
    model.add_node("B", Node::new(0.0, 4.0)).unwrap();
    model
        .add_node("C", Node::supported(6.0, 4.0, Support::roller()))
        .unwrap();
    model.add_member("AB", Member::column("A", "B")).unwrap();
    model.add_member("BC", Member::beam("B", "C")).unwrap();
    model.add_member_load("AB", Load::point(3.0, 2.0)).unwrap();

    let err = model.analyze_default().unwrap_err();
    assert!(matches!(err, SDError::UnsupportedTopology(ref msg) if msg.contains("'C'")));
}

#[test]
fn test_horizontal_transfer_along_incline() {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::fixed()))
        .unwrap();
    model.add_node("B", Node::new(0.0, 5.0)).unwrap();
    model
        .add_node("C", Node::supported(6.0, 0.0, Support::pinned()))
        .unwrap();
    model.add_member("AB", Member::column("A", "B")).unwrap();
    model.add_member("BC", Member::inclined("B", "C")).unwrap();
    model.add_member_load("BC", Load::point(4.0, 3.0)).unwrap();

    let results = model
        .analyze(&AnalysisOptions::frame().with_statics_check())
        .unwrap();
    assert_eq!(results.sidesway_determinate, Some(true));
    assert!(results.statics.unwrap().balanced);

    let a = results.reaction("A").unwrap();
    assert_relative_eq!(a.fx, 1.2102763072095646, epsilon = 1e-9);
    assert_relative_eq!(a.fy, 2.870645254157335, epsilon = 1e-9);
    assert_relative_eq!(a.mz, -2.0171271786826077, epsilon = 1e-9);

    let c = results.reaction("C").unwrap();
    assert_relative_eq!(c.fx, 1.350461291448355, epsilon = 1e-9);
    assert_relative_eq!(c.fy, 0.20223986423216855, epsilon = 1e-9);
}

#[test]
fn test_joint_without_load_path() {
    let mut model = SDModel::new();
    model
        .add_node("A", Node::supported(0.0, 0.0, Support::pinned()))
        .unwrap();
    model.add_node("B", Node::new(5.0, 0.0)).unwrap();
    model
        .add_node("C", Node::supported(10.0, 0.0, Support::roller()))
        .unwrap();
    model.add_member("AB", Member::beam("A", "B")).unwrap();
    model.add_member("BC", Member::beam("B", "C")).unwrap();
    model.add_member_load("AB", Load::point(4.0, 2.0)).unwrap();

    assert!(matches!(
        model.analyze_default(),
        Err(SDError::UnsupportedTopology(_))
    ));
    assert!(matches!(
        model.analyze(&AnalysisOptions::beam()),
        Err(SDError::UnsupportedTopology(_))
    ));
}

#[test]
fn test_disconnected_joint() {
    let mut model = portal_frame();
    model
        .add_node("F", Node::supported(90.0, 0.0, Support::pinned()))
        .unwrap();
    let err = model.analyze_default().unwrap_err();
    assert!(matches!(err, SDError::DisconnectedJoint(ref name) if name == "F"));
}

#[test]
fn test_results_serialize() {
    let results = portal_frame().analyze_default().unwrap();
    let json = results.to_json().unwrap();
    assert!(json.contains("\"sidesway_determinate\": true"));
    assert!(json.contains("\"MOMENTCD\""));
}
