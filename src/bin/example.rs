//! Worked examples: a two-span beam and a portal frame
//!
//! Pass a JSON model file as the first argument to analyse it instead.

use anyhow::Context;
use log::info;

use slope_deflection::prelude::*;

fn two_span_beam() -> SDResult<SDModel> {
    let mut model = SDModel::new();
    model.add_node("A", Node::supported(0.0, 0.0, Support::fixed()))?;
    model.add_node("B", Node::supported(25.0, 0.0, Support::roller()))?;
    model.add_node("C", Node::supported(55.0, 0.0, Support::fixed()))?;

    model.add_member("AB", Member::beam("A", "B"))?;
    model.add_member("BC", Member::beam("B", "C"))?;

    model.add_member_load("AB", Load::point(10.0, 18.0))?;
    model.add_member_load("BC", Load::uniform(2.0, 0.0, 5.0))?;
    Ok(model)
}

fn portal_frame() -> SDResult<SDModel> {
    let mut model = SDModel::new();
    model.add_node("A", Node::supported(0.0, 0.0, Support::fixed()))?;
    model.add_node("B", Node::supported(30.0, 0.0, Support::fixed()))?;
    model.add_node("C", Node::new(0.0, 20.0))?;
    model.add_node("D", Node::new(30.0, 20.0))?;
    model.add_node("E", Node::supported(60.0, 20.0, Support::pinned()))?;

    model.add_member("AC", Member::column("A", "C"))?;
    model.add_member("BD", Member::column("B", "D"))?;
    model.add_member("CD", Member::beam("C", "D").with_stiffness(1.0, 2.0))?;
    model.add_member("DE", Member::beam("D", "E").with_stiffness(1.0, 2.0))?;

    model.add_member_load("AC", Load::point(10.0, 10.0))?;
    model.add_member_load("CD", Load::uniform(2.0, 0.0, 30.0))?;
    model.add_member_load("DE", Load::uniform(2.0, 0.0, 30.0))?;
    Ok(model)
}

fn report(title: &str, results: &AnalysisResults) {
    println!("=== {title} ({:?}) ===", results.mode);
    for (node, rotation) in &results.rotations {
        println!("  theta {node:<6} {rotation:>12.4}");
    }
    for (key, moment) in &results.moments {
        println!("  {key:<12} {moment:>12.4}");
    }
    for (node, r) in &results.reactions {
        println!(
            "  R{node:<5} fx {:>10.4}  fy {:>10.4}  mz {:>10.4}  |F| {:>10.4}",
            r.fx,
            r.fy,
            r.mz,
            r.force_magnitude()
        );
    }
    if let Some(determinate) = results.sidesway_determinate {
        println!("  no-sidesway assumption valid: {determinate}");
    }
    if let Some(statics) = &results.statics {
        println!("  statics balanced: {}", statics.balanced);
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let options = AnalysisOptions::default()
        .with_statics_check()
        .with_logging();

    if let Some(path) = std::env::args().nth(1) {
        let input = ModelInput::from_path(&path)
            .with_context(|| format!("failed to read model from {path}"))?;
        let results = input.build()?.analyze(&options)?;
        info!("Analysed {path}");
        println!("{}", results.to_json()?);
        return Ok(());
    }

    let beam = two_span_beam()?.analyze(&options)?;
    report("Two-span beam", &beam);

    let frame = portal_frame()?.analyze(&options)?;
    report("Portal frame", &frame);
    Ok(())
}
