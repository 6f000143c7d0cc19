use prim_scatter::prelude::*;
use prim_scatter_examples::{init_tracing, MemoryStage};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut stage = MemoryStage::new();
    stage.define("/World", "Xform")?;
    let cube = stage.define("/World/cube", "Mesh")?;
    stage.select(&[cube]);
    let baseline = stage.len();

    let tool = ScatterTool::new(
        ScatterSettings::new()
            .with_axis(Axis::X, AxisSpec::new(3, 1.0))
            .with_axis(Axis::Y, AxisSpec::new(3, 1.0))
            .with_seed(1),
    );

    // Successful batch: nine copies, one undo step
    let report = tool.run(&mut stage)?;
    println!(
        "batch 1: {} prims created, stage has {} prims, undo depth {}",
        report.created.len(),
        stage.len(),
        stage.undo_depth()
    );
    stage.undo();
    println!("after undo: {} prims (baseline {baseline})", stage.len());

    // Failing batch: a prim already sits where the fifth copy goes
    stage.define("/World/Scatter/cube4", "Mesh")?;
    let before_failure = stage.len();
    match tool.run(&mut stage) {
        Ok(_) => println!("batch 2 unexpectedly succeeded"),
        Err(err) => println!("batch 2 failed at item {:?}: {err}", err.item_index()),
    }
    println!(
        "partial batch left {} extra prims, undo depth {}",
        stage.len() - before_failure,
        stage.undo_depth()
    );
    stage.undo();
    println!("after undo: {} prims", stage.len());

    Ok(())
}
