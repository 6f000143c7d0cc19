use prim_scatter::prelude::*;
use prim_scatter_examples::{init_tracing, print_subtree, MemoryStage};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut stage = MemoryStage::new();
    stage.define("/World", "Xform")?;
    let cube = stage.define("/World/cube", "Mesh")?;
    stage.define("/World/cube/looks", "Material")?;
    let sphere = stage.define("/World/sphere", "Mesh")?;
    stage.select(&[cube, sphere]);

    // 4 x 1 x 3 grid, two units apart, copies picked at random from the selection
    let settings = ScatterSettings::new()
        .with_axis(Axis::X, AxisSpec::new(4, 2.0))
        .with_axis(Axis::Z, AxisSpec::new(3, 2.0))
        .with_seed(42)
        .with_mode(DuplicationMode::Copy);
    let target = settings.target_path.clone();

    let report = ScatterTool::new(settings).run(&mut stage)?;
    println!(
        "created {} prims with {} commands",
        report.created.len(),
        report.commands_issued
    );
    print_subtree(&stage, &target);

    Ok(())
}
