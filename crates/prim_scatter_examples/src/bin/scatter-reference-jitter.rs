use prim_scatter::prelude::*;
use prim_scatter_examples::{init_tracing, print_subtree, MemoryStage};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut stage = MemoryStage::new();
    stage.define("/World", "Xform")?;
    let rock = stage.define("/World/rock", "Mesh")?;
    let tree = stage.define("/World/tree", "Mesh")?;
    let bush = stage.define("/World/bush", "Mesh")?;
    stage.select(&[rock, tree, bush]);

    let target: PrimPath = "/World/Forest".parse()?;
    let settings = ScatterSettings::new()
        .with_axis(Axis::X, AxisSpec::new(5, 4.0).with_randomization(1.5))
        .with_axis(Axis::Y, AxisSpec::new(1, 0.0))
        .with_axis(Axis::Z, AxisSpec::new(5, 4.0).with_randomization(1.5))
        .with_seed(7)
        .with_target_path(target.clone())
        .with_mode(DuplicationMode::Reference);

    let mut created = 0usize;
    let mut sink = FnSink::new(|event| match event {
        DuplicationEvent::PrimCreated { index, source, path } => {
            created += 1;
            info!("#{index}: {path} -> {source}");
        }
        DuplicationEvent::Failed { index, message } => {
            info!("failed at {index:?}: {message}");
        }
        _ => {}
    });

    ScatterTool::new(settings).run_with_events(&mut stage, &mut sink)?;
    drop(sink);

    println!("{created} references under {target}");
    print_subtree(&stage, &target);

    Ok(())
}
