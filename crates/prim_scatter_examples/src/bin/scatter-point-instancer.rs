use prim_scatter::prelude::*;
use prim_scatter_examples::{init_tracing, MemoryStage};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut stage = MemoryStage::new();
    stage.define("/World", "Xform")?;
    let prototypes = vec![
        stage.define("/World/Prototypes/pebble", "Mesh")?,
        stage.define("/World/Prototypes/stone", "Mesh")?,
    ];

    let generation = GenerationRequest::new(prototypes.len())
        .with_counts([20, 1, 20])
        .with_distances([0.5, 0.0, 0.5])
        .with_randomizations([0.2, 0.0, 0.2])
        .with_seed(2024);
    let transforms: ScatterResult = scatter(&generation)?.collect();

    let instancer: PrimPath = "/World/Pebbles".parse()?;
    let request = DuplicationRequest::new(transforms, prototypes.clone(), instancer.clone())
        .with_mode(DuplicationMode::PointInstancer);
    duplicate_prims(&request, &mut stage)?;

    let prim = stage
        .get(&instancer)
        .ok_or_else(|| anyhow::anyhow!("instancer was not created"))?;
    println!(
        "{instancer}: {} instances, undo steps {}",
        prim.proto_indices.len(),
        stage.undo_depth()
    );
    for (i, proto) in prototypes.iter().enumerate() {
        let uses = prim.proto_indices.iter().filter(|&&p| p == i).count();
        println!("  {proto}: {uses}");
    }

    Ok(())
}
