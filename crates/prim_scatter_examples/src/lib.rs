#![forbid(unsafe_code)]

mod stage;

pub use stage::{MemoryStage, Prim, StageError};
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Prints every prim below `root` with its type and translation.
pub fn print_subtree(stage: &MemoryStage, root: &prim_scatter::scene::PrimPath) {
    for (path, prim) in stage.iter().filter(|(p, _)| p.has_prefix(root)) {
        let t = prim.translation;
        let path = path.as_str();
        match &prim.reference {
            Some(source) => println!(
                "{path:<32} {:<14} ({:>6.2}, {:>6.2}, {:>6.2}) -> {source}",
                prim.type_name, t.x, t.y, t.z
            ),
            None => println!(
                "{path:<32} {:<14} ({:>6.2}, {:>6.2}, {:>6.2})",
                prim.type_name, t.x, t.y, t.z
            ),
        }
    }
}
