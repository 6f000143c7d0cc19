mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use prim_scatter::prelude::*;

/// Host that accepts every command and only counts them.
#[derive(Default)]
struct CountingHost {
    commands: usize,
    groups: usize,
}

impl CommandExecutor for CountingHost {
    fn execute(&mut self, _command: &HostCommand) -> std::result::Result<(), CommandError> {
        self.commands += 1;
        Ok(())
    }
}

impl UndoTransactions for CountingHost {
    fn begin_group(&mut self) {
        self.groups += 1;
    }

    fn end_group(&mut self) {}
}

fn build_request(edge: i64, mode: DuplicationMode) -> DuplicationRequest {
    let sources = common::source_prims();
    let generation = common::grid_request(edge, 1, sources.len(), 0.0);
    let transforms: ScatterResult = scatter(&generation)
        .map(Iterator::collect)
        .unwrap_or_default();
    DuplicationRequest::new(transforms, sources, common::target_path()).with_mode(mode)
}

fn duplication_benches(c: &mut Criterion) {
    for mode in [
        DuplicationMode::Copy,
        DuplicationMode::Reference,
        DuplicationMode::PointInstancer,
    ] {
        let mut group = c.benchmark_group(format!("duplication/{mode}"));

        for &edge in &common::BATCH_EDGES {
            let request = build_request(edge, mode.clone());
            group.throughput(common::items_throughput(request.transforms.len()));

            group.bench_with_input(BenchmarkId::from_parameter(edge), &edge, |b, _| {
                b.iter_batched(
                    CountingHost::default,
                    |mut host| {
                        let report = duplicate_prims(&request, &mut host);
                        black_box((report.is_ok(), host.commands, host.groups));
                    },
                    BatchSize::SmallInput,
                );
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = duplication_benches
}
criterion_main!(benches);
