use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rungraph_core::{GraphSnapshot, HorizontalSettings, NodeWidths, RunNode, VerticalMode};
use std::hint::black_box;
use std::time::Duration;

struct GraphSpec {
    node_count: usize,
    fanout: usize,
}

impl GraphSpec {
    /// Staged fan-out: each node starts shortly after its parent and
    /// feeds `fanout` children, with clustered start times so plenty of
    /// extents collide and the shove chains get exercised.
    fn build(&self) -> (GraphSnapshot, NodeWidths) {
        let mut g = GraphSnapshot::new();
        let mut widths = NodeWidths::new();
        for i in 0..self.node_count {
            let id = format!("n{i}");
            let start_ms = (i / self.fanout) as i64 * 5_000;
            g.set_node(RunNode::new(id.as_str(), start_ms).with_end(start_ms + 20_000));
            widths.set(id.as_str(), 20.0 + (i % 7) as f64 * 15.0);
            if i > 0 {
                let parent = format!("n{}", (i - 1) / self.fanout);
                g.set_edge(parent.as_str(), id.as_str());
            }
        }
        g.compute_roots();
        (g, widths)
    }
}

fn bench_nearest_parent(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_parent");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("fanout_100_f3", 100usize, 3usize),
        ("fanout_500_f4", 500usize, 4usize),
        ("fanout_2000_f4", 2000usize, 4usize),
    ];

    for (name, node_count, fanout) in cases {
        let spec = GraphSpec { node_count, fanout };
        group.bench_with_input(BenchmarkId::new("layout", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |(g, widths)| {
                    let result = rungraph_layout::layout(
                        black_box(&g),
                        &widths,
                        &HorizontalSettings::time(0),
                        VerticalMode::NearestParent,
                        0,
                    );
                    black_box(result.max_row);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nearest_parent);
criterion_main!(benches);
