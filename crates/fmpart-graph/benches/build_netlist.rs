use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fmpart_core::rng::RngHandle;
use fmpart_graph::gen_random_netlist;

fn build_netlist_bench(c: &mut Criterion) {
    c.bench_function("build_netlist_5k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            let netlist = gen_random_netlist(5_000, 6_000, 5, &mut rng).unwrap();
            black_box(netlist);
        });
    });
}

criterion_group!(benches, build_netlist_bench);
criterion_main!(benches);
