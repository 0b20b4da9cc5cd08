use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fmpart_core::rng::RngHandle;
use fmpart_core::Netlist;
use fmpart_graph::{canonical_hash, contract, gen_random_netlist};

fn queries_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(7);
    let netlist = gen_random_netlist(2_000, 2_400, 5, &mut rng).unwrap();
    let modules: Vec<_> = netlist.modules().collect();
    let cluster_of: Vec<u32> = (0..2_000u32).map(|v| v / 2).collect();

    c.bench_function("incident_walk", |b| {
        b.iter(|| {
            let mut pins = 0usize;
            for module in &modules {
                for net in netlist.incident_nets(*module) {
                    pins += netlist.degree(*net);
                }
            }
            black_box(pins);
        });
    });

    c.bench_function("gain_bound", |b| {
        b.iter(|| black_box(netlist.gain_bound()));
    });

    c.bench_function("canonical_hash", |b| {
        b.iter(|| black_box(canonical_hash(&netlist)));
    });

    c.bench_function("contract_pairs", |b| {
        b.iter(|| black_box(contract(&netlist, &cluster_of).unwrap()));
    });
}

criterion_group!(benches, queries_bench);
criterion_main!(benches);
