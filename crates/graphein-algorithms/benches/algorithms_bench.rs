//! Benchmarks over a deterministic 1k-vertex circulant graph.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use graphein_algorithms::{dijkstra, kruskal_msf_seeded, strongly_connected_components};
use graphein_common::NativeRing;
use graphein_core::Graph;

const N: u32 = 1_000;

fn circulant(directed: bool) -> Graph<u32, usize, u32, NativeRing> {
    let mut g = if directed {
        Graph::directed(NativeRing)
    } else {
        Graph::undirected(NativeRing)
    };
    for v in 0..N {
        g.add_vertex(v);
    }
    let mut key = 0usize;
    for v in 0..N {
        for offset in [1u32, 7, 31, 127] {
            let t = (v + offset) % N;
            g.add_edge(&v, &t, key, offset).unwrap();
            key += 1;
        }
    }
    g
}

fn bench_dijkstra(c: &mut Criterion) {
    let g = circulant(true);
    c.bench_function("dijkstra_1k", |b| {
        b.iter(|| dijkstra(black_box(&g), &0).unwrap());
    });
}

fn bench_tarjan(c: &mut Criterion) {
    let g = circulant(true);
    c.bench_function("tarjan_scc_1k", |b| {
        b.iter(|| strongly_connected_components(black_box(&g)));
    });
}

fn bench_kruskal(c: &mut Criterion) {
    let g = circulant(false);
    c.bench_function("kruskal_msf_1k", |b| {
        b.iter(|| kruskal_msf_seeded(black_box(&g), 42));
    });
}

criterion_group!(benches, bench_dijkstra, bench_tarjan, bench_kruskal);
criterion_main!(benches);
