//! Benchmarks for random-walk sampling across graph families and backends.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::SeedableRng;
use std::hint::black_box;
use walk_sampler::{AdjacencyList, AdjacencyMatrix, RandomWalkConfig, RandomWalkSampler};

fn ring(n: usize) -> Vec<(usize, usize)> {
    (0..n).map(|i| (i, (i + 1) % n)).collect()
}

/// Preferential attachment graph (Barabási–Albert) with `m` edges per new node.
///
/// This yields a heavy-tailed degree distribution that’s closer to many real graphs
/// than a ring.
fn barabasi_albert(n: usize, m: usize, seed: u64) -> Vec<(usize, usize)> {
    assert!(n >= m.max(2));
    assert!(m >= 1);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();

    // Start with a clique of size m+1.
    let init = m + 1;
    let mut targets: Vec<usize> = Vec::new(); // node ids repeated by degree
    for i in 0..init {
        for j in (i + 1)..init {
            edges.push((i, j));
            targets.push(i);
            targets.push(j);
        }
    }

    // Add nodes, attaching to existing nodes proportional to degree.
    for v in init..n {
        let mut chosen: Vec<usize> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = targets[rng.random_range(0..targets.len())];
            if u != v && !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for &u in &chosen {
            edges.push((u, v));
            targets.push(u);
            targets.push(v);
        }
    }
    edges
}

fn dense(n: usize, edges: &[(usize, usize)]) -> AdjacencyMatrix {
    let mut rows = vec![vec![0.0; n]; n];
    for &(u, v) in edges {
        rows[u][v] = 1.0;
        rows[v][u] = 1.0;
    }
    AdjacencyMatrix::new(rows).expect("square by construction")
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_walk_sample");

    for n in [1_000usize, 10_000] {
        let families = [("ring", ring(n)), ("ba_m4", barabasi_albert(n, 4, 123))];

        for (name, edges) in families {
            let g = AdjacencyList::from_edges(n, &edges).expect("edges in range");

            for target in [32usize, 256] {
                let cfg = RandomWalkConfig {
                    number_of_nodes: target,
                    seed: 123,
                    ..RandomWalkConfig::default()
                };
                group.bench_with_input(
                    BenchmarkId::new(format!("{name}/list/t{target}"), n),
                    &n,
                    |b, _| {
                        b.iter(|| {
                            let mut sampler = RandomWalkSampler::new(cfg).expect("valid config");
                            black_box(sampler.sample(black_box(&g)).expect("connected"));
                        })
                    },
                );
            }

            // Dense storage is only reasonable for the small graphs.
            if n <= 1_000 {
                let m = dense(n, &edges);
                let cfg = RandomWalkConfig {
                    number_of_nodes: 32,
                    seed: 123,
                    ..RandomWalkConfig::default()
                };
                group.bench_with_input(BenchmarkId::new(format!("{name}/matrix/t32"), n), &n, |b, _| {
                    b.iter(|| {
                        let mut sampler = RandomWalkSampler::new(cfg).expect("valid config");
                        black_box(sampler.sample(black_box(&m)).expect("connected"));
                    })
                });
            }
        }
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let n = 10_000usize;
    let g = AdjacencyList::from_edges(n, &barabasi_albert(n, 4, 7)).expect("edges in range");
    let cfg = RandomWalkConfig {
        number_of_nodes: 64,
        seed: 7,
        ..RandomWalkConfig::default()
    };

    let mut group = c.benchmark_group("backend_dispatch");
    group.bench_function("static", |b| {
        b.iter(|| {
            let mut sampler = RandomWalkSampler::new(cfg).expect("valid config");
            black_box(sampler.sample(black_box(&g)).expect("connected"));
        })
    });
    group.bench_function("registry", |b| {
        b.iter(|| {
            let mut sampler = RandomWalkSampler::new(cfg).expect("valid config");
            black_box(sampler.sample_any(black_box(&g)).expect("connected"));
        })
    });
    group.finish();
}

criterion_group!(benches, bench_sampling, bench_dispatch);
criterion_main!(benches);
