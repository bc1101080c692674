//! Benchmarks for linear value function approximation
//!
//! Run with: cargo bench -p linear_vfa

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linear_vfa::{
    ActionFeatures, FeatureDatabase, LinearVfa, StateFeature, VfaConfig,
    ValueFunctionApproximation,
};
use rand::Rng;
use std::collections::HashMap;

/// Tile coder over a bounded 4D state with lazily assigned tile ids.
#[derive(Clone)]
struct TileCoder {
    n_tilings: usize,
    widths: [f64; 4],
    ids: HashMap<(usize, [i64; 4], usize), i32>,
}

impl TileCoder {
    fn new(n_tilings: usize, resolution: f64) -> Self {
        let ranges = [2.0, 100.0, 50.0, 10.0];
        Self {
            n_tilings,
            widths: ranges.map(|r| r / resolution),
            ids: HashMap::new(),
        }
    }

    fn tiles(&mut self, state: &[f64; 4], action: usize) -> Vec<StateFeature> {
        (0..self.n_tilings)
            .map(|tiling| {
                let frac = tiling as f64 / self.n_tilings as f64;
                let mut cell = [0i64; 4];
                for (d, c) in cell.iter_mut().enumerate() {
                    *c = ((state[d] + frac * self.widths[d]) / self.widths[d]).floor() as i64;
                }
                let next = self.ids.len() as i32;
                let id = *self.ids.entry((tiling, cell, action)).or_insert(next);
                StateFeature::new(id, 1.0)
            })
            .collect()
    }
}

impl FeatureDatabase for TileCoder {
    type State = [f64; 4];
    type Action = usize;

    fn feature_count(&self) -> usize {
        0
    }

    fn state_features(&mut self, state: &[f64; 4]) -> Vec<StateFeature> {
        self.tiles(state, usize::MAX)
    }

    fn action_feature_sets(
        &mut self,
        state: &[f64; 4],
        actions: &[usize],
    ) -> Vec<ActionFeatures<usize>> {
        actions
            .iter()
            .map(|&a| ActionFeatures::new(a, self.tiles(state, a)))
            .collect()
    }

    fn copy(&self) -> linear_vfa::Result<Self> {
        Ok(self.clone())
    }
}

fn random_states(n: usize) -> Vec<[f64; 4]> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| {
            [
                rng.random_range(-1.0..1.0),
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..50.0),
                rng.random_range(-5.0..5.0),
            ]
        })
        .collect()
}

/// Benchmark state-action queries followed by gradient extraction
fn bench_state_action_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("State Action Values");
    let states = random_states(1000);
    let actions: Vec<usize> = (0..5).collect();

    for n_tilings in [1usize, 5, 10] {
        let config = VfaConfig::for_tilings(0.5, n_tilings).unwrap();
        let mut vfa = LinearVfa::with_config(TileCoder::new(n_tilings, 10.0), config).unwrap();

        group.bench_with_input(
            BenchmarkId::new("tilings", n_tilings),
            &n_tilings,
            |b, _| {
                b.iter(|| {
                    for state in &states {
                        let results = vfa.state_action_values(black_box(state), &actions);
                        black_box(vfa.weight_gradient(&results[0].result));
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the predictor on precomputed features
fn bench_approximate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Approximate");

    for n_features in [8usize, 64, 512] {
        let features: Vec<StateFeature> = (0..n_features as i32)
            .map(|i| StateFeature::new(i, 1.0 / (i + 1) as f64))
            .collect();
        let mut vfa = LinearVfa::new(TileCoder::new(1, 10.0));

        group.bench_with_input(
            BenchmarkId::new("features", n_features),
            &features,
            |b, features| {
                b.iter(|| black_box(vfa.approximate(features.clone())));
            },
        );
    }

    group.finish();
}

/// Benchmark deep copies of a populated approximator
fn bench_deep_copy(c: &mut Criterion) {
    let mut vfa = LinearVfa::new(TileCoder::new(5, 10.0));
    for state in random_states(500) {
        vfa.state_value(&state);
    }

    c.bench_function("deep_copy", |b| {
        b.iter(|| black_box(vfa.deep_copy().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_state_action_values,
    bench_approximate,
    bench_deep_copy
);
criterion_main!(benches);
