use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use miniframe::{Engine, Model, Sente, StdRngSource};

/// A synthetic uniform-branching-factor-3 decision tree, depth-bounded by
/// `max_depth`: status is the path taken so far, encoded as a small integer
/// per level so `is_same` is cheap and reuse never collapses branches.
#[derive(Debug, Clone, Copy)]
struct BranchModel {
    max_depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BranchStatus {
    path: u64,
    depth: u32,
}

impl Model for BranchModel {
    type Status = BranchStatus;
    type Transition = u8;

    const NUM_ACTORS: usize = 1;
    const MAX_TRANSITIONS: usize = 3;
    const SIMULTANEOUS_PLAY: bool = false;

    fn is_same(&self, a: &Self::Status, b: &Self::Status) -> bool {
        a == b
    }

    fn get_sente(&self, _status: &Self::Status) -> Sente {
        Sente::Actor(0)
    }

    fn get_transitions(&self, status: &Self::Status) -> Vec<Self::Transition> {
        if status.depth >= self.max_depth {
            return Vec::new();
        }
        vec![0, 1, 2]
    }

    fn get_values(&self, status: &Self::Status) -> Vec<f64> {
        // A deterministic pseudo-value from the path, so different branches
        // carry different forecasts (exercises the propagator and pruning).
        vec![(status.path % 97) as f64 - 48.0]
    }

    fn step(&self, status: &Self::Status, transition: &Self::Transition) -> Self::Status {
        BranchStatus {
            path: status.path * 3 + u64::from(*transition) + 1,
            depth: status.depth + 1,
        }
    }

    fn is_end(&self, status: &Self::Status) -> bool {
        status.depth >= self.max_depth
    }

    fn is_disposable(&self, _candidate: &Self::Status, _current: &Self::Status) -> bool {
        false
    }
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_expand");
    for &depth in &[4u32, 6, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let model = BranchModel { max_depth: depth };
                let initial = BranchStatus { path: 0, depth: 0 };
                let mut engine = Engine::create(model, initial);
                engine.set_sampling_source(Box::new(StdRngSource::seeded(1)));
                engine.set_max_time_ms(50.0);
                engine.set_reuse(false);
                engine.expand();
                black_box(engine.best_transition(0).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_expand);
criterion_main!(benches);
