//! State copy and playout benchmarks.
//!
//! Search players copy the state once per sample, so copy cost bounds how
//! many playouts fit in a decision.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tabletop_engine::core::{GameRng, PlayerId};
use tabletop_engine::games::kittens::KittensBuilder;
use tabletop_engine::players::random_playout;

fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy");
    for players in [2usize, 5] {
        let (_, state) = KittensBuilder::new().player_count(players).build(42).unwrap();

        group.bench_with_input(BenchmarkId::new("exact", players), &state, |b, state| {
            b.iter(|| black_box(state.copy()))
        });
        group.bench_with_input(BenchmarkId::new("for_player", players), &state, |b, state| {
            b.iter(|| black_box(state.copy_for_player(PlayerId::new(0))))
        });
    }
    group.finish();
}

fn bench_playout(c: &mut Criterion) {
    let (model, state) = KittensBuilder::new().player_count(4).build(42).unwrap();

    c.bench_function("random_playout_4p", |b| {
        let mut rng = GameRng::new(7);
        b.iter(|| {
            let mut sim = state.copy();
            black_box(random_playout(&model, &mut sim, &mut rng, 1_000))
        })
    });
}

fn bench_available_actions(c: &mut Criterion) {
    let (model, state) = KittensBuilder::new().player_count(3).build(42).unwrap();

    c.bench_function("compute_available_actions", |b| {
        b.iter(|| black_box(model.compute_available_actions(&state)))
    });
}

criterion_group!(benches, bench_copy, bench_playout, bench_available_actions);
criterion_main!(benches);
