use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rubiks_cube_renderer::facelets::{derive_cubelets, CubeletCache};
use rubiks_cube_renderer::{CubeState, SOLVED_STATE};

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_cubelets");
    group.bench_function("solved", |b| b.iter(|| derive_cubelets(black_box(SOLVED_STATE))));
    group.bench_function("malformed", |b| b.iter(|| derive_cubelets(black_box("WYBGRO"))));
    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let state = CubeState::solved();
    let edited = state.with_cycled_facelet(13);
    let mut cache = CubeletCache::new();

    c.bench_function("cubelet_cache_hit", |b| b.iter(|| cache.get(black_box(&state))));
    c.bench_function("cubelet_cache_alternating", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            cache.get(if flip { &state } else { &edited })
        })
    });
}

criterion_group!(benches, bench_derive, bench_cache);
criterion_main!(benches);
