use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use evergreen::animation::{GroupAnimator, Mode, MotionProfile};
use evergreen::layout::{generate_group, ParticleCategory};
use evergreen::options::{LayoutOptions, MotionOptions};

fn generation_benchmark(c: &mut Criterion) {
    let layout = LayoutOptions::default();
    c.bench_function("generate_3500_needles", |b| {
        b.iter(|| {
            black_box(generate_group(
                black_box(3500_usize).into(),
                ParticleCategory::Structural,
                &layout,
            ))
        })
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_frame");
    let layout = LayoutOptions::default();
    let motion = MotionOptions::default();

    for count in [250_usize, 1000, 3500, 10_000] {
        let particles = Arc::new(generate_group(
            count.into(),
            ParticleCategory::Structural,
            &layout,
        ));
        let profile = MotionProfile::for_group(
            &motion,
            &layout,
            ParticleCategory::Structural,
            0.8,
        );
        let mut animator = GroupAnimator::with_seed(particles, profile, 1);
        let mut elapsed = 0.0;

        group.bench_function(format!("{count}_particles"), |b| {
            b.iter(|| {
                elapsed += 1.0 / 60.0;
                black_box(
                    animator
                        .advance_frame(Mode::Assembled, 1.0 / 60.0, elapsed)
                        .len(),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, generation_benchmark, frame_benchmark);
criterion_main!(benches);
