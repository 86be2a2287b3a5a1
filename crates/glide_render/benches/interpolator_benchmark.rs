//! # Interpolator Benchmark
//!
//! Frame-rate cost of sampling render states, and the per-tick cost of
//! rebuilding them.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glide_render::{
    AttributeUpdate, ColorInterpolator, DisplayData, DisplayKind, RenderStateController,
    TransformInterpolator, ValueInterpolator,
};
use glide_shared::{Argb, Quaternion, Transformation, Vec3};

fn bench_interpolators(c: &mut Criterion) {
    let color = ColorInterpolator::color(Argb(0x4000_0000), Argb(0xFF33_CC99));
    c.bench_function("color_get", |b| {
        b.iter(|| color.get(black_box(0.37)));
    });

    let target = Transformation::new(
        Vec3::new(1.0, 2.0, 3.0),
        Quaternion::from_axis_angle(Vec3::Y, 1.2),
        Vec3::new(2.0, 2.0, 2.0),
        Quaternion::from_axis_angle(Vec3::X, 0.4),
    );
    let spherical = TransformInterpolator::spherical(Transformation::IDENTITY, target);
    c.bench_function("spherical_get", |b| {
        b.iter(|| spherical.get(black_box(0.37)));
    });
}

fn bench_controllers(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_display_tick");

    for count in [100usize, 1_000] {
        let mut displays: Vec<RenderStateController> = (0..count)
            .map(|_| {
                let mut data = DisplayData::new(DisplayKind::Text);
                data.interpolation_duration = 5;
                let mut display = RenderStateController::new(data);
                display.tick();
                display
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut width = 0;
            b.iter(|| {
                width = (width + 1) % 200;
                for display in &mut displays {
                    display.apply(AttributeUpdate::LineWidth(width));
                    display.tick();
                    black_box(display.frame(0.5));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interpolators, bench_controllers);
criterion_main!(benches);
