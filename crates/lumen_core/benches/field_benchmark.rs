//! Benchmark for the particle field and effects sweep.
//!
//! TARGET: a full background frame well under 1% of a 60 FPS budget
//!
//! Run with: cargo bench --package lumen_core --bench field_benchmark

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lumen_core::{
    step_particle, Background, BackgroundConfig, EntityId, FieldConfig, Particle, Renderer, Visual,
};
use lumen_shared::{InputEvent, Vec2, Viewport};

/// Renderer that discards everything.
struct NullRenderer {
    viewport: Viewport,
}

impl Renderer for NullRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn spawn(&mut self, _id: EntityId, visual: &Visual) {
        black_box(visual);
    }

    fn update(&mut self, _id: EntityId, visual: &Visual) {
        black_box(visual);
    }

    fn remove(&mut self, id: EntityId) {
        black_box(id);
    }
}

fn benchmark_step_particle(c: &mut Criterion) {
    let config = FieldConfig::default();
    let viewport = Viewport::new(1024.0, 768.0);
    let mut particle = Particle::new(EntityId::NULL, Vec2::new(512.0, 384.0), Vec2::new(0.2, -0.1), 4.0);

    c.bench_function("step_particle_near_pointer", |b| {
        b.iter(|| {
            step_particle(
                black_box(&mut particle),
                viewport,
                black_box(Vec2::new(540.0, 400.0)),
                &config,
            );
        });
    });
}

fn benchmark_background_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("background_frame");

    for width in [500.0f32, 1024.0] {
        let mut renderer = NullRenderer {
            viewport: Viewport::new(width, 768.0),
        };
        let Ok(mut background) = Background::new(BackgroundConfig::default(), &mut renderer) else {
            return;
        };
        group.throughput(Throughput::Elements(background.field().particles().len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            let mut frame = 0u64;
            b.iter(|| {
                frame += 1;
                let now = Duration::from_micros(frame * 16_666);
                let x = (frame % 1024) as f32;
                background.handle_input(&InputEvent::PointerMove(Vec2::new(x, 300.0)), now, &mut renderer);
                background.frame(now, &mut renderer);
            });
        });
    }

    group.finish();
}

fn benchmark_resize(c: &mut Criterion) {
    let mut renderer = NullRenderer {
        viewport: Viewport::new(1024.0, 768.0),
    };
    let Ok(mut background) = Background::new(BackgroundConfig::default(), &mut renderer) else {
        return;
    };

    c.bench_function("resize_rebuild", |b| {
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            renderer.viewport = Viewport::new(if wide { 1024.0 } else { 500.0 }, 768.0);
            background.resize(&mut renderer);
        });
    });
}

criterion_group!(
    benches,
    benchmark_step_particle,
    benchmark_background_frame,
    benchmark_resize
);
criterion_main!(benches);
