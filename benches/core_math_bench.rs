use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::core::{
    AxisGeometry, AxisMapper, Calendar, MS_PER_DAY, MS_PER_HOUR, TickPlanner, Viewport,
};
use timeline_rs::render::NullRenderer;
use timeline_rs::{TimelineEngine, TimelineEngineConfig};

const NOW: i64 = 1_710_072_000_000;

fn bench_axis_round_trip(c: &mut Criterion) {
    let mut axis = AxisMapper::new(AxisGeometry::new(40.0, 1_880.0, 270.0), MS_PER_DAY as f64)
        .expect("valid axis");

    c.bench_function("axis_tick_round_trip", |b| {
        b.iter(|| {
            let window = axis.tick(black_box(NOW));
            let time = window.x_to_time(black_box(1_234.5));
            let _ = window.time_to_x(time);
        })
    });
}

fn bench_plan_day_view(c: &mut Criterion) {
    let calendar = Calendar::utc();
    let planner = TickPlanner::default();
    let mut axis = AxisMapper::new(
        AxisGeometry::new(40.0, 1_880.0, 270.0),
        120.0 * MS_PER_DAY as f64,
    )
    .expect("valid axis");
    let window = axis.tick(NOW);

    c.bench_function("tick_plan_day_view", |b| {
        b.iter(|| {
            let _ = planner.plan(black_box(window), &calendar);
        })
    });
}

fn bench_plan_hour_view(c: &mut Criterion) {
    let calendar = Calendar::utc();
    let planner = TickPlanner::default();
    let mut axis = AxisMapper::new(
        AxisGeometry::new(40.0, 1_880.0, 270.0),
        2.0 * MS_PER_HOUR as f64,
    )
    .expect("valid axis");
    let window = axis.tick(NOW);

    c.bench_function("tick_plan_hour_view", |b| {
        b.iter(|| {
            let _ = planner.plan(black_box(window), &calendar);
        })
    });
}

fn bench_engine_render(c: &mut Criterion) {
    let config = TimelineEngineConfig::new(Viewport::new(1_920, 400)).with_initial_control(60.0);
    let mut engine = TimelineEngine::with_timezone(NullRenderer::default(), config, Utc)
        .expect("engine init");

    c.bench_function("engine_render_frame", |b| {
        b.iter(|| {
            let _ = engine
                .render(black_box(NOW))
                .expect("render should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_axis_round_trip,
    bench_plan_day_view,
    bench_plan_hour_view,
    bench_engine_render
);
criterion_main!(benches);
