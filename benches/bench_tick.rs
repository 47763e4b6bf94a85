use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lane_traffic_sim::simulation::{SimConfig, SimWorld};

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_default_road", |b| {
        let mut world = SimWorld::new_with_seed(SimConfig::default(), 1).unwrap();
        b.iter(|| {
            world.tick();
            black_box(world.vehicles().len());
        })
    });

    c.bench_function("tick_crowded_road", |b| {
        let config = SimConfig {
            lane_count: 6,
            road_length: 5000.0,
            target_vehicle_count: 240,
            ..SimConfig::default()
        };
        let mut world = SimWorld::new_with_seed(config, 1).unwrap();
        b.iter(|| {
            world.tick();
            black_box(world.snapshot());
        })
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
