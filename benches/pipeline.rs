//! Pipeline benchmark: events → window → features → score.

use access_anomaly::config::EngineConfig;
use access_anomaly::events::{Event, SimulatorConfig, TrafficSimulator};
use access_anomaly::features::EventWindow;
use access_anomaly::TrafficMonitor;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn simulated_events(seconds: usize) -> Vec<Event> {
    let mut sim = TrafficSimulator::new(
        SimulatorConfig {
            qps: 500,
            unique_ips: 2_000,
            burst: 5,
            ..SimulatorConfig::default()
        },
        7,
    );
    (0..seconds).flat_map(|_| sim.next_second()).collect()
}

fn bench_window_add(c: &mut Criterion) {
    let events = simulated_events(120);

    c.bench_function("window_add_60s", |b| {
        b.iter(|| {
            let mut window = EventWindow::new(60.0).unwrap();
            for e in &events {
                window.add(black_box(e.clone()));
            }
            black_box(window.len())
        })
    });
}

fn bench_features(c: &mut Criterion) {
    let mut window = EventWindow::new(60.0).unwrap();
    for e in simulated_events(60) {
        window.add(e);
    }

    c.bench_function("window_features_full", |b| b.iter(|| black_box(window.features())));
}

fn bench_full_pipeline(c: &mut Criterion) {
    let events = simulated_events(30);

    c.bench_function("monitor_observe_30s", |b| {
        b.iter(|| {
            let mut monitor = TrafficMonitor::new(EngineConfig::default()).unwrap();
            for e in &events {
                black_box(monitor.observe(e.clone()));
            }
        })
    });
}

criterion_group!(benches, bench_window_add, bench_features, bench_full_pipeline);
criterion_main!(benches);
