//! Exposition Benchmarks — Scrape-path Cost
//!
//! Benchmarks counter increment and full text exposition rendering,
//! the two operations on the request path.
//!
//! Run with: cargo bench --bench exposition_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use k8s_demo_service::metrics::MetricsRegistry;

/// Benchmark a single counter increment (per /my-app hit).
fn bench_increment(c: &mut Criterion) {
    let metrics = MetricsRegistry::new().unwrap();

    c.bench_function("root_access_increment", |b| {
        b.iter(|| {
            metrics.record_root_access();
            black_box(metrics.root_access_count());
        });
    });
}

/// Benchmark a full scrape render including process-collector sampling.
fn bench_render(c: &mut Criterion) {
    let metrics = MetricsRegistry::new().unwrap();
    metrics.record_root_access();

    c.bench_function("exposition_render", |b| {
        b.iter(|| {
            let body = metrics.render().unwrap();
            black_box(body.len());
        });
    });
}

criterion_group!(benches, bench_increment, bench_render);
criterion_main!(benches);
