//! Criterion benchmarks for plugin_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use plugin_logger::prelude::*;
use std::sync::Arc;

// ============================================================================
// Routing Benchmarks
// ============================================================================

fn router() -> Arc<PluginLogger> {
    let host = Arc::new(Logger::new("bench"));
    Arc::new(PluginLogger::init(host))
}

fn bench_main_thread_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("main_thread");
    group.throughput(Throughput::Elements(1));

    let logger = router();

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message"), &[]));
    });

    group.bench_function("info_with_args", |b| {
        b.iter(|| logger.info(black_box("Loaded {0} maps"), &[&black_box(42)]));
    });

    group.finish();
}

fn bench_caller_thread_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("caller_thread");
    group.throughput(Throughput::Elements(1));

    // Built on a helper thread so the benchmark thread routes through a caller sink
    let logger = std::thread::spawn(router).join().unwrap();
    logger.info("warm up registry", &[]);

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message"), &[]));
    });

    group.finish();
}

// ============================================================================
// Debug Gate Benchmarks
// ============================================================================

fn bench_debug_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("debug_gate");

    let logger = router();
    let plugin = PluginDescriptor::new("bench", "/unused").with_debug_level(DebugLevel::UserLog);

    group.bench_function("should_emit", |b| {
        b.iter(|| should_emit(black_box(DebugLevel::SystemLog), black_box(DebugLevel::DeveloperLog)));
    });

    group.bench_function("debug_suppressed", |b| {
        b.iter(|| logger.debug(&plugin, black_box(DebugLevel::SystemLog), "hidden", &[]));
    });

    group.bench_function("debug_emitted", |b| {
        b.iter(|| logger.debug(&plugin, black_box(DebugLevel::UserLog), "shown", &[]));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_main_thread_routing,
    bench_caller_thread_routing,
    bench_debug_gate
);
criterion_main!(benches);
