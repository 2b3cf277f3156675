//! Criterion benchmarks for logbridge

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logbridge::facade::thread_context;
use logbridge::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Level Translation Benchmarks
// ============================================================================

fn bench_level_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_translation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("translator_creation", |b| {
        b.iter(|| {
            let translator = LevelTranslator::new();
            black_box(translator)
        });
    });

    let translator = LevelTranslator::global();

    group.bench_function("severity_to_backend", |b| {
        b.iter(|| {
            let level = translator.to_backend(black_box(Some(Severity::Info)));
            black_box(level)
        });
    });

    group.bench_function("backend_to_severity", |b| {
        b.iter(|| {
            let severity = translator.to_facade(black_box(Some(BackendLevel::INFO)));
            black_box(severity)
        });
    });

    group.bench_function("floor_known_rank", |b| {
        b.iter(|| {
            let severity = translator.facade_for_rank(black_box(800));
            black_box(severity)
        });
    });

    // Falls between INFO and WARN, so this exercises the memoized floor path.
    group.bench_function("floor_custom_rank", |b| {
        b.iter(|| {
            let severity = translator.facade_for_rank(black_box(850));
            black_box(severity)
        });
    });

    group.finish();
}

// ============================================================================
// Context Resolution Benchmarks
// ============================================================================

fn bench_context_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_resolution");
    group.throughput(Throughput::Elements(1));

    let registry = ContextRegistry::new(
        Arc::new(NamespaceStore::new()),
        Arc::new(StatusBus::new()),
    );
    let key = ContextKey::new("bench");

    group.bench_function("default_context_hit", |b| {
        b.iter(|| {
            let context = registry.get_context(None, None, false);
            black_box(context)
        });
    });

    group.bench_function("keyed_context_hit", |b| {
        b.iter(|| {
            let context = registry.get_context(None, Some(black_box(&key)), false);
            black_box(context)
        });
    });

    let context = registry.get_context(None, None, false);

    group.bench_function("logger_cache_hit", |b| {
        b.iter(|| {
            let logger = context.get_logger(black_box("bench.app"));
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Enablement Benchmarks
// ============================================================================

fn bench_enablement(c: &mut Criterion) {
    let mut group = c.benchmark_group("enablement");
    group.throughput(Throughput::Elements(1));

    let registry = ContextRegistry::new(
        Arc::new(NamespaceStore::new()),
        Arc::new(StatusBus::new()),
    );
    let context = registry.get_context(None, None, false);
    let logger = context.get_logger("bench.app");

    // The root defaults to INFO, so DEBUG is filtered and ERROR passes.
    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            let enabled = logger.is_enabled(black_box(Severity::Debug));
            black_box(enabled)
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            let enabled = logger.is_enabled(black_box(Severity::Error));
            black_box(enabled)
        });
    });

    group.finish();
}

// ============================================================================
// Record Creation Benchmarks
// ============================================================================

fn bench_record_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                black_box(BackendLevel::INFO),
                black_box("Benchmark message"),
                black_box("bench.app"),
            );
            black_box(record)
        });
    });

    group.bench_function("with_diagnostics", |b| {
        b.iter(|| {
            let mut mdc = HashMap::new();
            mdc.insert("user".to_string(), "bench".to_string());
            let record = LogRecord::new(
                black_box(BackendLevel::INFO),
                black_box("Benchmark message"),
                black_box("bench.app"),
            )
            .with_mdc(mdc)
            .with_ndc(black_box("request-1".to_string()));
            black_box(record)
        });
    });

    group.bench_function("sanitized", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                black_box(BackendLevel::INFO),
                black_box("line one\nline two\r\ttabbed"),
                black_box("bench.app"),
            );
            black_box(record)
        });
    });

    group.finish();
}

// ============================================================================
// Record Emission Benchmarks
// ============================================================================

fn bench_record_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_emission");
    group.throughput(Throughput::Elements(1));

    let registry = ContextRegistry::new(
        Arc::new(NamespaceStore::new()),
        Arc::new(StatusBus::new()),
    );
    let root = registry.store().default_namespace().root();
    root.add_handler(Arc::new(MemoryHandler::with_capacity(1024)));

    let context = registry.get_context(None, None, false);
    let logger = context.get_logger("bench.app");

    group.bench_function("error_to_memory_sink", |b| {
        b.iter(|| {
            logger.error(black_box("Benchmark error message"));
        });
    });

    group.bench_function("filtered_debug", |b| {
        b.iter(|| {
            logger.debug(black_box("Benchmark debug message"));
        });
    });

    group.finish();
}

// ============================================================================
// Serialization Benchmarks
// ============================================================================

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    group.throughput(Throughput::Elements(1));

    let mut mdc = HashMap::new();
    mdc.insert("user".to_string(), "bench".to_string());
    let record = LogRecord::new(BackendLevel::INFO, "Benchmark message", "bench.app")
        .with_mdc(mdc)
        .with_ndc("request-1".to_string());

    group.bench_function("to_json", |b| {
        b.iter(|| {
            let json = serde_json::to_string(&record).unwrap();
            black_box(json)
        });
    });

    group.bench_function("to_json_pretty", |b| {
        b.iter(|| {
            let json = serde_json::to_string_pretty(&record).unwrap();
            black_box(json)
        });
    });

    group.finish();
}

// ============================================================================
// Thread Context Benchmarks
// ============================================================================

fn bench_thread_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_context");
    group.throughput(Throughput::Elements(1));

    // Route the facade thread-context API through the backend MDC adapter.
    BridgeProvider::install();

    group.bench_function("map_put_remove", |b| {
        b.iter(|| {
            thread_context::put(black_box("bench-key"), black_box("bench-value"));
            thread_context::remove(black_box("bench-key"));
        });
    });

    thread_context::put("bench-key", "bench-value");

    group.bench_function("map_get", |b| {
        b.iter(|| {
            let value = thread_context::get(black_box("bench-key"));
            black_box(value)
        });
    });

    thread_context::remove("bench-key");

    group.bench_function("stack_push_pop", |b| {
        b.iter(|| {
            thread_context::push(black_box("frame"));
            let frame = thread_context::pop();
            black_box(frame)
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_level_translation,
    bench_context_resolution,
    bench_enablement,
    bench_record_creation,
    bench_record_emission,
    bench_serialization,
    bench_thread_context
);

criterion_main!(benches);
