/// Analyzer and insight generation benchmarks using Criterion
///
/// Run with: cargo bench --bench analyzer_benchmark
use std::sync::Arc;

use beacon_core::{
    EngineConfig, EventRecord, FixedClock, InsightGenerator, PatternAnalyzer, SequentialIds,
    WidgetFactory, WidgetRegistry,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const TYPES: [&str; 4] = ["click", "pageview", "signup", "purchase"];

fn make_events(count: usize) -> Vec<EventRecord> {
    (0..count)
        .map(|n| {
            let day = 1 + (n % 28);
            let hour = (n * 7) % 24;
            EventRecord::new(
                format!("evt_{}", n),
                format!("2024-02-{:02}T{:02}:{:02}:00Z", day, hour, n % 60),
                TYPES[n % TYPES.len()],
            )
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_analyzer");
    let analyzer = PatternAnalyzer::default();

    for event_count in [100usize, 1_000, 10_000].iter() {
        let events = make_events(*event_count);
        group.throughput(Throughput::Elements(*event_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(event_count), &events, |b, events| {
            b.iter(|| black_box(analyzer.analyze(black_box(events))));
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("insight_generator");
    let config = EngineConfig::default();
    let generator = InsightGenerator::new(
        Arc::new(WidgetRegistry::with_builtin_kinds()),
        Arc::new(WidgetFactory::with_effects(
            Arc::new(FixedClock::new(chrono::Utc::now())),
            Arc::new(SequentialIds::new("bench")),
        )),
        PatternAnalyzer::new(config.analysis.clone()),
        config.insights.clone(),
    );

    for event_count in [100usize, 1_000, 10_000].iter() {
        let events = make_events(*event_count);
        group.throughput(Throughput::Elements(*event_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(event_count), &events, |b, events| {
            b.iter(|| black_box(generator.generate(black_box(events))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_generate);
criterion_main!(benches);
