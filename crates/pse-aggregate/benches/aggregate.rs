use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pse_aggregate::AssessmentTaskAggregator;
use pse_test_utils::{large_assessment, reference_config};

fn bench_summarize(c: &mut Criterion) {
    let config = reference_config();
    let aggregator = AssessmentTaskAggregator::new(&config);
    let mut group = c.benchmark_group("summarize");

    for (sections, items) in [(4, 10), (20, 50), (40, 250)] {
        let assessment = large_assessment(sections, items);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections * items),
            &assessment,
            |b, assessment| b.iter(|| aggregator.summarize(black_box(assessment))),
        );
    }
    group.finish();
}

fn bench_gantt(c: &mut Criterion) {
    let config = reference_config();
    let aggregator = AssessmentTaskAggregator::new(&config);
    let assessment = large_assessment(20, 50);

    c.bench_function("gantt_tasks_1000_items", |b| {
        b.iter(|| aggregator.get_gantt_tasks(black_box(&assessment)));
    });
}

criterion_group!(benches, bench_summarize, bench_gantt);
criterion_main!(benches);
