use criterion::{criterion_group, criterion_main, Criterion};

use ping_telemetry::metrics::{CounterMetric, EventMetric};
use ping_telemetry::{Builder, CommonMetricData};

fn criterion_benchmark(c: &mut Criterion) {
    let telemetry = Builder::new().with_timestamp(0).init().unwrap();

    let counter = CounterMetric::new(CommonMetricData {
        category: "bench".into(),
        name: "iterations".into(),
        send_in_pings: vec!["bench".into()],
        ..Default::default()
    });
    let event = EventMetric::new(
        CommonMetricData {
            category: "bench".into(),
            name: "tick".into(),
            send_in_pings: vec!["bench".into()],
            ..Default::default()
        },
        vec!["index".into()],
    );

    c.bench_function("counter_add_and_drain", |b| {
        b.iter(|| {
            counter.add(1);
            telemetry.block_on_dispatcher();
        })
    });

    c.bench_function("event_record_and_drain", |b| {
        b.iter(|| {
            event.record(vec![("index".to_string(), "1".to_string())]);
            telemetry.block_on_dispatcher();
        })
    });

    c.bench_function("collect", |b| {
        counter.add(1);
        b.iter(|| telemetry.collect("bench"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
