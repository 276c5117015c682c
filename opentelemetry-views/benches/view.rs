use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use opentelemetry_views::metrics::{
    new_view, Aggregation, CriteriaView, Instrument, InstrumentKind, Stream, StreamResolver, View,
};
use opentelemetry_views_api::{InstrumentationScope, Key};

const HTTP_METHOD: Key = Key::from_static_str("http.method");

fn instrument(name: &'static str) -> Instrument {
    Instrument::new()
        .name(name)
        .kind(InstrumentKind::Counter)
        .unit("By")
        .scope(InstrumentationScope::builder("bench").build())
}

fn views(c: &mut Criterion) {
    let mut group = c.benchmark_group("View");
    let hit = instrument("http.server.request.size");
    let miss = instrument("db.client.connections");

    let exact = CriteriaView::new(
        Instrument::new().name("http.server.request.size"),
        Stream::new().name("request.size"),
    )
    .unwrap();
    group.bench_function("ExactHit", |b| b.iter(|| exact.evaluate(&hit)));
    group.bench_function("ExactMiss", |b| b.iter(|| exact.evaluate(&miss)));

    let wildcard = CriteriaView::new(
        Instrument::new().name("http.*.request.?ize"),
        Stream::new().allowed_attribute_keys([HTTP_METHOD]),
    )
    .unwrap();
    group.bench_function("WildcardHit", |b| b.iter(|| wildcard.evaluate(&hit)));
    group.bench_function("WildcardMiss", |b| b.iter(|| wildcard.evaluate(&miss)));

    let aggregated = CriteriaView::new(
        Instrument::new().kind(InstrumentKind::Counter),
        Stream::new().aggregation(Aggregation::ExplicitBucketHistogram {
            boundaries: vec![0.0, 1024.0, 4096.0, 16384.0],
            record_min_max: false,
        }),
    )
    .unwrap();
    group.bench_function("ValidatedAggregation", |b| {
        b.iter(|| aggregated.evaluate(&hit))
    });
}

fn resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("StreamResolver");
    let views: Vec<Arc<dyn View>> = (0..10)
        .map(|i| -> Arc<dyn View> {
            new_view(
                Instrument::new().name(format!("svc{i}.*")),
                Stream::new().name(format!("renamed{i}")),
            )
            .unwrap()
            .into()
        })
        .collect();
    let resolver = StreamResolver::new(views);

    let matched = instrument("svc7.requests");
    group.bench_function("OneOfTen", |b| b.iter(|| resolver.resolve(&matched)));
    let fallback = instrument("other.requests");
    group.bench_function("Fallback", |b| b.iter(|| resolver.resolve(&fallback)));
}

criterion_group!(benches, views, resolver);
criterion_main!(benches);
