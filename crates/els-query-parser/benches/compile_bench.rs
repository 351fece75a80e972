use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use els_query_parser::{PatternFlags, compile};

fn bench_compile_simple(c: &mut Criterion) {
    let flags = PatternFlags::default();

    c.bench_function("compile_literal", |b| {
        b.iter(|| compile(black_box("merhaba"), flags));
    });

    c.bench_function("compile_wildcard", |b| {
        b.iter(|| compile(black_box("mer*ba"), flags));
    });

    c.bench_function("compile_quoted_phrase", |b| {
        b.iter(|| compile(black_box("\"hello world\""), flags));
    });
}

fn bench_compile_folding(c: &mut Criterion) {
    let flags = PatternFlags {
        normalize_chars: true,
        ..PatternFlags::default()
    };

    c.bench_function("compile_folded_turkish", |b| {
        b.iter(|| compile(black_box("dünya güzel"), flags));
    });

    c.bench_function("compile_folded_ascii", |b| {
        b.iter(|| compile(black_box("dunya guzel"), flags));
    });
}

fn bench_compile_realistic_queries(c: &mut Criterion) {
    let flags = PatternFlags {
        normalize_chars: true,
        ..PatternFlags::default()
    };

    let queries = [
        "ekşi",
        "entry",
        "mer*ba",
        "a?b?c",
        "foo|bar|baz",
        "\"tam ifade\" ek",
        "çok uzun bir sorgu *metni* içinde|yahut",
    ];

    let mut group = c.benchmark_group("realistic_queries");
    for query in queries.iter() {
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, q| {
            b.iter(|| compile(black_box(q), flags));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compile_simple,
    bench_compile_folding,
    bench_compile_realistic_queries
);
criterion_main!(benches);
