//! Selection engine benchmarks

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use raffle_core::{DrawRequest, ParticipantList, parse, select};

const LIST_SIZES: &[usize] = &[10, 1_000, 100_000];

fn participants(count: usize) -> ParticipantList {
    let raw: String = (0..count).map(|i| format!("participant-{:06}\n", i)).collect();
    parse(&raw)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for &size in LIST_SIZES {
        let raw: String = (0..size).map(|i| format!("  id-{}  \n\n", i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| black_box(parse(raw)))
        });
    }

    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let mut rng = StdRng::seed_from_u64(42);

    for &size in LIST_SIZES {
        let list = participants(size);
        let request = DrawRequest::new(3.min(size), 2.min(size - 3.min(size)));

        group.bench_with_input(BenchmarkId::new("few_picks", size), &list, |b, list| {
            b.iter(|| black_box(select(list, request, &mut rng)))
        });

        group.bench_with_input(BenchmarkId::new("full_order", size), &list, |b, list| {
            b.iter(|| black_box(select(list, DrawRequest::new(size, 0), &mut rng)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_select);
criterion_main!(benches);
