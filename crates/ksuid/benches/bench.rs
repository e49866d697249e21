use core::hint::black_box;
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use ksuid::{Generator, Ksuid, OsRandom, sort};
use rand::RngCore;

const TOTAL_IDS: usize = 4096;

fn random_ids(count: usize) -> Vec<Ksuid> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let mut bytes = [0_u8; 20];
            rng.fill_bytes(&mut bytes);
            Ksuid::from(bytes)
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let id = Ksuid::new();
    c.bench_function("encode", |b| b.iter(|| black_box(id.encoded())));
}

fn bench_parse(c: &mut Criterion) {
    let text = Ksuid::new().to_string();
    c.bench_function("parse", |b| {
        b.iter(|| black_box(Ksuid::parse(black_box(&text)).unwrap()));
    });
}

fn bench_next(c: &mut Criterion) {
    let id = Ksuid::new();
    c.bench_function("next", |b| b.iter(|| black_box(id.next())));
}

fn bench_generate(c: &mut Criterion) {
    let mut generator = Generator::new(Box::new(OsRandom));
    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate().unwrap());
            }
        });
    });
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let ids = random_ids(TOTAL_IDS);
    let mut group = c.benchmark_group("sort");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_batched(
            || ids.clone(),
            |mut ids| {
                sort(&mut ids);
                black_box(ids)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_parse,
    bench_next,
    bench_generate,
    bench_sort
);
criterion_main!(benches);
