use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lrustore::{LruStore, SharedLruStore};

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for capacity in [100usize, 10_000, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut store = LruStore::new(capacity).unwrap();
                for k in 0..capacity as u64 {
                    store.put(k, k);
                }

                let mut counter = 0u64;
                b.iter(|| {
                    black_box(store.get(&(counter % capacity as u64)));
                    counter += 1;
                });
            },
        );
    }

    group.finish();
}

fn bench_put_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_evict");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_full_1k", |b| {
        let mut store = LruStore::new(1000).unwrap();
        for k in 0..1000u64 {
            store.put(k, vec![b'x'; 64]);
        }

        // Every put is a new key, so every put evicts
        let mut counter = 1000u64;
        b.iter(|| {
            black_box(store.put(counter, vec![b'x'; 64]));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write_shared", |b| {
        let store = SharedLruStore::new(1000).unwrap();
        for k in 0..1000u64 {
            store.put(k, k);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(store.get(&(counter % 2000)));
            } else {
                black_box(store.put(counter % 2000, counter));
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_put_evict, bench_mixed_50_50);
criterion_main!(benches);
