use chained_hashmap::ChainedHashMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
    c.bench_function("chained_hashmap_insert_10k", |b| {
        b.iter_batched(
            || (ChainedHashMap::<String, u64>::new(), keys.clone()),
            |(mut m, keys)| {
                for (i, k) in keys.into_iter().enumerate() {
                    m.insert(k, i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_overwrite(c: &mut Criterion) {
    c.bench_function("chained_hashmap_overwrite", |b| {
        let mut m = ChainedHashMap::new();
        let keys: Vec<_> = lcg(3).take(1_000).map(key).collect();
        for k in &keys {
            m.insert(k.clone(), 0u64);
        }
        let mut it = keys.iter().cycle();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            let k = it.next().unwrap().clone();
            black_box(m.insert(k, n));
        })
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_hashmap_get_hit", |b| {
        let m: ChainedHashMap<String, u64> = lcg(7)
            .take(20_000)
            .enumerate()
            .map(|(i, x)| (key(x), i as u64))
            .collect();
        let keys: Vec<_> = m.keys().cloned().collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_hashmap_get_miss", |b| {
        let m: ChainedHashMap<String, u64> = lcg(11)
            .take(10_000)
            .enumerate()
            .map(|(i, x)| (key(x), i as u64))
            .collect();
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(k.as_str()));
        })
    });
}

fn bench_insert_remove_churn(c: &mut Criterion) {
    c.bench_function("chained_hashmap_insert_remove", |b| {
        let mut m = ChainedHashMap::new();
        for x in lcg(13).take(5_000) {
            m.insert(x, x);
        }
        let mut fresh = lcg(0x5eed);
        b.iter(|| {
            let x = fresh.next().unwrap();
            m.insert(x, x);
            black_box(m.remove(&x));
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_overwrite, bench_get_hit, bench_get_miss, bench_insert_remove_churn
}
criterion_main!(benches);
