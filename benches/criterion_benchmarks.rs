use criterion::{black_box, criterion_group, criterion_main, Criterion};
use policy_cache::store::Memory;
use policy_cache::{Cache, CachePolicy, PolicyKind};

const CACHE_SIZE: usize = 1000;
const MEMORY_WORDS: usize = CACHE_SIZE * 4;

fn make_cache(kind: PolicyKind, cap: usize) -> Cache<usize, Memory<u64>> {
    let memory = Memory::new((0..MEMORY_WORDS as u64).collect());
    let mut cache = Cache::new(kind, cap, memory);
    for i in 0..cap {
        let _ = cache.lookup(&i);
    }
    cache
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cache Operations");

    for &kind in PolicyKind::all() {
        // Cyclic scans every slot, so it gets a smaller cache to keep runs short.
        let cap = if kind == PolicyKind::Cyclic {
            CACHE_SIZE / 10
        } else {
            CACHE_SIZE
        };

        {
            let mut cache = make_cache(kind, cap);
            group.bench_function(format!("{kind} lookup hit"), |b| {
                b.iter(|| {
                    for i in 0..100 {
                        let _ = black_box(cache.lookup(&(i % cap)));
                    }
                });
            });
        }

        {
            let mut cache = make_cache(kind, cap);
            let mut next = cap;
            group.bench_function(format!("{kind} lookup miss"), |b| {
                b.iter(|| {
                    for _ in 0..100 {
                        let _ = black_box(cache.lookup(&next));
                        next = (next + 1) % MEMORY_WORDS;
                    }
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
