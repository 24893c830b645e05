use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rshogi_analysis::TranspositionTable;
use rshogi_analysis::search::NodeStat;
use rshogi_analysis::types::{Move, Value};
use std::hint::black_box;

fn setup_filled_tt(size_mb: usize, rng: &mut Xoshiro256PlusPlus) -> TranspositionTable {
    let mut tt = TranspositionTable::new(size_mb);
    for _ in 0..10000 {
        let hash = rng.random::<u64>();
        let value = Value::new(rng.random_range(-1000..1000));
        let depth = rng.random_range(1..20);
        tt.entry(
            hash,
            -Value::INFINITE,
            Value::INFINITE,
            value,
            depth,
            0,
            NodeStat::default(),
            Move::NONE,
        );
    }
    tt
}

fn bench_tt_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("tt_probe");
    for size_mb in [1usize, 16] {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0xDEAD_BEEF_CAFE_BABE);
        let tt = setup_filled_tt(size_mb, &mut rng);
        let hashes: Vec<u64> = (0..1000).map(|_| rng.random::<u64>()).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size_mb), &hashes, |b, hashes| {
            let mut idx = 0;
            b.iter(|| {
                let hash = hashes[idx % hashes.len()];
                idx += 1;
                black_box(tt.get(black_box(hash)))
            })
        });
    }
    group.finish();
}

fn bench_tt_store_with_aging(c: &mut Criterion) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x1234_5678_9ABC_DEF0);
    let mut tt = setup_filled_tt(16, &mut rng);
    let hashes: Vec<(u64, i32)> =
        (0..4096).map(|_| (rng.random::<u64>(), rng.random_range(0..16))).collect();

    c.bench_function("tt_store_with_aging", |b| {
        let mut idx = 0;
        b.iter(|| {
            let (hash, depth) = hashes[idx % hashes.len()];
            idx += 1;
            if idx % 1024 == 0 {
                tt.evolve();
            }
            black_box(tt.entry(
                hash,
                Value::new(-50),
                Value::new(50),
                Value::new(depth),
                depth,
                0,
                NodeStat::default(),
                Move::NONE,
            ))
        })
    });
}

criterion_group!(benches, bench_tt_probe, bench_tt_store_with_aging);
criterion_main!(benches);
