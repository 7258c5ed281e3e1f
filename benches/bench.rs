use avl::Map;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn insert_rand(c: &mut Criterion) {
    for n in [100u32, 1_000] {
        c.bench_function(&format!("insert_rand_{}", n), |b| {
            // setup
            let mut rng = StdRng::seed_from_u64(92);
            let mut map = Map::new();

            for _ in 0..n {
                let i = rng.gen::<u32>() % n;
                map.insert(i, i);
            }

            // measure
            b.iter(|| {
                let k = rng.gen::<u32>() % n;
                map.insert(k, k);
            });

            black_box(&map);
        });
    }
}

fn insert_seq(c: &mut Criterion) {
    for n in [100u32, 1_000] {
        c.bench_function(&format!("insert_seq_{}", n), |b| {
            // setup
            let mut map = Map::new();

            for i in 0..n {
                map.insert(i * 2, i * 2);
            }

            // measure
            let mut i = 1;
            b.iter(|| {
                map.insert(i, i);
                i = (i + 2) % n;
            });

            black_box(&map);
        });
    }
}

fn find_rand(c: &mut Criterion) {
    for n in [100u32, 1_000] {
        c.bench_function(&format!("find_rand_{}", n), |b| {
            // setup
            let mut rng = StdRng::seed_from_u64(92);
            let mut map = Map::new();
            let mut keys: Vec<u32> = (0..n).map(|_| rng.gen::<u32>() % n).collect();

            for &k in &keys {
                map.insert(k, k);
            }

            keys.shuffle(&mut rng);

            // measure
            let mut i = 0;
            b.iter(|| {
                let entry = map.get(&keys[i]);
                i = (i + 1) % keys.len();
                black_box(entry);
            });
        });
    }
}

fn find_seq(c: &mut Criterion) {
    for n in [100u32, 1_000] {
        c.bench_function(&format!("find_seq_{}", n), |b| {
            // setup
            let mut map = Map::new();

            for i in 0..n {
                map.insert(i, i);
            }

            // measure
            let mut i = 0;
            b.iter(|| {
                let entry = map.get(&i);
                i = (i + 1) % n;
                black_box(entry);
            });
        });
    }
}

fn iter(c: &mut Criterion) {
    for n in [100u32, 1_000] {
        c.bench_function(&format!("iter_{}", n), |b| {
            // setup
            let mut rng = StdRng::seed_from_u64(92);
            let mut map = Map::new();

            for _ in 0..n {
                map.insert(rng.gen::<u32>(), rng.gen::<u32>());
            }

            // measure
            b.iter(|| {
                for entry in map.iter() {
                    black_box(entry);
                }
            });
        });
    }
}

criterion_group!(benches, insert_rand, insert_seq, find_rand, find_seq, iter);
criterion_main!(benches);
