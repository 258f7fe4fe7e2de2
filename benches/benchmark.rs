use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rb_interval_tree::{Interval, IntervalTree};
use std::hint::black_box;

const SIZE: usize = 1000;
const MAX_BOUND: i32 = 100_000;
const MAX_LENGTH: i32 = 1_000;

fn create_intervals(rng: &mut StdRng, count: usize) -> Vec<Interval<i32>> {
    (0..count)
        .map(|_| {
            let low = rng.gen_range(0..MAX_BOUND);
            let high = low + rng.gen_range(0..=MAX_LENGTH);
            Interval::new(low, high).expect("low never exceeds high")
        })
        .collect()
}

fn scan<'a>(
    intervals: &'a [Interval<i32>],
    keep: impl Fn(&Interval<i32>) -> bool,
) -> Vec<&'a Interval<i32>> {
    intervals.iter().filter(|interval| keep(interval)).collect()
}

fn bench_mutations(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let intervals = create_intervals(&mut rng, SIZE);
    let mut shuffled = intervals.clone();
    shuffled.shuffle(&mut rng);

    let mut group = c.benchmark_group("mutations");
    group.throughput(Throughput::Elements(SIZE as u64));

    group.bench_function("vector/insert", |b| {
        b.iter(|| {
            let mut vector = Vec::new();
            for interval in &intervals {
                vector.push(*interval);
            }
            black_box(vector)
        })
    });
    group.bench_function("tree/insert", |b| {
        b.iter(|| {
            let mut tree = IntervalTree::new();
            for interval in &intervals {
                tree.insert(*interval);
            }
            black_box(tree)
        })
    });

    group.bench_function("vector/remove", |b| {
        b.iter_batched(
            || shuffled.clone(),
            |mut vector| {
                for interval in &intervals {
                    if let Some(index) = vector.iter().position(|i| i == interval) {
                        vector.remove(index);
                    }
                }
                vector
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("tree/remove", |b| {
        b.iter_batched(
            || intervals.iter().copied().collect::<IntervalTree<i32>>(),
            |mut tree| {
                for interval in &intervals {
                    tree.remove(interval);
                }
                tree
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xbe7c);
    let intervals = create_intervals(&mut rng, SIZE);
    let search_intervals = create_intervals(&mut rng, SIZE);
    let tree: IntervalTree<i32> = intervals.iter().copied().collect();

    let mut group = c.benchmark_group("queries");
    group.throughput(Throughput::Elements(SIZE as u64));

    group.bench_function("vector/overlapping", |b| {
        b.iter(|| {
            for query in &search_intervals {
                black_box(scan(&intervals, |i| i.low() <= query.high() && query.low() <= i.high()));
            }
        })
    });
    group.bench_function("tree/overlapping", |b| {
        b.iter(|| {
            for query in &search_intervals {
                black_box(tree.find_overlapping_intervals(query));
            }
        })
    });

    group.bench_function("vector/inner", |b| {
        b.iter(|| {
            for query in &search_intervals {
                black_box(scan(&intervals, |i| query.low() <= i.low() && i.high() <= query.high()));
            }
        })
    });
    group.bench_function("tree/inner", |b| {
        b.iter(|| {
            for query in &search_intervals {
                black_box(tree.find_inner_intervals(query));
            }
        })
    });

    group.bench_function("vector/outer", |b| {
        b.iter(|| {
            for query in &search_intervals {
                black_box(scan(&intervals, |i| i.low() <= query.low() && query.high() <= i.high()));
            }
        })
    });
    group.bench_function("tree/outer", |b| {
        b.iter(|| {
            for query in &search_intervals {
                black_box(tree.find_outer_intervals(query));
            }
        })
    });

    let points: Vec<i32> = (0..SIZE).map(|_| rng.gen_range(0..MAX_BOUND)).collect();
    group.bench_function("vector/contain_point", |b| {
        b.iter(|| {
            for point in &points {
                black_box(scan(&intervals, |i| i.low() <= point && point <= i.high()));
            }
        })
    });
    group.bench_function("tree/contain_point", |b| {
        b.iter(|| {
            for point in &points {
                black_box(tree.find_intervals_contain_point(point));
            }
        })
    });
    group.bench_function("tree/count_contain_point", |b| {
        b.iter(|| {
            for point in &points {
                black_box(tree.count_intervals_contain_point(point));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_mutations, bench_queries);
criterion_main!(benches);
