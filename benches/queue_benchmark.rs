use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use incidex::{Ascending, PriorityQueue};
use rand::Rng;

/// Benchmark enqueue followed by draining the whole queue
fn bench_enqueue_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue_drain");

    for size in [100, 1_000, 10_000].iter() {
        let mut rng = rand::thread_rng();
        let priorities: Vec<u32> = (0..*size).map(|_| rng.gen_range(1..=5)).collect();

        group.bench_with_input(BenchmarkId::new("unstable", size), &priorities, |b, priorities| {
            b.iter(|| {
                let mut queue = PriorityQueue::with_capacity(priorities.len(), Ascending);
                for (id, p) in priorities.iter().enumerate() {
                    queue.enqueue(id, *p);
                }
                black_box(queue.into_sorted_vec());
            });
        });
        group.bench_with_input(BenchmarkId::new("stable", size), &priorities, |b, priorities| {
            b.iter(|| {
                let mut queue = PriorityQueue::stable(Ascending);
                for (id, p) in priorities.iter().enumerate() {
                    queue.enqueue(id, *p);
                }
                black_box(queue.into_sorted_vec());
            });
        });
    }

    group.finish();
}

/// Benchmark the linear-scan priority change
fn bench_change_priority(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut queue: PriorityQueue<usize, u32> = (0..1_000).map(|id| (id, rng.gen_range(1..=5))).collect();

    c.bench_function("change_priority_1000", |b| {
        b.iter(|| {
            let target = rng.gen_range(0..1_000);
            let priority = rng.gen_range(1..=5);
            black_box(queue.change_priority(|id| *id == target, priority));
        });
    });
}

criterion_group!(benches, bench_enqueue_drain, bench_change_priority);
criterion_main!(benches);
