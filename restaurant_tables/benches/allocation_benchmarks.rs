use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use restaurant_tables::{
    AllocationCoordinator, CustomerId, InMemoryReservationBook, TableRegistry, TableStatus,
    TimeSlot,
};
use std::hint::black_box;

/// Helper to create a registry of `n` tables spread over five sizes
fn setup_registry(n: usize) -> TableRegistry {
    let mut registry = TableRegistry::new();
    for i in 0..n {
        let pax = ((i % 5) as u32 + 1) * 2;
        registry.add_table(format!("T{:05}", i), pax).unwrap();
    }
    registry
}

/// Benchmark a walk-in followed by unseating on floors of growing size
fn bench_seat_and_unseat(c: &mut Criterion) {
    let mut group = c.benchmark_group("seat_and_unseat");

    for n in [8, 64, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut registry = setup_registry(n);
            b.iter(|| {
                let id = registry.seat_walk_in(black_box(10)).unwrap();
                registry.unseat(&id).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark a guarded transition that finds nothing (full scan)
fn bench_transition_miss(c: &mut Criterion) {
    let mut registry = setup_registry(512);
    c.bench_function("transition_miss_512", |b| {
        b.iter(|| {
            black_box(registry.transition(
                black_box(10),
                TableStatus::Reserved,
                TableStatus::Occupied,
            ))
        });
    });
}

/// Benchmark a promotion sweep over a busy hour
fn bench_sweep_promote(c: &mut Criterion) {
    let seven_pm = NaiveDate::from_ymd_opt(2021, 11, 7)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap();
    let slot = TimeSlot::containing(seven_pm);

    c.bench_function("sweep_promote_100", |b| {
        b.iter_batched(
            || {
                let mut coordinator: AllocationCoordinator<InMemoryReservationBook> =
                    AllocationCoordinator::new(setup_registry(500), InMemoryReservationBook::new());
                for i in 0..100 {
                    coordinator
                        .add_reservation(4, CustomerId::new(format!("guest{}", i)), slot)
                        .unwrap();
                }
                coordinator
            },
            |mut coordinator| black_box(coordinator.sweep_promote(seven_pm)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_seat_and_unseat,
    bench_transition_miss,
    bench_sweep_promote
);
criterion_main!(benches);
