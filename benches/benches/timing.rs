// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_timing::{Debounce, TimerQueue};

fn bench_schedule_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/schedule_drain");
    for len in [64_usize, 1_024, 16_384] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                TimerQueue::<u32>::new,
                |mut queue| {
                    for i in 0..len as u64 {
                        // Spread deadlines so the heap is not already sorted.
                        queue.schedule((i * 7_919) % 10_007, 0);
                    }
                    while let Some(expired) = queue.pop_expired(u64::MAX) {
                        black_box(expired);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_debounce_retrigger(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/debounce");
    for triggers in [10_usize, 100, 1_000] {
        group.throughput(Throughput::Elements(triggers as u64));
        group.bench_with_input(
            BenchmarkId::new("retrigger", triggers),
            &triggers,
            |b, &triggers| {
                b.iter_batched(
                    || (TimerQueue::<()>::new(), Debounce::new(300)),
                    |(mut queue, mut debounce)| {
                        for now in 0..triggers as u64 {
                            debounce.trigger(&mut queue, now * 16, ());
                        }
                        let expired = queue.pop_expired(u64::MAX);
                        black_box(expired.map(|e| debounce.settle(e.id)));
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_schedule_and_drain, bench_debounce_retrigger);
criterion_main!(benches);
