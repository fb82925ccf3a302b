/*!
 * Executor Benchmarks
 *
 * Compare inline and pooled submission paths
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatch_core::{AsyncExecutor, CallerThread, PoolConfig, ThreadPool};
use std::sync::Arc;

fn bench_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("submission");

    let inline = AsyncExecutor::with_spawner(Arc::new(CallerThread));
    group.bench_function("caller-thread", |b| {
        b.iter(|| {
            let result = inline.execute(|| Ok(black_box(1u64) + 1), None, None);
            result.end_value().unwrap()
        });
    });

    for workers in [1usize, 4] {
        let pool = Arc::new(ThreadPool::new(PoolConfig::with_workers(workers)).unwrap());
        let executor = AsyncExecutor::with_spawner(pool);
        group.bench_with_input(
            BenchmarkId::new("thread-pool", workers),
            &workers,
            |b, _| {
                b.iter(|| {
                    let result = executor.execute(|| Ok(black_box(1u64) + 1), None, None);
                    result.end_value().unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_dynamic_dispatch(c: &mut Criterion) {
    use dispatch_core::{value, DynamicInvoker, Handle};

    let invoker = DynamicInvoker::new(Handle::func2(|a: u64, b: u64| Ok(a + b)));
    c.bench_function("dynamic_invoke_2args", |b| {
        let args = [value(1u64), value(2u64)];
        b.iter(|| invoker.dynamic_invoke(black_box(&args)).unwrap());
    });
}

criterion_group!(benches, bench_submission, bench_dynamic_dispatch);
criterion_main!(benches);
