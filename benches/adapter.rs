//! Adapter throughput benchmarks
//!
//! Measures the adapter's forwarding overhead under both lock policies
//! against the system-backed reference resource.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use pooled_alloc::{LockTag, PoolAdapter, ResourceHandle, SystemResource, TagLock};

struct BenchTag;
impl LockTag for BenchTag {}

fn bench_alloc_dealloc(c: &mut Criterion) {
    let resource: &'static SystemResource =
        Box::leak(Box::new(SystemResource::new("bench-pool")));
    let handle = ResourceHandle::new(resource);

    let mut group = c.benchmark_group("alloc_dealloc_pair");
    group.throughput(Throughput::Elements(1));

    group.bench_function("no_lock", |b| {
        let adapter: PoolAdapter<u64> = PoolAdapter::new(handle);
        b.iter(|| unsafe {
            let ptr = adapter.allocate(black_box(64)).unwrap();
            adapter.deallocate(ptr, 64);
        });
    });

    group.bench_function("tag_lock", |b| {
        let adapter: PoolAdapter<u64, TagLock<BenchTag>> = PoolAdapter::new(handle);
        b.iter(|| unsafe {
            let ptr = adapter.allocate(black_box(64)).unwrap();
            adapter.deallocate(ptr, 64);
        });
    });

    group.finish();
}

fn bench_rebind_and_eq(c: &mut Criterion) {
    use pooled_alloc::Rebind;

    let resource: &'static SystemResource =
        Box::leak(Box::new(SystemResource::new("bench-rebind")));
    let adapter: PoolAdapter<u64> = PoolAdapter::new(ResourceHandle::new(resource));

    c.bench_function("rebind", |b| {
        b.iter(|| {
            let rebound: PoolAdapter<u8> = black_box(&adapter).rebind();
            black_box(rebound)
        });
    });

    c.bench_function("handle_equality", |b| {
        let other: PoolAdapter<u32> = adapter.rebind();
        b.iter(|| black_box(adapter == other));
    });
}

criterion_group!(benches, bench_alloc_dealloc, bench_rebind_and_eq);
criterion_main!(benches);
