use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::sync::Arc;
use tenure_di::*;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let container = Container::new();
    container.register_singleton(42u64).unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.resolve::<u64>(None).unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = Container::with_config(ContainerConfig::default().with_warn_on_undisposed(false));
                container
                    .register_factory::<ExpensiveToCreate, _>(Lifetime::Singleton, |_| {
                        Ok(ExpensiveToCreate {
                            data: (0..1000).collect(),
                        })
                    })
                    .unwrap();
                container
            },
            |container| {
                let v = container.resolve::<ExpensiveToCreate>(None).unwrap();
                black_box(v.data.len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_scoped_vs_transient(c: &mut Criterion) {
    struct Service {
        data: [u8; 64],
    }

    let mut group = c.benchmark_group("scoped_vs_transient");

    let scoped = Container::new();
    scoped
        .register_factory::<Service, _>(Lifetime::Scoped, |_| Ok(Service { data: [0; 64] }))
        .unwrap();
    let scope = scoped.create_scope().unwrap();

    group.bench_function("scoped_hit", |b| {
        b.iter(|| {
            let v = scoped.resolve::<Service>(Some(scope)).unwrap();
            black_box(&v.data);
        })
    });

    let transient = Container::new();
    transient
        .register_factory::<Service, _>(Lifetime::Transient, |_| Ok(Service { data: [0; 64] }))
        .unwrap();

    group.bench_function("transient", |b| {
        b.iter(|| {
            let v = transient.resolve::<Service>(None).unwrap();
            black_box(&v.data);
        })
    });

    group.finish();
}

fn bench_concrete_vs_trait(c: &mut Criterion) {
    trait ValueSource: Send + Sync {
        fn value(&self) -> u64;
    }

    struct Fixed(u64);

    impl ValueSource for Fixed {
        fn value(&self) -> u64 {
            self.0
        }
    }

    let mut group = c.benchmark_group("concrete_vs_trait");

    let container = Container::new();
    container.register_singleton(Fixed(7)).unwrap();
    container
        .register_singleton_trait(Arc::new(Fixed(7)) as Arc<dyn ValueSource>)
        .unwrap();

    group.bench_function("concrete", |b| {
        b.iter(|| black_box(container.resolve::<Fixed>(None).unwrap().0))
    });
    group.bench_function("trait_object", |b| {
        b.iter(|| black_box(container.resolve_trait::<dyn ValueSource>(None).unwrap().value()))
    });

    group.finish();
}

fn bench_scope_lifecycle(c: &mut Criterion) {
    struct ScopedService {
        data: Vec<u8>,
    }

    struct DisposableService {
        data: Vec<u8>,
    }

    impl Dispose for DisposableService {
        fn dispose(&self) -> DisposeResult {
            black_box(&self.data);
            Ok(())
        }
    }

    let mut group = c.benchmark_group("scope_lifecycle");

    let empty = Container::new();
    group.bench_function("empty_scope_create_dispose", |b| {
        b.iter(|| {
            let scope = empty.create_scope().unwrap();
            black_box(empty.dispose_scope(scope));
        })
    });

    let with_service = Container::new();
    with_service
        .register_factory::<ScopedService, _>(Lifetime::Scoped, |_| {
            Ok(ScopedService { data: vec![0; 1024] })
        })
        .unwrap();
    group.bench_function("scope_with_service", |b| {
        b.iter(|| {
            let scope = with_service.scope().unwrap();
            let service = scope.get::<ScopedService>().unwrap();
            black_box(service.data.len());
        })
    });

    let disposable = Container::new();
    disposable
        .register_disposable_factory::<DisposableService, _>(Lifetime::Transient, |_| {
            Ok(DisposableService { data: vec![0; 1024] })
        })
        .unwrap();
    group.bench_function("scope_with_10_disposers", |b| {
        b.iter(|| {
            let scope = disposable.scope().unwrap();
            for _ in 0..10 {
                black_box(scope.get::<DisposableService>().unwrap());
            }
            black_box(scope.dispose().attempted);
        })
    });

    group.finish();
}

fn bench_circular_detection_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circular_detection");

    // Non-circular chain of depth 8, rebuilt on every resolution
    struct Service1;
    struct Service2 { _s1: Arc<Service1> }
    struct Service3 { _s2: Arc<Service2> }
    struct Service4 { _s3: Arc<Service3> }
    struct Service5 { _s4: Arc<Service4> }
    struct Service6 { _s5: Arc<Service5> }
    struct Service7 { _s6: Arc<Service6> }
    struct Service8 { _s7: Arc<Service7> }

    let container = Container::new();
    let t = Lifetime::Transient;
    container.register_factory::<Service1, _>(t, |_| Ok(Service1)).unwrap();
    container.register_factory::<Service2, _>(t, |r| Ok(Service2 { _s1: r.get()? })).unwrap();
    container.register_factory::<Service3, _>(t, |r| Ok(Service3 { _s2: r.get()? })).unwrap();
    container.register_factory::<Service4, _>(t, |r| Ok(Service4 { _s3: r.get()? })).unwrap();
    container.register_factory::<Service5, _>(t, |r| Ok(Service5 { _s4: r.get()? })).unwrap();
    container.register_factory::<Service6, _>(t, |r| Ok(Service6 { _s5: r.get()? })).unwrap();
    container.register_factory::<Service7, _>(t, |r| Ok(Service7 { _s6: r.get()? })).unwrap();
    container.register_factory::<Service8, _>(t, |r| Ok(Service8 { _s7: r.get()? })).unwrap();

    group.bench_function("transient_chain_depth_8", |b| {
        b.iter(|| {
            let service = container.resolve::<Service8>(None).unwrap();
            black_box(&service);
        })
    });

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    let container = Container::new();
    container.register_singleton(42u64).unwrap();

    for &thread_count in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("singleton_threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let start = std::time::Instant::now();
                    crossbeam_utils::thread::scope(|s| {
                        for _ in 0..threads {
                            let container = &container;
                            s.spawn(move |_| {
                                for _ in 0..iters / threads as u64 {
                                    let v = container.resolve::<u64>(None).unwrap();
                                    black_box(v);
                                }
                            });
                        }
                    })
                    .unwrap();
                    start.elapsed()
                })
            },
        );
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_large_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_registry");

    const NAMES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

    for &filler in &[1usize, 4, 8] {
        let container = Container::new();
        container.register_singleton(42u64).unwrap();
        for name in NAMES.iter().take(filler) {
            container.register_named_singleton(*name, 0u32).unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("resolve_from_registry", filler + 1),
            &filler,
            |b, _| {
                b.iter(|| {
                    let v = container.resolve::<u64>(None).unwrap();
                    black_box(v);
                })
            },
        );
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    // 70% singleton hits, 20% scoped hits, 10% transient
    struct SingletonService(u64);
    struct ScopedService(u64);
    struct TransientService(u64);

    let container = Container::new();
    container.register_singleton(SingletonService(1)).unwrap();
    container
        .register_factory::<ScopedService, _>(Lifetime::Scoped, |_| Ok(ScopedService(2)))
        .unwrap();
    container
        .register_factory::<TransientService, _>(Lifetime::Transient, |_| Ok(TransientService(3)))
        .unwrap();
    let scope = container.create_scope().unwrap();

    c.bench_function("mixed_workload_realistic", |b| {
        b.iter(|| {
            for _ in 0..7 {
                let v = container.resolve::<SingletonService>(None).unwrap();
                black_box(v.0);
            }

            for _ in 0..2 {
                let v = container.resolve::<ScopedService>(Some(scope)).unwrap();
                black_box(v.0);
            }

            let v = container.resolve::<TransientService>(None).unwrap();
            black_box(v.0);
        })
    });
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_scoped_vs_transient,
    bench_concrete_vs_trait,
    bench_scope_lifecycle,
    bench_circular_detection_depth,
    bench_contention
);

criterion_group!(macro_benches, bench_large_registry, bench_mixed_workload);

criterion_main!(micro_benches, macro_benches);
