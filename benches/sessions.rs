use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use memberlogin::identity::SessionManager;

fn bench_sessions(c: &mut Criterion) {
    let ns = [1_000usize, 100_000usize];
    let mut group = c.benchmark_group("session_store");
    group.sample_size(20);

    for &n in &ns {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("create", n.to_string()), &n, |b, &n| {
            b.iter(|| {
                let sm: SessionManager<u64> = SessionManager::new();
                for i in 0..n as u64 { criterion::black_box(sm.create_session(i)); }
                criterion::black_box(&sm);
            });
        });

        // Build once for get/expire benchmarks
        let sm: SessionManager<u64> = SessionManager::new();
        let ids: Vec<String> = (0..n as u64).map(|i| sm.create_session(i)).collect();

        group.bench_with_input(BenchmarkId::new("get_hit", n.to_string()), &n, |b, _| {
            b.iter(|| {
                let mut sum = 0u64;
                for sid in &ids {
                    if let Some(v) = sm.get_session(Some(sid)) { sum ^= v; }
                }
                criterion::black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("get_miss", n.to_string()), &n, |b, &n| {
            b.iter(|| {
                for i in 0..n {
                    criterion::black_box(sm.get_session(Some(&format!("missing-{i}"))));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("create_expire", n.to_string()), &n, |b, &n| {
            b.iter(|| {
                let local: SessionManager<u64> = SessionManager::new();
                for i in 0..n as u64 {
                    let sid = local.create_session(i);
                    local.expire(Some(&sid));
                }
                criterion::black_box(local.is_empty());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sessions);
criterion_main!(benches);
