use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use newsproof_crypto::fingerprint_text;
use newsproof_ledger::{EventKind, EventNotifier, GenesisConfig, Ledger};
use newsproof_nullables::{NullClock, NullStore};
use newsproof_store_lmdb::LmdbEnvironment;
use newsproof_types::{ContentHash, Identity};

fn id(s: &str) -> Identity {
    Identity::parse(s).unwrap()
}

fn genesis() -> GenesisConfig {
    GenesisConfig::new(id("admin"))
        .with_moderator(id("moderator"))
        .with_oracle(id("oracle"))
}

fn memory_ledger(subscribers: usize) -> Ledger<NullStore> {
    let notifier = EventNotifier::new();
    for _ in 0..subscribers {
        notifier.subscribe(EventKind::InformationSubmitted, |e| {
            black_box(e);
        });
    }
    Ledger::create(NullStore::new(), &genesis(), notifier, Arc::new(NullClock::new(0))).unwrap()
}

fn bench_submit_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_memory");
    let caller = id("user1");

    for subscribers in [0, 1, 8] {
        let ledger = memory_ledger(subscribers);
        let hash = ContentHash::new([7u8; 32]);
        group.bench_with_input(
            BenchmarkId::new("subscribers", subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| ledger.submit(black_box(&caller), hash, "src", 50).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_submit_lmdb(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open(dir.path(), 1024 * 1024 * 1024).unwrap();
    let ledger = Ledger::create(env, &genesis(), EventNotifier::new(), Arc::new(NullClock::new(0)))
        .unwrap();
    let caller = id("user1");
    let hash = fingerprint_text("benchmark story");

    c.bench_function("submit_lmdb", |b| {
        b.iter(|| ledger.submit(black_box(&caller), hash, "src", 50).unwrap())
    });
}

fn bench_get_lmdb(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open(dir.path(), 256 * 1024 * 1024).unwrap();
    let ledger = Ledger::create(env, &genesis(), EventNotifier::new(), Arc::new(NullClock::new(0)))
        .unwrap();
    let caller = id("user1");
    for i in 0..1_000u32 {
        ledger
            .submit(&caller, fingerprint_text(&format!("story {i}")), "src", 50)
            .unwrap();
    }

    c.bench_function("get_lmdb_1000", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) % 1_000;
            black_box(ledger.get(black_box(i)).unwrap())
        })
    });
}

criterion_group!(benches, bench_submit_memory, bench_submit_lmdb, bench_get_lmdb);
criterion_main!(benches);
