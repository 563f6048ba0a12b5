//! Performance benchmarks for the contact directory.
//!
//! These benchmarks measure directory throughput under various conditions:
//! - Adding contacts to an empty directory
//! - Name lookups against directories of different sizes
//! - Full listing of a populated directory
//! - A dispatched call through the JSON-RPC layer

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use phonebook_rpc::repositories::{ContactRepository, Directory};
use phonebook_rpc::RpcDispatcher;
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Build a directory with `size` contacts spread over 100 names.
fn populated_directory(rt: &Runtime, size: usize) -> Arc<Directory> {
    let directory = Arc::new(Directory::new());
    rt.block_on(async {
        for i in 0..size {
            directory
                .add(&format!("Name{}", i % 100), &format!("+1{:09}", i), None)
                .await
                .unwrap();
        }
    });
    directory
}

fn bench_add(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("add_100_contacts", |b| {
        b.to_async(&rt).iter(|| async {
            let directory = Directory::new();
            for i in 0..100 {
                directory
                    .add("Bench", &format!("+1{:09}", i), None)
                    .await
                    .unwrap();
            }
        });
    });
}

fn bench_get_by_name(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("get_by_name");

    for size in [100, 1_000, 10_000].iter() {
        let directory = populated_directory(&rt, *size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.to_async(&rt).iter(|| {
                let directory = directory.clone();
                async move { directory.get_by_name("name42").await.unwrap() }
            });
        });
    }

    group.finish();
}

fn bench_get_all(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let directory = populated_directory(&rt, 1_000);

    c.bench_function("get_all_1000", |b| {
        b.to_async(&rt).iter(|| {
            let directory = directory.clone();
            async move { directory.get_all().await.unwrap() }
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let directory = populated_directory(&rt, 1_000) as Arc<dyn ContactRepository>;
    let dispatcher = Arc::new(RpcDispatcher::new(directory));

    c.bench_function("dispatch_get_by_name", |b| {
        b.to_async(&rt).iter(|| {
            let dispatcher = dispatcher.clone();
            async move {
                dispatcher
                    .handle(json!({
                        "jsonrpc": "2.0",
                        "method": "GetByName",
                        "params": {"name": "Name7"},
                        "id": 1
                    }))
                    .await
            }
        });
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_get_by_name,
    bench_get_all,
    bench_dispatch
);
criterion_main!(benches);
