//! Benchmark suite for catalog store operations
//!
//! Measures the cost of each store operation at a few catalog sizes using
//! the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use divan::Bencher;
use product_catalog::core::CatalogStore;
use product_catalog::types::{CreateProduct, Money, ProductId, UpdateProduct};

fn main() {
    divan::main();
}

const SIZES: &[usize] = &[10, 1_000, 10_000];

fn usd(value: &str) -> Money {
    Money::parse(value, "USD").unwrap()
}

fn filled_store(size: usize) -> (CatalogStore, Vec<ProductId>) {
    let store = CatalogStore::new();
    let ids = (0..size)
        .map(|i| {
            store
                .create(CreateProduct::new(format!("product-{}", i), usd("9.99")))
                .unwrap()
                .id
        })
        .collect();
    (store, ids)
}

#[divan::bench(args = SIZES)]
fn create(bencher: Bencher, size: usize) {
    bencher
        .with_inputs(|| filled_store(size).0)
        .bench_local_values(|store| {
            store
                .create(CreateProduct::new("Comb", usd("3.00")))
                .unwrap();
            store
        });
}

#[divan::bench(args = SIZES)]
fn list(bencher: Bencher, size: usize) {
    let (store, _) = filled_store(size);
    bencher.bench_local(|| divan::black_box(store.list()));
}

#[divan::bench(args = SIZES)]
fn get(bencher: Bencher, size: usize) {
    let (store, ids) = filled_store(size);
    let last = ids[ids.len() - 1];
    bencher.bench_local(|| store.get(divan::black_box(&last)).unwrap());
}

#[divan::bench(args = SIZES)]
fn update(bencher: Bencher, size: usize) {
    let (store, ids) = filled_store(size);
    let middle = ids[ids.len() / 2];
    bencher.bench_local(|| {
        store
            .update(UpdateProduct::new(middle).with_price(usd("4.50")))
            .unwrap()
    });
}

#[divan::bench(args = SIZES)]
fn delete_first(bencher: Bencher, size: usize) {
    bencher
        .with_inputs(|| filled_store(size))
        .bench_local_values(|(store, ids)| {
            store.delete(&ids[0]).unwrap();
            store
        });
}
