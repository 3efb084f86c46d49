use criterion::{Criterion, criterion_group, criterion_main};
use std::sync::Arc;
use tokio::runtime::Runtime;

use strata_cache::{CacheConfig, CacheKey, CachedValue, QueryCache};
use strata_store::strata_core::Document;
use strata_store::{PageResult, QueryDescriptor, Record};

/// Crea una pagina de prueba con N records
fn create_test_page(num_records: usize) -> Arc<PageResult> {
    let items: Vec<Record> = (0..num_records)
        .map(|i| {
            Record::new(
                format!("p-{}", i),
                Document::new()
                    .with("name", format!("product-{}", i))
                    .with("stock", i as i64),
            )
        })
        .collect();

    Arc::new(PageResult::from_page(items, num_records + 1))
}

fn products_key(n: usize) -> CacheKey {
    CacheKey::for_query(&QueryDescriptor::new(format!("products-{}", n)).with_page_size(20))
}

/// Benchmark: Cache get (hit)
fn bench_cache_get_hit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let cache = QueryCache::new(CacheConfig::default());
    let key = products_key(0);
    let page = create_test_page(100);

    // Pre-populate cache
    rt.block_on(async {
        cache.insert_page(key.clone(), page).await;
    });

    c.bench_function("cache_get_hit", |b| {
        b.to_async(&rt).iter(|| async {
            let result = cache.get(&key).await;
            std::hint::black_box(result)
        });
    });
}

/// Benchmark: Cache get (miss)
fn bench_cache_get_miss(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = QueryCache::new(CacheConfig::default());
    let key = CacheKey::for_query(&QueryDescriptor::new("nonexistent"));

    c.bench_function("cache_get_miss", |b| {
        b.to_async(&rt).iter(|| async {
            let result = cache.get(&key).await;
            std::hint::black_box(result)
        });
    });
}

/// Benchmark: Cache insert
fn bench_cache_insert(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = Arc::new(QueryCache::new(CacheConfig::default()));
    let page = create_test_page(100);

    let counter = Arc::new(std::sync::atomic::AtomicU64::new(0));

    c.bench_function("cache_insert", |b| {
        b.to_async(&rt).iter(|| {
            let cache = Arc::clone(&cache);
            let page = Arc::clone(&page);
            let counter = Arc::clone(&counter);
            async move {
                let count = counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                let key = products_key(count as usize);
                cache.insert(key, CachedValue::Page(page)).await;
            }
        });
    });
}

/// Benchmark: invalidacion por substring con cache poblado
fn bench_invalidate_containing(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = QueryCache::new(CacheConfig::default());
    let page = create_test_page(10);

    rt.block_on(async {
        for i in 0..1_000 {
            cache
                .insert(products_key(i), CachedValue::Page(Arc::clone(&page)))
                .await;
        }
    });

    c.bench_function("invalidate_containing_no_match", |b| {
        b.to_async(&rt).iter(|| async {
            let result = cache.invalidate_containing("no-such-collection").await;
            std::hint::black_box(result)
        });
    });
}

criterion_group!(
    benches,
    bench_cache_get_hit,
    bench_cache_get_miss,
    bench_cache_insert,
    bench_invalidate_containing
);
criterion_main!(benches);
