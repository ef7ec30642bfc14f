//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release --test bench_test -- --ignored --nocapture

use std::time::Instant;

use axum_extra::extract::cookie::Key;

use tinyapp::database::AppState;
use tinyapp::ids;
use tinyapp::model::UrlRecord;

/// Benchmark helper to measure execution time
fn benchmark<F>(name: &str, iterations: usize, mut f: F)
where
    F: FnMut(),
{
    let start = Instant::now();

    for _ in 0..iterations {
        f();
    }

    let duration = start.elapsed();
    let avg_ms = duration.as_millis() as f64 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

#[test]
#[ignore]
fn bench_create_urls() {
    println!("\n=== Benchmark: Create URLs ===\n");

    let state = AppState::in_memory(Key::generate()).unwrap();

    benchmark("Allocate code and store record", 1000, || {
        let short_code = ids::allocate(|candidate| state.urls.get(candidate).map(|r| r.is_some())).unwrap();
        let record = UrlRecord::new(short_code.clone(), "https://example.com/bench".into(), None);
        state.urls.put(&short_code, &record).unwrap();
    });

    assert_eq!(state.urls.scan().unwrap().len(), 1000);
}

#[test]
#[ignore]
fn bench_store_scaling() {
    println!("\n=== Benchmark: Store Scaling ===\n");

    let state = AppState::in_memory(Key::generate()).unwrap();
    let mut inserted = 0;

    for size in [100, 1000, 10000] {
        while inserted < size {
            let short_code = ids::generate();
            let record = UrlRecord::new(short_code.clone(), format!("https://example.com/{inserted}"), None);
            state.urls.put(&short_code, &record).unwrap();
            inserted += 1;
        }

        println!("  Store size: {}", size);
        benchmark("Lookup by short code", 1000, || {
            let _ = state.urls.get("b2xVn2").unwrap();
        });
        benchmark("Full scan (listing)", 10, || {
            let _ = state.urls.scan().unwrap();
        });
    }
}
