//! Finds the hottest request paths in a skewed synthetic access log.
//!
//! Run with: cargo run --example heavy_hitters

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stream_summary::FrequencyTableBuilder;

const PATHS: [&str; 6] = [
    "/",
    "/login",
    "/api/items",
    "/api/cart",
    "/static/app.js",
    "/health",
];

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut table = FrequencyTableBuilder::new(16)
        .bucket_hint(64)
        .build::<String>();
    let mut exact: HashMap<String, u64> = HashMap::new();

    for _ in 0..50_000 {
        // 60% of traffic on a handful of paths, the rest on a long tail
        let path = if rng.random_bool(0.6) {
            PATHS[rng.random_range(0..PATHS.len())].to_string()
        } else {
            format!("/product/{}", rng.random_range(0..10_000u32))
        };
        *exact.entry(path.clone()).or_default() += 1;
        table.add(path);
    }

    println!("=== Top 6 of {} requests ===\n", table.observed());
    for (path, estimate) in table.top_k(6) {
        let error = table.error_bound(&path).unwrap_or(0);
        let truth = exact.get(&path).copied().unwrap_or(0);
        println!("   {path:<16} estimate {estimate:>6}  (+/- {error:>5})  exact {truth:>6}");
    }

    println!("\n=== Items above 5% of the stream ===\n");
    for (path, estimate) in table.heavy_hitters(0.05) {
        println!("   {path:<16} {estimate:>6}");
    }

    println!(
        "\n   {} distinct counts across {} tracked items, ~{} bytes",
        table.bucket_count(),
        table.len(),
        table.approx_bytes()
    );
}
