//! Several producer threads feeding one lock-wrapped table.
//!
//! Run with: cargo run --example shared_table --features concurrency

use std::sync::Arc;
use std::thread;

use stream_summary::ConcurrentFrequencyTable;

fn main() {
    let table = Arc::new(ConcurrentFrequencyTable::new(8));

    let producers: Vec<_> = (0..4u32)
        .map(|worker| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for i in 0..10_000u32 {
                    // every worker hammers key 0; the rest is per-worker noise
                    let key = if i % 2 == 0 { 0 } else { worker * 1_000 + i % 50 };
                    table.add(key);
                }
            })
        })
        .collect();

    for producer in producers {
        if producer.join().is_err() {
            eprintln!("producer panicked");
            return;
        }
    }

    println!("=== Shared table after 4 x 10_000 adds ===\n");
    println!("   estimate for key 0: {:?}", table.estimate(&0));
    println!("   top 3: {:?}", table.top_k(3));

    let observed = table.with_read(|t| t.observed());
    println!("   observed: {observed}");

    let table = match Arc::try_unwrap(table) {
        Ok(table) => table.into_inner(),
        Err(_) => return,
    };
    if let Err(err) = table.check_invariants() {
        eprintln!("   {err}");
    }
}
