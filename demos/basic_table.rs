//! Walks a small frequency table through admission, promotion and replacement.
//!
//! Run with: RUST_LOG=stream_summary=debug cargo run --example basic_table

use stream_summary::{AddOutcome, FrequencyTable};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    println!("=== FrequencyTable (capacity 2) ===\n");
    let mut table = FrequencyTable::new(2);

    for item in ["a", "b", "a", "c"] {
        match table.try_add(item) {
            Ok(AddOutcome::Admitted) => println!("   {item}: admitted at 1"),
            Ok(AddOutcome::Promoted { count }) => println!("   {item}: promoted to {count}"),
            Ok(AddOutcome::Replaced {
                evicted,
                evicted_count,
            }) => println!(
                "   {item}: replaced {evicted} (count {evicted_count}), starts at {}",
                evicted_count + 1
            ),
            Err(err) => {
                eprintln!("   {item}: {err}");
                return;
            },
        }
    }
    println!();

    // "b" was the oldest item in the lowest bucket, so "c" took its slot
    println!("   exists a? {}", table.exists(&"a"));
    println!("   exists b? {} (replaced)", table.exists(&"b"));
    println!("   exists c? {}", table.exists(&"c"));
    println!(
        "   c: estimate {:?}, error bound {:?}, guaranteed {:?}",
        table.estimate(&"c"),
        table.error_bound(&"c"),
        table.guaranteed(&"c")
    );
    println!("   tracked: {:?}", table.tracked_items());
    println!();

    println!("Buckets (lowest count first):");
    print!("{table}");

    // Same lines through tracing; visible with RUST_LOG=stream_summary=debug
    table.dump();
}
