#![no_main]

use libfuzzer_sys::fuzz_target;
use stream_summary::FrequencyTable;

// Fuzz arbitrary operation sequences on FrequencyTable
//
// Mixes adds over a small key space with lookups, top-k queries and clears,
// checking the bucket chain and count mass after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let mut table: FrequencyTable<u8> = FrequencyTable::new(capacity);

    for pair in data[1..].chunks_exact(2) {
        let op = pair[0] % 8;
        let key = pair[1] % 32;

        match op {
            0..=3 => {
                // Add (weighted: most of a stream is adds)
                table.add(key);
            },
            4 => {
                let _ = table.exists(&key);
            },
            5 => {
                if let (Some(estimate), Some(error)) =
                    (table.estimate(&key), table.error_bound(&key))
                {
                    assert!(error < estimate);
                }
            },
            6 => {
                let k = usize::from(pair[1] % 8);
                let top = table.top_k(k);
                assert!(top.len() <= k.min(table.len()));
                assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
            },
            7 => {
                table.clear();
            },
            _ => unreachable!(),
        }

        // Validate invariants after each operation
        if let Err(err) = table.check_invariants() {
            panic!("invariant violated: {err}");
        }

        assert!(table.len() <= table.capacity());
        if table.is_empty() {
            assert_eq!(table.min_count(), None);
            assert_eq!(table.bucket_count(), 0);
        }
    }
});
