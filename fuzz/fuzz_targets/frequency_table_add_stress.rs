#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use stream_summary::FrequencyTable;

// Stress add-only streams against exact counts
//
// Every tracked item must be overestimated by at most its error bound, and
// any item with a true count above observed / capacity must be tracked.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = usize::from(data[0] % 8) + 1;
    let mut table: FrequencyTable<u8> = FrequencyTable::new(capacity);
    let mut truth: HashMap<u8, u64> = HashMap::new();

    for &item in &data[1..] {
        table.add(item);
        *truth.entry(item).or_default() += 1;
    }

    if let Err(err) = table.check_invariants() {
        panic!("invariant violated: {err}");
    }

    let observed = table.observed();
    assert_eq!(observed, (data.len() - 1) as u64);

    for (item, &count) in &truth {
        match table.estimate(item) {
            Some(estimate) => {
                let error = table.error_bound(item).unwrap_or(0);
                assert!(estimate >= count);
                assert!(estimate - error <= count);
            },
            None => assert!(count <= observed / capacity as u64),
        }
    }
});
