#![no_main]

use libfuzzer_sys::fuzz_target;
use stream_summary::ds::{SlotArena, SlotId};

// Fuzz arbitrary insert/remove sequences on SlotArena
//
// Tracks live handles alongside the arena and checks len, lookups and
// slot reuse stay consistent.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u8> = SlotArena::new();
    let mut live: Vec<(SlotId, u8)> = Vec::new();

    for &byte in data {
        match byte % 4 {
            0 | 1 => {
                let id = arena.insert(byte);
                assert_eq!(arena.get(id), Some(&byte));
                live.push((id, byte));
            },
            2 => {
                if !live.is_empty() {
                    let (id, value) = live.swap_remove(usize::from(byte) % live.len());
                    assert_eq!(arena.remove(id), Some(value));
                    assert!(!arena.contains(id));
                }
            },
            3 => {
                for &(id, value) in &live {
                    assert_eq!(arena.get(id), Some(&value));
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        assert_eq!(arena.is_empty(), live.is_empty());
    }
});
