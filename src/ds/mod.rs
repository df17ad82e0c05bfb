pub mod bucket;
pub mod slot_arena;

pub use bucket::Bucket;
pub use slot_arena::{SlotArena, SlotId};
