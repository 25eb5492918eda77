// Chat session archive: past conversations persisted as one JSON array
// in a durable key-value slot, most recent first.

pub mod slot;
pub mod store;

pub use slot::{ArchiveSlot, MemorySlot, RedisSlot};
pub use store::ChatSessionStore;
