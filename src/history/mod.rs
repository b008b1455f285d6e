pub mod store;
pub mod cache;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use cache::{HistoryCache, HistoryEntry, HISTORY_KEY, MAX_HISTORY_ENTRIES};
