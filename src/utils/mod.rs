// Shared utilities

pub mod storage;

pub use storage::{KeyValueStorage, LocalStorage, MemoryStorage, StorageError};
