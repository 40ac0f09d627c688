//! Key-value persistence medium.
//!
//! The repository only ever talks to a [`KeyValueStore`]: string keys, string
//! values, synchronous calls. `FileStore` persists to disk the way browser local
//! storage persists per origin; `MemoryStore` backs the tests.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::StoreError;

/// Synchronous string key-value store.
///
/// Implementations use interior mutability so one store can be shared behind an
/// `Arc` by the repository and the autosave task.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Bytes a key/value pair counts against a quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Rejects a write that would push the store past `limit`.
pub(crate) fn check_quota(
    key: &str,
    used: usize,
    replaced: usize,
    incoming: usize,
    limit: Option<usize>,
) -> Result<(), StoreError> {
    let Some(limit) = limit else {
        return Ok(());
    };
    let needed = used.saturating_sub(replaced) + incoming;
    if needed > limit {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            limit,
        });
    }
    Ok(())
}
