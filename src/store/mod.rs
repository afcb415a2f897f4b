mod fs;
mod mem;

pub use fs::FileStore;
pub use mem::MemoryStore;

use crate::error::Result;

/// Minimal durable key-value storage.
///
/// Values are opaque strings. Writes must be complete by the time `set`
/// returns, so a crash never leaves a half-written value behind.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
