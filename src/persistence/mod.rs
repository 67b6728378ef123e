//! Key/value persistence
//!
//! Back ends:
//! - `FileStorage`: one JSON file per key in a directory (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)
//! - `MemoryStorage`: in-process map (tests, headless tooling)

use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

/// A string key/value store
pub trait Storage {
    /// Read a value. `Ok(None)` means the key was never written.
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Overwrite a value in full
    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    /// Reject every write (exercises failure paths)
    pub read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.read_only {
            anyhow::bail!("storage is read-only, cannot write {key}");
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
