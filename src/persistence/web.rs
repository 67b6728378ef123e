//! Browser LocalStorage back end

use anyhow::anyhow;

use super::Storage;

/// Keys are namespaced as `track_titans_<key>`
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    const PREFIX: &'static str = "track_titans_";

    fn storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| anyhow!("no window"))?
            .local_storage()
            .map_err(|e| anyhow!("LocalStorage unavailable: {e:?}"))?
            .ok_or_else(|| anyhow!("LocalStorage disabled"))
    }
}

impl Storage for LocalStorage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Self::storage()?
            .get_item(&format!("{}{key}", Self::PREFIX))
            .map_err(|e| anyhow!("failed to read {key}: {e:?}"))
    }

    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        Self::storage()?
            .set_item(&format!("{}{key}", Self::PREFIX), value)
            .map_err(|e| anyhow!("failed to write {key}: {e:?}"))
    }
}
