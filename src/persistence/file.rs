//! Directory-backed storage: `<dir>/<key>.json`

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;

use super::Storage;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the current working directory
    pub fn current_dir() -> anyhow::Result<Self> {
        let dir = std::env::current_dir().context("cannot resolve working directory")?;
        Ok(Self::new(dir))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("track-titans-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_is_none() {
        let storage = FileStorage::new(scratch_dir("missing"));
        assert_eq!(storage.load("nothing_here").unwrap(), None);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = scratch_dir("roundtrip");
        let mut storage = FileStorage::new(&dir);
        storage.store("high_scores", "[]").unwrap();
        assert!(dir.join("high_scores.json").exists());
        assert_eq!(storage.load("high_scores").unwrap().as_deref(), Some("[]"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let mut storage = FileStorage::new(scratch_dir("gone").join("does/not/exist"));
        assert!(storage.store("high_scores", "[]").is_err());
    }
}
